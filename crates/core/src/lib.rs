//! PredictCare scoring core
//!
//! Deterministic, explainable weighted-rule risk scorers for coronary heart
//! disease, stroke and diabetes. Each scorer is a pure function of an
//! [`AttributeRecord`]:
//!
//! 1. the record is converted once into a typed input (strict fields may
//!    fail with [`RiskError::MalformedNumeric`])
//! 2. a static table of weighted rules accumulates a risk score
//! 3. the score is divided by the condition's normalization divisor,
//!    capped at 0.9 and bucketed into Low / Moderate / High
//!
//! No state is shared between calls; scorers may be used from any number of
//! threads.

pub mod assessment;
pub mod condition;
pub mod constants;
pub mod error;
pub mod record;
pub mod scoring;

pub use assessment::{FactorContribution, RiskAssessment, RiskBreakdown, RiskLevel};
pub use condition::{catalog, Condition, ConditionProfile};
pub use error::{NumericKind, RiskError};
pub use record::{AttributeRecord, Field, Flag};
pub use scoring::chd::{score_chd, ChdInput};
pub use scoring::diabetes::{score_diabetes, DiabetesInput};
pub use scoring::stroke::{score_stroke, Gender, ResidenceType, SmokingStatus, StrokeInput};
pub use scoring::{ConditionInput, FactorDescriptor, RiskScorer, Rule, Tier, TierDescriptor, WeightedRuleScorer};

/// Score a record for any condition
pub fn assess(condition: Condition, record: &AttributeRecord) -> Result<RiskAssessment, RiskError> {
    condition.scorer().assess(record)
}

/// Score a record and return the factors that fired
pub fn explain(condition: Condition, record: &AttributeRecord) -> Result<RiskBreakdown, RiskError> {
    condition.scorer().explain(record)
}
