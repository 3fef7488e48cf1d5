//! Weighted Rule Scoring
//!
//! Every condition is scored the same way: walk a static table of rules,
//! add the weight of the first matching tier of each rule, divide by the
//! condition's normalization divisor, cap, and bucket. Only the typed input
//! and the table differ between conditions.

pub mod chd;
pub mod diabetes;
pub mod stroke;

use serde::Serialize;

use crate::assessment::{FactorContribution, RiskAssessment, RiskBreakdown};
use crate::condition::Condition;
use crate::error::RiskError;
use crate::record::AttributeRecord;

/// One weighted arm of a rule
pub struct Tier<I> {
    pub label: &'static str,
    pub weight: f64,
    pub applies: fn(&I) -> bool,
}

/// A risk factor with one or more mutually exclusive tiers.
///
/// Tiers are checked in order and the first match wins, so
/// `[age > 60 => 1.5, age > 45 => 0.8]` behaves as an if / else-if chain.
/// Tables are written as struct literals inside `const` items so nested
/// slices get `'static` lifetime extension.
pub struct Rule<I: 'static> {
    pub factor: &'static str,
    pub tiers: &'static [Tier<I>],
}

impl<I: 'static> Rule<I> {
    /// First tier that applies to the input
    pub fn matching(&self, input: &I) -> Option<&'static Tier<I>> {
        self.tiers.iter().find(|tier| (tier.applies)(input))
    }
}

/// Typed view of an [`AttributeRecord`], validated once at the boundary
pub trait ConditionInput: Sized {
    fn from_record(record: &AttributeRecord) -> Result<Self, RiskError>;
}

/// Accumulate-normalize-bucket scorer over a declarative rule table
pub struct WeightedRuleScorer<I: 'static> {
    condition: Condition,
    rules: &'static [Rule<I>],
    divisor: f64,
}

impl<I: 'static> WeightedRuleScorer<I> {
    pub const fn new(condition: Condition, rules: &'static [Rule<I>], divisor: f64) -> Self {
        Self {
            condition,
            rules,
            divisor,
        }
    }

    /// Score an already-typed input. Infallible: all coercion happened
    /// when the input was built.
    pub fn evaluate(&self, input: &I) -> RiskBreakdown {
        let mut risk_factors = 0.0;
        let mut contributions = Vec::new();

        for rule in self.rules {
            if let Some(tier) = rule.matching(input) {
                risk_factors += tier.weight;
                contributions.push(FactorContribution {
                    factor: rule.factor,
                    tier: tier.label,
                    weight: tier.weight,
                });
            }
        }

        let assessment = RiskAssessment::from_score(risk_factors, self.divisor);
        RiskBreakdown {
            condition: self.condition,
            probability: assessment.probability,
            risk: assessment.risk,
            risk_factors,
            max_factors: self.divisor,
            contributions,
        }
    }
}

/// Description of a tier for catalog listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierDescriptor {
    pub condition: &'static str,
    pub weight: f64,
}

/// Description of a rule for catalog listings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorDescriptor {
    pub factor: &'static str,
    pub tiers: Vec<TierDescriptor>,
}

/// Object-safe interface over the three condition scorers
pub trait RiskScorer: Send + Sync {
    fn condition(&self) -> Condition;

    /// Normalization divisor
    fn max_factors(&self) -> f64;

    fn factors(&self) -> Vec<FactorDescriptor>;

    /// Full accumulation detail for a record
    fn explain(&self, record: &AttributeRecord) -> Result<RiskBreakdown, RiskError>;

    fn assess(&self, record: &AttributeRecord) -> Result<RiskAssessment, RiskError> {
        self.explain(record).map(RiskAssessment::from)
    }
}

impl<I> RiskScorer for WeightedRuleScorer<I>
where
    I: ConditionInput + 'static,
{
    fn condition(&self) -> Condition {
        self.condition
    }

    fn max_factors(&self) -> f64 {
        self.divisor
    }

    fn factors(&self) -> Vec<FactorDescriptor> {
        self.rules
            .iter()
            .map(|rule| FactorDescriptor {
                factor: rule.factor,
                tiers: rule
                    .tiers
                    .iter()
                    .map(|tier| TierDescriptor {
                        condition: tier.label,
                        weight: tier.weight,
                    })
                    .collect(),
            })
            .collect()
    }

    fn explain(&self, record: &AttributeRecord) -> Result<RiskBreakdown, RiskError> {
        let input = I::from_record(record).map_err(|e| {
            tracing::debug!(condition = %self.condition, error = %e, "Rejected attribute record");
            e
        })?;

        let breakdown = self.evaluate(&input);
        tracing::debug!(
            condition = %self.condition,
            risk_factors = breakdown.risk_factors,
            probability = breakdown.probability,
            risk = %breakdown.risk,
            "Scored attribute record"
        );
        Ok(breakdown)
    }
}
