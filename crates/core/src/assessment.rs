//! Risk results
//!
//! `RiskAssessment` is the two-field `{probability, risk}` object every
//! prediction endpoint returns. `RiskBreakdown` carries the same result
//! together with the factors that produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::constants::probability;

/// Coarse three-tier risk label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    /// Bucket a normalized probability. Both comparisons are strict, so
    /// exactly 0.7 is Moderate and exactly 0.3 is Low.
    pub fn from_probability(p: f64) -> Self {
        if p > probability::HIGH_THRESHOLD {
            RiskLevel::High
        } else if p > probability::MODERATE_THRESHOLD {
            RiskLevel::Moderate
        } else {
            RiskLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Scale an accumulated score into `[0, CAP]`
pub fn normalize(risk_factors: f64, divisor: f64) -> f64 {
    (risk_factors / divisor).min(probability::CAP)
}

/// Result returned by every scorer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub probability: f64,
    pub risk: RiskLevel,
}

impl RiskAssessment {
    pub fn from_score(risk_factors: f64, divisor: f64) -> Self {
        let probability = normalize(risk_factors, divisor);
        Self {
            probability,
            risk: RiskLevel::from_probability(probability),
        }
    }
}

/// One rule that fired while scoring
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FactorContribution {
    pub factor: &'static str,
    /// Which tier of the rule matched
    pub tier: &'static str,
    pub weight: f64,
}

/// Assessment plus the accumulation that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RiskBreakdown {
    pub condition: Condition,
    pub probability: f64,
    pub risk: RiskLevel,
    pub risk_factors: f64,
    pub max_factors: f64,
    pub contributions: Vec<FactorContribution>,
}

impl RiskBreakdown {
    pub fn assessment(&self) -> RiskAssessment {
        RiskAssessment {
            probability: self.probability,
            risk: self.risk,
        }
    }
}

impl From<RiskBreakdown> for RiskAssessment {
    fn from(breakdown: RiskBreakdown) -> Self {
        breakdown.assessment()
    }
}
