//! Condition catalog
//!
//! The three scored conditions, their URL slugs and their scorers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::scoring::{chd, diabetes, stroke, FactorDescriptor, RiskScorer};
use crate::error::RiskError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    /// Coronary heart disease
    Chd,
    Stroke,
    Diabetes,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Chd, Condition::Stroke, Condition::Diabetes];

    /// Path segment used by the prediction endpoints
    pub fn slug(&self) -> &'static str {
        match self {
            Condition::Chd => "chd",
            Condition::Stroke => "stroke",
            Condition::Diabetes => "diabetes",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Chd => "Coronary Heart Disease",
            Condition::Stroke => "Stroke",
            Condition::Diabetes => "Diabetes",
        }
    }

    pub fn scorer(&self) -> &'static dyn RiskScorer {
        match self {
            Condition::Chd => &chd::SCORER,
            Condition::Stroke => &stroke::SCORER,
            Condition::Diabetes => &diabetes::SCORER,
        }
    }

    /// Describe this condition's rule table
    pub fn profile(&self) -> ConditionProfile {
        let scorer = self.scorer();
        ConditionProfile {
            condition: *self,
            name: self.display_name(),
            max_factors: scorer.max_factors(),
            factors: scorer.factors(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Condition {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Condition::ALL
            .into_iter()
            .find(|c| c.slug() == s)
            .ok_or_else(|| RiskError::UnknownCondition(s.to_string()))
    }
}

/// Public description of a condition's weighted rules
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionProfile {
    pub condition: Condition,
    pub name: &'static str,
    pub max_factors: f64,
    pub factors: Vec<FactorDescriptor>,
}

/// Profiles for every condition, in catalog order
pub fn catalog() -> Vec<ConditionProfile> {
    Condition::ALL.iter().map(Condition::profile).collect()
}
