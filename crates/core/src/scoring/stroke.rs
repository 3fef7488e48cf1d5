//! Stroke scorer
//!
//! `avg_glucose_level` and `bmi` are strictly coerced to decimals: a value
//! that is present but unreadable fails the call instead of falling back to
//! its default. `age` stays lenient.

use serde::Serialize;

use super::{ConditionInput, Rule, Tier, WeightedRuleScorer};
use crate::assessment::RiskAssessment;
use crate::condition::Condition;
use crate::constants::{divisors, stroke_defaults};
use crate::error::RiskError;
use crate::record::{AttributeRecord, Field, Flag};

const AGE: Field = Field::new("age");
const HYPERTENSION: Field = Field::new("hypertension");
const HEART_DISEASE: Field = Field::new("heart_disease");
const AVG_GLUCOSE_LEVEL: Field = Field::new("avg_glucose_level");
const BMI: Field = Field::new("bmi");
const GENDER: Field = Field::new("gender");
const RESIDENCE_TYPE: Field = Field::new("residence_type");
const SMOKING_STATUS: Field = Field::new("smoking_status");

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    Unspecified,
}

impl Gender {
    /// Case-sensitive: only `"Male"` is male
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Male") => Gender::Male,
            Some("Female") => Gender::Female,
            Some(_) => Gender::Other,
            None => Gender::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ResidenceType {
    Urban,
    Rural,
    #[default]
    Unspecified,
}

impl ResidenceType {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("Urban") => ResidenceType::Urban,
            Some("Rural") => ResidenceType::Rural,
            _ => ResidenceType::Unspecified,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum SmokingStatus {
    Smokes,
    FormerlySmoked,
    NeverSmoked,
    #[default]
    Unknown,
}

impl SmokingStatus {
    fn parse(value: Option<&str>) -> Self {
        match value {
            Some("smokes") => SmokingStatus::Smokes,
            Some("formerly_smoked") => SmokingStatus::FormerlySmoked,
            Some("never_smoked") => SmokingStatus::NeverSmoked,
            _ => SmokingStatus::Unknown,
        }
    }
}

/// Typed stroke attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeInput {
    pub age: Option<f64>,
    pub hypertension: Flag,
    pub heart_disease: Flag,
    pub avg_glucose_level: f64,
    pub bmi: f64,
    pub gender: Gender,
    pub residence_type: ResidenceType,
    pub smoking_status: SmokingStatus,
}

impl Default for StrokeInput {
    fn default() -> Self {
        Self {
            age: None,
            hypertension: Flag::Unset,
            heart_disease: Flag::Unset,
            avg_glucose_level: stroke_defaults::AVG_GLUCOSE_LEVEL,
            bmi: stroke_defaults::BMI,
            gender: Gender::Unspecified,
            residence_type: ResidenceType::Unspecified,
            smoking_status: SmokingStatus::Unknown,
        }
    }
}

impl ConditionInput for StrokeInput {
    fn from_record(record: &AttributeRecord) -> Result<Self, RiskError> {
        Ok(Self {
            age: record.number(&AGE),
            hypertension: record.flag(&HYPERTENSION),
            heart_disease: record.flag(&HEART_DISEASE),
            avg_glucose_level: record.float_or(&AVG_GLUCOSE_LEVEL, stroke_defaults::AVG_GLUCOSE_LEVEL)?,
            bmi: record.float_or(&BMI, stroke_defaults::BMI)?,
            gender: Gender::parse(record.text(&GENDER)),
            residence_type: ResidenceType::parse(record.text(&RESIDENCE_TYPE)),
            smoking_status: SmokingStatus::parse(record.text(&SMOKING_STATUS)),
        })
    }
}

fn age_above(input: &StrokeInput, threshold: f64) -> bool {
    input.age.is_some_and(|age| age > threshold)
}

const RULES: &[Rule<StrokeInput>] = &[
    Rule {
        factor: "age",
        tiers: &[
            Tier {
                label: "age > 60",
                weight: 1.5,
                applies: |i: &StrokeInput| age_above(i, 60.0),
            },
            Tier {
                label: "age > 45",
                weight: 0.8,
                applies: |i: &StrokeInput| age_above(i, 45.0),
            },
        ],
    },
    Rule {
        factor: "hypertension",
        tiers: &[Tier {
            label: "hypertension == \"1\"",
            weight: 1.5,
            applies: |i: &StrokeInput| i.hypertension.is_set(),
        }],
    },
    Rule {
        factor: "heart_disease",
        tiers: &[Tier {
            label: "heart_disease == \"1\"",
            weight: 1.5,
            applies: |i: &StrokeInput| i.heart_disease.is_set(),
        }],
    },
    Rule {
        factor: "avg_glucose_level",
        tiers: &[
            Tier {
                label: "avg_glucose_level > 140",
                weight: 1.0,
                applies: |i: &StrokeInput| i.avg_glucose_level > 140.0,
            },
            Tier {
                label: "avg_glucose_level > 120",
                weight: 0.5,
                applies: |i: &StrokeInput| i.avg_glucose_level > 120.0,
            },
        ],
    },
    Rule {
        factor: "bmi",
        tiers: &[
            Tier {
                label: "bmi > 30",
                weight: 0.8,
                applies: |i: &StrokeInput| i.bmi > 30.0,
            },
            Tier {
                label: "bmi > 25",
                weight: 0.4,
                applies: |i: &StrokeInput| i.bmi > 25.0,
            },
        ],
    },
    Rule {
        factor: "gender",
        tiers: &[Tier {
            label: "gender == \"Male\"",
            weight: 0.3,
            applies: |i: &StrokeInput| i.gender == Gender::Male,
        }],
    },
    Rule {
        factor: "residence_type",
        tiers: &[Tier {
            label: "residence_type == \"Urban\"",
            weight: 0.1,
            applies: |i: &StrokeInput| i.residence_type == ResidenceType::Urban,
        }],
    },
    Rule {
        factor: "smoking_status",
        tiers: &[
            Tier {
                label: "smoking_status == \"smokes\"",
                weight: 1.0,
                applies: |i: &StrokeInput| i.smoking_status == SmokingStatus::Smokes,
            },
            Tier {
                label: "smoking_status == \"formerly_smoked\"",
                weight: 0.5,
                applies: |i: &StrokeInput| i.smoking_status == SmokingStatus::FormerlySmoked,
            },
        ],
    },
];

pub static SCORER: WeightedRuleScorer<StrokeInput> =
    WeightedRuleScorer::new(Condition::Stroke, RULES, divisors::STROKE);

/// Score a record for stroke risk.
///
/// Fails with [`RiskError::MalformedNumeric`] when `avg_glucose_level` or
/// `bmi` is present but not a decimal number.
pub fn score_stroke(record: &AttributeRecord) -> Result<RiskAssessment, RiskError> {
    let input = StrokeInput::from_record(record)?;
    Ok(SCORER.evaluate(&input).assessment())
}
