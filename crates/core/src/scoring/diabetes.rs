//! Diabetes scorer
//!
//! Clinical-panel attributes. `bmi`, `fpg` and `ffpg` are strict decimals;
//! blood pressure, lipids, BUN and creatinine clearance are strict integers.
//! All strict fields are coerced before any rule runs, so one malformed
//! value rejects the whole record.

use serde::Serialize;

use super::{ConditionInput, Rule, Tier, WeightedRuleScorer};
use crate::assessment::RiskAssessment;
use crate::condition::Condition;
use crate::constants::{diabetes_defaults as defaults, divisors};
use crate::error::RiskError;
use crate::record::{AttributeRecord, Field, Flag};

const AGE: Field = Field::with_aliases("age", &["Age"]);
const GENDER: Field = Field::with_aliases("gender", &["Gender"]);
const BMI: Field = Field::with_aliases("bmi", &["BMI"]);
const SBP: Field = Field::with_aliases("sbp", &["SBP"]);
const DBP: Field = Field::with_aliases("dbp", &["DBP"]);
const FPG: Field = Field::with_aliases("fpg", &["FPG"]);
const CHOL: Field = Field::with_aliases("chol", &["Chol"]);
const HDL: Field = Field::with_aliases("hdl", &["HDL"]);
const LDL: Field = Field::with_aliases("ldl", &["LDL"]);
const BUN: Field = Field::with_aliases("bun", &["BUN"]);
const CCR: Field = Field::with_aliases("ccr", &["CCR"]);
const FFPG: Field = Field::with_aliases("ffpg", &["FFPG"]);
const SMOKING_STATUS: Field = Field::with_aliases("smoking_status", &["smoking"]);
const DRINKING_STATUS: Field = Field::with_aliases("drinking_status", &["drinking"]);
const FAMILY_HISTORY: Field = Field::with_aliases("family_history", &["family_histroy"]);

/// Typed diabetes attributes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiabetesInput {
    pub age: Option<f64>,
    /// `"1"` is male
    pub male: Flag,
    pub bmi: f64,
    pub sbp: i64,
    pub dbp: i64,
    pub fpg: f64,
    pub chol: i64,
    pub hdl: i64,
    pub ldl: i64,
    pub bun: i64,
    pub ccr: i64,
    pub ffpg: f64,
    pub smoker: Flag,
    pub drinker: Flag,
    pub family_history: Flag,
}

impl Default for DiabetesInput {
    fn default() -> Self {
        Self {
            age: None,
            male: Flag::Unset,
            bmi: defaults::BMI,
            sbp: defaults::SBP,
            dbp: defaults::DBP,
            fpg: defaults::FPG,
            chol: defaults::CHOL,
            hdl: defaults::HDL,
            ldl: defaults::LDL,
            bun: defaults::BUN,
            ccr: defaults::CCR,
            ffpg: defaults::FFPG,
            smoker: Flag::Unset,
            drinker: Flag::Unset,
            family_history: Flag::Unset,
        }
    }
}

impl ConditionInput for DiabetesInput {
    fn from_record(record: &AttributeRecord) -> Result<Self, RiskError> {
        Ok(Self {
            age: record.number(&AGE),
            male: record.flag(&GENDER),
            bmi: record.float_or(&BMI, defaults::BMI)?,
            sbp: record.integer_or(&SBP, defaults::SBP)?,
            dbp: record.integer_or(&DBP, defaults::DBP)?,
            fpg: record.float_or(&FPG, defaults::FPG)?,
            chol: record.integer_or(&CHOL, defaults::CHOL)?,
            hdl: record.integer_or(&HDL, defaults::HDL)?,
            ldl: record.integer_or(&LDL, defaults::LDL)?,
            bun: record.integer_or(&BUN, defaults::BUN)?,
            ccr: record.integer_or(&CCR, defaults::CCR)?,
            ffpg: record.float_or(&FFPG, defaults::FFPG)?,
            smoker: record.flag(&SMOKING_STATUS),
            drinker: record.flag(&DRINKING_STATUS),
            family_history: record.flag(&FAMILY_HISTORY),
        })
    }
}

const RULES: &[Rule<DiabetesInput>] = &[
    Rule {
        factor: "age",
        tiers: &[Tier {
            label: "age > 45",
            weight: 0.8,
            applies: |i: &DiabetesInput| i.age.is_some_and(|age| age > 45.0),
        }],
    },
    Rule {
        factor: "gender",
        tiers: &[Tier {
            label: "gender == \"1\"",
            weight: 0.2,
            applies: |i: &DiabetesInput| i.male.is_set(),
        }],
    },
    Rule {
        factor: "bmi",
        tiers: &[
            Tier {
                label: "bmi > 30",
                weight: 1.0,
                applies: |i: &DiabetesInput| i.bmi > 30.0,
            },
            Tier {
                label: "bmi > 25",
                weight: 0.5,
                applies: |i: &DiabetesInput| i.bmi > 25.0,
            },
        ],
    },
    Rule {
        factor: "blood_pressure",
        tiers: &[Tier {
            label: "sbp > 140 or dbp > 90",
            weight: 0.8,
            applies: |i: &DiabetesInput| i.sbp > 140 || i.dbp > 90,
        }],
    },
    Rule {
        factor: "fpg",
        tiers: &[
            Tier {
                label: "fpg > 126",
                weight: 1.5,
                applies: |i: &DiabetesInput| i.fpg > 126.0,
            },
            Tier {
                label: "fpg > 100",
                weight: 0.7,
                applies: |i: &DiabetesInput| i.fpg > 100.0,
            },
        ],
    },
    Rule {
        factor: "chol",
        tiers: &[Tier {
            label: "chol > 240",
            weight: 0.5,
            applies: |i: &DiabetesInput| i.chol > 240,
        }],
    },
    Rule {
        factor: "hdl",
        tiers: &[Tier {
            label: "hdl < 40",
            weight: 0.5,
            applies: |i: &DiabetesInput| i.hdl < 40,
        }],
    },
    Rule {
        factor: "ldl",
        tiers: &[Tier {
            label: "ldl > 160",
            weight: 0.5,
            applies: |i: &DiabetesInput| i.ldl > 160,
        }],
    },
    Rule {
        factor: "bun",
        tiers: &[Tier {
            label: "bun > 20",
            weight: 0.3,
            applies: |i: &DiabetesInput| i.bun > 20,
        }],
    },
    Rule {
        factor: "ccr",
        tiers: &[Tier {
            label: "ccr < 60",
            weight: 0.4,
            applies: |i: &DiabetesInput| i.ccr < 60,
        }],
    },
    Rule {
        factor: "ffpg",
        tiers: &[Tier {
            label: "ffpg > 100",
            weight: 0.7,
            applies: |i: &DiabetesInput| i.ffpg > 100.0,
        }],
    },
    Rule {
        factor: "smoking_status",
        tiers: &[Tier {
            label: "smoking_status == \"1\"",
            weight: 0.4,
            applies: |i: &DiabetesInput| i.smoker.is_set(),
        }],
    },
    Rule {
        factor: "drinking_status",
        tiers: &[Tier {
            label: "drinking_status == \"1\"",
            weight: 0.3,
            applies: |i: &DiabetesInput| i.drinker.is_set(),
        }],
    },
    Rule {
        factor: "family_history",
        tiers: &[Tier {
            label: "family_history == \"1\"",
            weight: 1.5,
            applies: |i: &DiabetesInput| i.family_history.is_set(),
        }],
    },
];

pub static SCORER: WeightedRuleScorer<DiabetesInput> =
    WeightedRuleScorer::new(Condition::Diabetes, RULES, divisors::DIABETES);

/// Score a record for diabetes risk.
///
/// Fails with [`RiskError::MalformedNumeric`] when any strictly-coerced
/// attribute is present but unreadable.
pub fn score_diabetes(record: &AttributeRecord) -> Result<RiskAssessment, RiskError> {
    let input = DiabetesInput::from_record(record)?;
    Ok(SCORER.evaluate(&input).assessment())
}
