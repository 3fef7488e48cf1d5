//! Coronary heart disease scorer
//!
//! Framingham-style attributes. Every numeric attribute is read leniently:
//! a missing or unreadable value is absent and its threshold checks do not
//! fire, so this scorer never rejects a record.

use serde::Serialize;

use super::{ConditionInput, Rule, Tier, WeightedRuleScorer};
use crate::assessment::RiskAssessment;
use crate::condition::Condition;
use crate::constants::divisors;
use crate::error::RiskError;
use crate::record::{AttributeRecord, Field, Flag};

const AGE: Field = Field::new("age");
const MALE: Field = Field::new("male");
const EDUCATION: Field = Field::new("education");
const CURRENT_SMOKER: Field = Field::new("currentSmoker");
const CIGS_PER_DAY: Field = Field::new("cigsPerDay");
const BP_MEDS: Field = Field::with_aliases("bpMeds", &["BPMeds"]);
const PREVALENT_STROKE: Field = Field::new("prevalentStroke");
const PREVALENT_HYP: Field = Field::new("prevalentHyp");
const DIABETES: Field = Field::new("diabetes");
const TOT_CHOL: Field = Field::new("totChol");
const SYS_BP: Field = Field::new("sysBP");
const DIA_BP: Field = Field::new("diaBP");
const BMI: Field = Field::with_aliases("bmi", &["BMI"]);
const HEART_RATE: Field = Field::new("heartRate");
const GLUCOSE: Field = Field::new("glucose");

/// Typed CHD attributes
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChdInput {
    pub age: Option<f64>,
    pub male: Flag,
    /// Set for the lowest education level ("1")
    pub education: Flag,
    pub current_smoker: Flag,
    pub cigs_per_day: Option<f64>,
    pub bp_meds: Flag,
    pub prevalent_stroke: Flag,
    pub prevalent_hyp: Flag,
    pub diabetes: Flag,
    pub tot_chol: Option<f64>,
    pub sys_bp: Option<f64>,
    pub dia_bp: Option<f64>,
    pub bmi: Option<f64>,
    pub heart_rate: Option<f64>,
    pub glucose: Option<f64>,
}

impl From<&AttributeRecord> for ChdInput {
    fn from(record: &AttributeRecord) -> Self {
        Self {
            age: record.number(&AGE),
            male: record.flag(&MALE),
            education: record.flag(&EDUCATION),
            current_smoker: record.flag(&CURRENT_SMOKER),
            cigs_per_day: record.number(&CIGS_PER_DAY),
            bp_meds: record.flag(&BP_MEDS),
            prevalent_stroke: record.flag(&PREVALENT_STROKE),
            prevalent_hyp: record.flag(&PREVALENT_HYP),
            diabetes: record.flag(&DIABETES),
            tot_chol: record.number(&TOT_CHOL),
            sys_bp: record.number(&SYS_BP),
            dia_bp: record.number(&DIA_BP),
            bmi: record.number(&BMI),
            heart_rate: record.number(&HEART_RATE),
            glucose: record.number(&GLUCOSE),
        }
    }
}

impl ConditionInput for ChdInput {
    fn from_record(record: &AttributeRecord) -> Result<Self, RiskError> {
        Ok(Self::from(record))
    }
}

fn above(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v > threshold)
}

fn below(value: Option<f64>, threshold: f64) -> bool {
    value.is_some_and(|v| v < threshold)
}

const RULES: &[Rule<ChdInput>] = &[
    Rule {
        factor: "age",
        tiers: &[Tier {
            label: "age > 50",
            weight: 1.0,
            applies: |i: &ChdInput| above(i.age, 50.0),
        }],
    },
    Rule {
        factor: "male",
        tiers: &[Tier {
            label: "male == \"1\"",
            weight: 1.0,
            applies: |i: &ChdInput| i.male.is_set(),
        }],
    },
    Rule {
        factor: "education",
        tiers: &[Tier {
            label: "education == \"1\"",
            weight: 0.5,
            applies: |i: &ChdInput| i.education.is_set(),
        }],
    },
    Rule {
        factor: "current_smoker",
        tiers: &[Tier {
            label: "currentSmoker == \"1\"",
            weight: 1.0,
            applies: |i: &ChdInput| i.current_smoker.is_set(),
        }],
    },
    Rule {
        factor: "heavy_smoker",
        tiers: &[Tier {
            label: "currentSmoker == \"1\" and cigsPerDay > 10",
            weight: 0.5,
            applies: |i: &ChdInput| i.current_smoker.is_set() && above(i.cigs_per_day, 10.0),
        }],
    },
    Rule {
        factor: "bp_meds",
        tiers: &[Tier {
            label: "bpMeds == \"1\"",
            weight: 0.5,
            applies: |i: &ChdInput| i.bp_meds.is_set(),
        }],
    },
    Rule {
        factor: "prevalent_stroke",
        tiers: &[Tier {
            label: "prevalentStroke == \"1\"",
            weight: 1.5,
            applies: |i: &ChdInput| i.prevalent_stroke.is_set(),
        }],
    },
    Rule {
        factor: "prevalent_hyp",
        tiers: &[Tier {
            label: "prevalentHyp == \"1\"",
            weight: 1.0,
            applies: |i: &ChdInput| i.prevalent_hyp.is_set(),
        }],
    },
    Rule {
        factor: "diabetes",
        tiers: &[Tier {
            label: "diabetes == \"1\"",
            weight: 1.5,
            applies: |i: &ChdInput| i.diabetes.is_set(),
        }],
    },
    Rule {
        factor: "total_cholesterol",
        tiers: &[Tier {
            label: "totChol > 240",
            weight: 1.0,
            applies: |i: &ChdInput| above(i.tot_chol, 240.0),
        }],
    },
    Rule {
        factor: "blood_pressure",
        tiers: &[Tier {
            label: "sysBP > 140 or diaBP > 90",
            weight: 1.0,
            applies: |i: &ChdInput| above(i.sys_bp, 140.0) || above(i.dia_bp, 90.0),
        }],
    },
    Rule {
        factor: "bmi",
        tiers: &[Tier {
            label: "bmi > 30",
            weight: 0.5,
            applies: |i: &ChdInput| above(i.bmi, 30.0),
        }],
    },
    Rule {
        factor: "heart_rate",
        tiers: &[Tier {
            label: "heartRate > 100 or heartRate < 60",
            weight: 0.5,
            applies: |i: &ChdInput| above(i.heart_rate, 100.0) || below(i.heart_rate, 60.0),
        }],
    },
    Rule {
        factor: "glucose",
        tiers: &[Tier {
            label: "glucose > 126",
            weight: 1.0,
            applies: |i: &ChdInput| above(i.glucose, 126.0),
        }],
    },
];

pub static SCORER: WeightedRuleScorer<ChdInput> =
    WeightedRuleScorer::new(Condition::Chd, RULES, divisors::CHD);

/// Score a record for coronary heart disease risk. Never fails.
pub fn score_chd(record: &AttributeRecord) -> RiskAssessment {
    SCORER.evaluate(&ChdInput::from(record)).assessment()
}
