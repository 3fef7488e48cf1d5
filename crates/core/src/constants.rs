//! Centralized scoring constants
//!
//! Single source of truth for the probability cap, label thresholds,
//! normalization divisors and the field defaults used when a record leaves
//! a strictly-coerced attribute out. Weight tables live next to their
//! scorers; everything shared between scorers lives here.

/// Probability normalization and labelling
pub mod probability {
    /// Upper bound applied after normalization
    pub const CAP: f64 = 0.9;

    /// Strictly above this is "High"
    pub const HIGH_THRESHOLD: f64 = 0.7;

    /// Strictly above this (and not High) is "Moderate"
    pub const MODERATE_THRESHOLD: f64 = 0.3;
}

/// Normalization divisors (maximum theoretical accumulated score)
pub mod divisors {
    pub const CHD: f64 = 11.5;
    pub const STROKE: f64 = 7.7;
    pub const DIABETES: f64 = 10.4;
}

/// Defaults for stroke attributes that are strictly coerced
pub mod stroke_defaults {
    /// mg/dL
    pub const AVG_GLUCOSE_LEVEL: f64 = 100.0;
    pub const BMI: f64 = 25.0;
}

/// Defaults for diabetes attributes that are strictly coerced
pub mod diabetes_defaults {
    pub const BMI: f64 = 25.0;

    /// Systolic / diastolic blood pressure (mmHg)
    pub const SBP: i64 = 120;
    pub const DBP: i64 = 80;

    /// Fasting plasma glucose (mg/dL)
    pub const FPG: f64 = 100.0;

    /// Lipid panel (mg/dL)
    pub const CHOL: i64 = 200;
    pub const HDL: i64 = 50;
    pub const LDL: i64 = 130;

    /// Blood urea nitrogen (mg/dL)
    pub const BUN: i64 = 15;

    /// Creatinine clearance (mL/min)
    pub const CCR: i64 = 90;

    /// Final-visit fasting plasma glucose (mg/dL)
    pub const FFPG: f64 = 95.0;
}
