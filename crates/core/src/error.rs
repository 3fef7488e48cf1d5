//! Scoring error taxonomy
//!
//! Missing attributes are never errors; they fall back to per-field defaults.
//! What does fail is a strictly-coerced attribute that cannot be read as a
//! number, or a record that is not a key/value object at all.

use std::fmt;

use thiserror::Error;

/// Numeric shape a strictly-coerced attribute must have
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericKind {
    /// Any decimal number
    Float,
    /// Whole number; JSON floats are truncated toward zero
    Integer,
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericKind::Float => f.write_str("a decimal number"),
            NumericKind::Integer => f.write_str("an integer"),
        }
    }
}

/// Errors raised while turning a record into a risk result
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RiskError {
    #[error("field `{field}` must be {expected}, got {value}")]
    MalformedNumeric {
        field: &'static str,
        value: String,
        expected: NumericKind,
    },

    #[error("attribute record must be a JSON object, got {found}")]
    InvalidRecord { found: &'static str },

    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}

impl RiskError {
    pub fn malformed(field: &'static str, value: &serde_json::Value, expected: NumericKind) -> Self {
        Self::MalformedNumeric {
            field,
            value: value.to_string(),
            expected,
        }
    }

    /// Stable machine-readable code for API clients
    pub fn code(&self) -> &'static str {
        match self {
            RiskError::MalformedNumeric { .. } => "malformed_numeric",
            RiskError::InvalidRecord { .. } => "invalid_record",
            RiskError::UnknownCondition(_) => "unknown_condition",
        }
    }

    /// Offending attribute, when there is one
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RiskError::MalformedNumeric { field, .. } => Some(*field),
            _ => None,
        }
    }
}
