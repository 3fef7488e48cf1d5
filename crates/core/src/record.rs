//! Attribute Records
//!
//! A record is the loosely-typed key/value body a client posts: numbers,
//! numeric strings and "0"/"1" flag strings mixed freely. Scorers never read
//! it directly; each condition converts it once into a typed input through
//! the accessors here, which encode the four ways an attribute can be read:
//!
//! - lenient numeric: unreadable values are treated as absent
//! - strict float / strict integer: unreadable values are an error
//! - flag: only the exact string `"1"` is set
//! - text: exact string comparison

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{NumericKind, RiskError};

/// A named attribute plus the alternate keys clients post it under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Field {
    pub const fn new(name: &'static str) -> Self {
        Self { name, aliases: &[] }
    }

    pub const fn with_aliases(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }
}

/// Binary indicator posted as a `"1"` / `"0"` string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Flag {
    Set,
    #[default]
    Unset,
}

impl Flag {
    /// Only the string `"1"` sets a flag. Numbers, booleans and other
    /// strings (including `"2"` for multi-level attributes) leave it unset.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s == "1" => Flag::Set,
            _ => Flag::Unset,
        }
    }

    pub fn is_set(self) -> bool {
        matches!(self, Flag::Set)
    }
}

/// Loosely-typed key/value record submitted for scoring
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeRecord(Map<String, Value>);

impl AttributeRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept any JSON value, rejecting everything but objects
    pub fn from_value(value: Value) -> Result<Self, RiskError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(RiskError::InvalidRecord {
                found: json_kind(&other),
            }),
        }
    }

    /// Builder-style insert, mostly for tests and fixtures
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value, canonical key first then aliases in order
    pub fn get(&self, field: &Field) -> Option<&Value> {
        self.0
            .get(field.name)
            .or_else(|| field.aliases.iter().find_map(|alias| self.0.get(*alias)))
    }

    /// Lenient numeric read. Missing or unreadable values are `None`, so a
    /// threshold check against them simply does not fire.
    pub fn number(&self, field: &Field) -> Option<f64> {
        match self.get(field)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Strict decimal read with a default for missing keys
    pub fn float_or(&self, field: &Field, default: f64) -> Result<f64, RiskError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };

        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| RiskError::malformed(field.name, value, NumericKind::Float))
    }

    /// Strict integer read with a default for missing keys.
    ///
    /// JSON floats truncate toward zero; strings must be whole numbers.
    pub fn integer_or(&self, field: &Field, default: i64) -> Result<i64, RiskError> {
        let Some(value) = self.get(field) else {
            return Ok(default);
        };

        let parsed = match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.trunc() as i64)
            }),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };

        parsed.ok_or_else(|| RiskError::malformed(field.name, value, NumericKind::Integer))
    }

    pub fn flag(&self, field: &Field) -> Flag {
        Flag::from_value(self.get(field))
    }

    /// String attribute, `None` when missing or not a string
    pub fn text(&self, field: &Field) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for AttributeRecord {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for AttributeRecord {
    type Error = RiskError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for AttributeRecord {
    fn from_iter<T: IntoIterator<Item = (K, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
