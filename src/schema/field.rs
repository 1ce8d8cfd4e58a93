//! Field value objects and per-field coercion rules

use crate::error::SchemaError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Type-safe field values produced by coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
    Text(String),
}

impl FieldValue {
    /// Get the text value (None for non-text fields)
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Raw form of this value, as a renderer would submit it back
    pub fn to_raw(&self) -> Value {
        match self {
            FieldValue::Bool(b) => Value::Bool(*b),
            FieldValue::Integer(n) => Value::from(*n),
            FieldValue::Text(s) => Value::String(s.clone()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

/// Target type of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Integer,
    Boolean,
}

impl FieldKind {
    /// Convert a raw submitted value to this kind
    pub fn coerce(&self, raw: &Value) -> Option<FieldValue> {
        match self {
            FieldKind::Text => raw.as_str().map(|s| FieldValue::Text(s.to_string())),
            FieldKind::Integer => coerce_integer(raw).map(FieldValue::Integer),
            FieldKind::Boolean => coerce_bool(raw).map(FieldValue::Bool),
        }
    }

    /// Whether an already typed value belongs to this kind
    pub fn matches(&self, value: &FieldValue) -> bool {
        matches!(
            (self, value),
            (FieldKind::Text, FieldValue::Text(_))
                | (FieldKind::Integer, FieldValue::Integer(_))
                | (FieldKind::Boolean, FieldValue::Bool(_))
        )
    }
}

fn coerce_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64().or_else(|| {
            let f = n.as_f64()?;
            // Truncate toward zero, rejecting anything an i64 cannot hold
            let t = f.trunc();
            (t.is_finite() && t >= i64::MIN as f64 && t < i64::MAX as f64).then_some(t as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn coerce_bool(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

/// Predicate applied after successful coercion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    /// Inclusive integer range
    Range { min: i64, max: i64 },
    /// Exact, case-sensitive membership
    OneOf { options: Vec<String> },
}

impl Constraint {
    pub fn one_of(options: &[&str]) -> Self {
        Constraint::OneOf {
            options: options.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn allows(&self, value: &FieldValue) -> bool {
        match (self, value) {
            (Constraint::Range { min, max }, FieldValue::Integer(n)) => (*min..=*max).contains(n),
            (Constraint::OneOf { options }, FieldValue::Text(s)) => options.iter().any(|o| o == s),
            _ => false,
        }
    }
}

/// Declarative description of one configurable field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSpec {
    pub name: String,
    pub required: bool,
    pub kind: FieldKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<FieldValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraint: Option<Constraint>,
}

impl FieldSpec {
    /// Create a required field
    pub fn required(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            required: true,
            kind,
            default: None,
            constraint: None,
        }
    }

    /// Create an optional field without a default
    pub fn optional(name: &str, kind: FieldKind) -> Self {
        Self {
            required: false,
            ..Self::required(name, kind)
        }
    }

    pub fn with_default(mut self, default: impl Into<FieldValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_constraint(mut self, constraint: Constraint) -> Self {
        self.constraint = Some(constraint);
        self
    }

    /// Whether a typed value is acceptable for this field
    pub fn accepts(&self, value: &FieldValue) -> bool {
        self.kind.matches(value) && self.constraint.as_ref().map_or(true, |c| c.allows(value))
    }

    /// Coerce a raw value, then check the constraint
    pub fn coerce(&self, raw: &Value) -> Result<FieldValue, SchemaError> {
        let value = self
            .kind
            .coerce(raw)
            .ok_or_else(|| SchemaError::invalid(&self.name))?;

        match &self.constraint {
            Some(constraint) if !constraint.allows(&value) => Err(SchemaError::invalid(&self.name)),
            _ => Ok(value),
        }
    }
}
