//! Submission validators
//!
//! The flow calls a [`Validator`] once per submission that passed the field
//! schema. Implementations may suspend on a reachability or credential check.

mod places;
mod traits;

pub use places::PlacesValidator;
pub use traits::Validator;

#[cfg(test)]
pub use traits::MockValidator;

use crate::error::ErrorKind;
use crate::schema::NormalizedValues;
use serde::Serialize;

/// Outcome of the semantic check
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ValidationResult {
    Success {
        record: NormalizedValues,
        title: String,
    },
    Failure {
        kind: ErrorKind,
        field: Option<String>,
    },
}

impl ValidationResult {
    /// Target is unreachable, optionally blaming one field
    pub fn cannot_connect(field: Option<&str>) -> Self {
        Self::Failure {
            kind: ErrorKind::CannotConnect,
            field: field.map(str::to_string),
        }
    }

    /// Identifier held by `field` is malformed or unusable
    pub fn invalid_host(field: &str) -> Self {
        Self::Failure {
            kind: ErrorKind::InvalidHost,
            field: Some(field.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}
