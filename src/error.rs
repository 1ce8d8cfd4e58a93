//! Error taxonomy shared by the schema, the validators and the flow

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error slot used when no single field is responsible
pub const BASE_ERROR_KEY: &str = "base";

/// Closed set of errors a submission can produce
///
/// Each kind renders as an opaque display code which the presentation layer
/// is free to localize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    #[error("missing_required")]
    MissingRequired,
    #[error("invalid_value")]
    InvalidValue,
    #[error("cannot_connect")]
    CannotConnect,
    #[error("invalid_host")]
    InvalidHost,
    #[error("unknown")]
    Unknown,
}

impl ErrorKind {
    /// Display code handed to the form renderer
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingRequired => "missing_required",
            Self::InvalidValue => "invalid_value",
            Self::CannotConnect => "cannot_connect",
            Self::InvalidHost => "invalid_host",
            Self::Unknown => "unknown",
        }
    }
}

/// A submission rejected by the field schema, always attributed to one field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} for field '{field}'")]
pub struct SchemaError {
    pub kind: ErrorKind,
    pub field: String,
}

impl SchemaError {
    pub fn missing(field: &str) -> Self {
        Self {
            kind: ErrorKind::MissingRequired,
            field: field.to_string(),
        }
    }

    pub fn invalid(field: &str) -> Self {
        Self {
            kind: ErrorKind::InvalidValue,
            field: field.to_string(),
        }
    }
}

/// A schema table that breaks its own invariants
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaDefinitionError {
    #[error("field '{0}' is declared more than once")]
    DuplicateField(String),
    #[error("required field '{0}' must not declare a default")]
    RequiredWithDefault(String),
    #[error("default of field '{0}' does not match its type or constraint")]
    InvalidDefault(String),
}

/// Misuse of a flow by its host
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("flow already completed; start a new flow to create another entry")]
    AlreadyCompleted,
}
