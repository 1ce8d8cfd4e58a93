//! Places setup - schema-driven setup flow for the places integration
//!
//! A [`ConfigFlow`] collects one form submission at a time, normalizes it
//! against a [`Schema`], runs an async [`Validator`] and either yields a
//! [`ConfigEntry`] or a form view annotated with per-field error codes.

pub mod config;
pub mod error;
pub mod flow;
pub mod schema;
pub mod store;
pub mod validator;

pub use error::{ErrorKind, FlowError, SchemaDefinitionError, SchemaError, BASE_ERROR_KEY};
pub use flow::{ConfigEntry, ConfigFlow, FlowOutcome, FlowStep, FormState, FormView};
pub use schema::{FieldSpec, NormalizedValues, Schema, SubmittedValues};
pub use validator::{PlacesValidator, ValidationResult, Validator};
