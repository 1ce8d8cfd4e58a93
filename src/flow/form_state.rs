//! Form state carried between submissions and the views handed to the renderer

use crate::error::{ErrorKind, BASE_ERROR_KEY};
use crate::schema::{Schema, SubmittedValues};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Errors from the last attempt plus the input that produced them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub errors: BTreeMap<String, ErrorKind>,
    pub user_input: Option<SubmittedValues>,
}

impl FormState {
    /// State after a failed attempt, with one error attached to `key`
    pub fn with_error(key: &str, kind: ErrorKind, user_input: SubmittedValues) -> Self {
        Self {
            errors: BTreeMap::from([(key.to_string(), kind)]),
            user_input: Some(user_input),
        }
    }

    /// State after a failed attempt that no single field is responsible for
    pub fn with_base_error(kind: ErrorKind, user_input: SubmittedValues) -> Self {
        Self::with_error(BASE_ERROR_KEY, kind, user_input)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn error(&self, key: &str) -> Option<ErrorKind> {
        self.errors.get(key).copied()
    }

    /// Display codes keyed by field name or `base`
    pub fn error_codes(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(key, kind)| (key.clone(), kind.code().to_string()))
            .collect()
    }

    /// Value to prefill per field: prior input first, then the declared default
    pub fn suggested_values(&self, schema: &Schema) -> BTreeMap<String, Value> {
        let mut values: BTreeMap<String, Value> = schema
            .defaults()
            .into_iter()
            .map(|(name, value)| (name, value.to_raw()))
            .collect();

        if let Some(input) = &self.user_input {
            for (name, raw) in input.iter().filter(|(_, raw)| !raw.is_null()) {
                values.insert(name.clone(), raw.clone());
            }
        }
        values
    }

    /// Build the view for the presentation layer
    pub fn render(&self, step_id: &str, schema: &Schema) -> FormView {
        FormView {
            step_id: step_id.to_string(),
            schema: schema.clone(),
            errors: self.error_codes(),
            suggested_values: self.suggested_values(schema),
        }
    }
}

/// Everything a renderer needs to (re)display the form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormView {
    pub step_id: String,
    pub schema: Schema,
    pub errors: BTreeMap<String, String>,
    pub suggested_values: BTreeMap<String, Value>,
}
