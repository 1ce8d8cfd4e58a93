//! Single-step setup flow
//!
//! ```text
//! AwaitingInput --submit--> Validating --ok--> Completed
//!       ^                       |
//!       +------ form errors ----+
//! ```
//!
//! A flow owns its [`FormState`] and nothing else. Calls to
//! [`ConfigFlow::submit`] are serialized by the host.

use super::form_state::{FormState, FormView};
use crate::error::{ErrorKind, FlowError, SchemaDefinitionError, BASE_ERROR_KEY};
use crate::schema::places::{places_schema, STEP_ID};
use crate::schema::{NormalizedValues, Schema, SubmittedValues};
use crate::validator::{PlacesValidator, ValidationResult, Validator};
use futures::FutureExt;
use serde::Serialize;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

/// Current position in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowStep {
    #[default]
    AwaitingInput,
    Validating,
    Completed,
}

/// Configuration produced by a completed flow, handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigEntry {
    pub title: String,
    pub data: NormalizedValues,
}

/// What the host should do after a submission
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FlowOutcome {
    /// Display (or redisplay) the form
    ShowForm(FormView),
    /// Persist the entry; the flow is finished
    CreateEntry(ConfigEntry),
}

impl FlowOutcome {
    pub fn as_form(&self) -> Option<&FormView> {
        match self {
            FlowOutcome::ShowForm(view) => Some(view),
            FlowOutcome::CreateEntry(_) => None,
        }
    }

    pub fn as_entry(&self) -> Option<&ConfigEntry> {
        match self {
            FlowOutcome::CreateEntry(entry) => Some(entry),
            FlowOutcome::ShowForm(_) => None,
        }
    }
}

/// Drives one user's setup from first display to a created entry
pub struct ConfigFlow {
    schema: Schema,
    validator: Arc<dyn Validator>,
    step_id: String,
    step: FlowStep,
    form: FormState,
}

impl ConfigFlow {
    /// Create a flow over any schema and validator
    pub fn new(schema: Schema, validator: Arc<dyn Validator>) -> Self {
        Self {
            schema,
            validator,
            step_id: STEP_ID.to_string(),
            step: FlowStep::default(),
            form: FormState::default(),
        }
    }

    /// Create the stock places flow
    pub fn places() -> Result<Self, SchemaDefinitionError> {
        Ok(Self::new(places_schema()?, Arc::new(PlacesValidator::new())))
    }

    pub fn with_step_id(mut self, step_id: &str) -> Self {
        self.step_id = step_id.to_string();
        self
    }

    pub fn step(&self) -> FlowStep {
        self.step
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn form_state(&self) -> &FormState {
        &self.form
    }

    /// Handle one interaction
    ///
    /// `None` means the form has not been filled in yet and yields the first
    /// display. A submission is checked by the schema first; only a
    /// schema-valid submission reaches the validator.
    pub async fn submit(
        &mut self,
        values: Option<SubmittedValues>,
    ) -> Result<FlowOutcome, FlowError> {
        if self.step == FlowStep::Completed {
            return Err(FlowError::AlreadyCompleted);
        }

        let Some(values) = values else {
            self.form = FormState::default();
            return Ok(self.show_form());
        };

        self.step = FlowStep::Validating;

        let normalized = match self.schema.validate(&values) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::debug!("Submission rejected by schema: {e}");
                return Ok(self.reject(FormState::with_error(&e.field, e.kind, values)));
            }
        };

        match self.run_validator(normalized).await {
            ValidationResult::Success { record, title } => {
                tracing::info!("Setup complete, creating entry {title:?}");
                self.step = FlowStep::Completed;
                self.form = FormState::default();
                Ok(FlowOutcome::CreateEntry(ConfigEntry {
                    title,
                    data: record,
                }))
            }
            ValidationResult::Failure { kind, field } => {
                let key = match (kind, field.as_deref()) {
                    (ErrorKind::Unknown, _) | (_, None) => BASE_ERROR_KEY,
                    (_, Some(field)) => field,
                };
                tracing::debug!("Validation failed: {kind} on {key}");
                Ok(self.reject(FormState::with_error(key, kind, values)))
            }
        }
    }

    /// Run the validator, turning faults and panics into `unknown`
    ///
    /// Runs on the caller's executor; no particular runtime is required.
    async fn run_validator(&self, normalized: NormalizedValues) -> ValidationResult {
        let unknown = ValidationResult::Failure {
            kind: ErrorKind::Unknown,
            field: None,
        };

        let call = AssertUnwindSafe(self.validator.validate(&normalized)).catch_unwind();
        match call.await {
            Ok(Ok(result)) => result,
            Ok(Err(e)) => {
                tracing::error!("Unexpected exception during validation: {e:?}");
                unknown
            }
            Err(_) => {
                tracing::error!("Validator panicked");
                unknown
            }
        }
    }

    fn reject(&mut self, form: FormState) -> FlowOutcome {
        self.form = form;
        self.show_form()
    }

    fn show_form(&mut self) -> FlowOutcome {
        self.step = FlowStep::AwaitingInput;
        FlowOutcome::ShowForm(self.form.render(&self.step_id, &self.schema))
    }
}
