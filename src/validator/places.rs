//! Stock validator for the places flow

use super::{ValidationResult, Validator};
use crate::schema::places::CONF_NAME;
use crate::schema::NormalizedValues;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

/// Accepts any schema-valid submission and titles the entry after its name
///
/// There is no remote service to reach, so this never reports
/// `cannot_connect` or `invalid_host`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlacesValidator;

impl PlacesValidator {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Validator for PlacesValidator {
    async fn validate(&self, input: &NormalizedValues) -> Result<ValidationResult> {
        let title = input
            .get(CONF_NAME)
            .and_then(|v| v.as_text())
            .ok_or_else(|| anyhow!("Submission has no text '{}' field", CONF_NAME))?
            .to_string();

        tracing::debug!("Validated places submission titled {title:?}");

        Ok(ValidationResult::Success {
            record: input.clone(),
            title,
        })
    }
}
