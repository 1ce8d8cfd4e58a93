//! Trait abstraction for the submission check to enable mocking in tests

use super::ValidationResult;
use crate::schema::NormalizedValues;
use anyhow::Result;
use async_trait::async_trait;

/// Semantic check run on a submission that already passed the schema
///
/// Expected failures come back as [`ValidationResult::Failure`]. An `Err` is an
/// unexpected fault; the flow downgrades it to `unknown` instead of aborting.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Validator: Send + Sync {
    /// Check that the normalized configuration is usable
    async fn validate(&self, input: &NormalizedValues) -> Result<ValidationResult>;
}
