//! Article domain model.
//!
//! # Invariants
//! - `id` is store-assigned; callers never choose it.
//! - `creation_timestamp` is always present on a persisted article.

use super::{stamp_timestamp, ModelValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned article identifier.
pub type ArticleId = i64;

/// Persisted article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    pub title: String,
    pub content: String,
    pub creation_timestamp: DateTime<Utc>,
}

/// Write-side article draft.
///
/// `creation_timestamp` may be omitted or zero; the service stamps the
/// current time before persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            creation_timestamp: None,
        }
    }

    /// Sets `creation_timestamp` to `now` when it is absent or a zero value.
    pub fn stamp_if_missing(&mut self, now: DateTime<Utc>) {
        stamp_timestamp(&mut self.creation_timestamp, now);
    }

    /// Checks write preconditions.
    ///
    /// # Errors
    /// - `MissingCreationTimestamp` when the draft was never stamped.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.creation_timestamp.is_none() {
            return Err(ModelValidationError::MissingCreationTimestamp);
        }
        Ok(())
    }
}
