//! Comment domain model.
//!
//! # Invariants
//! - `article_id` references an existing article once persisted; the store
//!   enforces this with a foreign key.
//! - `article_id == 0` means no article reference was supplied.

use super::article::ArticleId;
use super::{stamp_timestamp, ModelValidationError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned comment identifier.
pub type CommentId = i64;

/// Persisted comment attached to one article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub article_id: ArticleId,
    pub author: String,
    pub content: String,
    pub creation_timestamp: DateTime<Utc>,
}

/// Write-side comment draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewComment {
    /// Defaults to `0` (absent) so HTTP callers can supply it via the path.
    #[serde(default)]
    pub article_id: ArticleId,
    pub author: String,
    pub content: String,
    #[serde(default)]
    pub creation_timestamp: Option<DateTime<Utc>>,
}

impl NewComment {
    pub fn new(
        article_id: ArticleId,
        author: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            article_id,
            author: author.into(),
            content: content.into(),
            creation_timestamp: None,
        }
    }

    /// Returns whether an article reference was supplied at all.
    pub fn has_article_reference(&self) -> bool {
        self.article_id != 0
    }

    /// Sets `creation_timestamp` to `now` when it is absent or a zero value.
    pub fn stamp_if_missing(&mut self, now: DateTime<Utc>) {
        stamp_timestamp(&mut self.creation_timestamp, now);
    }

    /// Checks write preconditions.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.creation_timestamp.is_none() {
            return Err(ModelValidationError::MissingCreationTimestamp);
        }
        Ok(())
    }
}
