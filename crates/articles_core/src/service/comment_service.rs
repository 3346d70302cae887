//! Comment use-case service.
//!
//! # Responsibility
//! - Reject comments without an article reference before any store access.
//! - Present one validation error for bad article references, whether caught
//!   up front or by the store's foreign key.
//!
//! # Invariants
//! - `article_id == 0` never reaches the repository.
//! - Store vocabulary never appears in `ServiceError::MissingArticleReference`.

use crate::model::article::ArticleId;
use crate::model::comment::{Comment, NewComment};
use crate::repo::comment_repo::CommentRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::Utc;
use log::warn;

/// Use-case service over any comment repository implementation.
pub struct CommentService<R: CommentRepository> {
    repo: R,
}

impl<R: CommentRepository> CommentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one comment under an existing article.
    ///
    /// # Errors
    /// - `MissingArticleReference` when `article_id` is zero or unknown to the store.
    /// - `Repo` for any other persistence failure.
    pub fn create_comment(&self, mut comment: NewComment) -> ServiceResult<Comment> {
        if !comment.has_article_reference() {
            return Err(ServiceError::MissingArticleReference);
        }

        comment.stamp_if_missing(Utc::now());
        self.repo.create_comment(&comment).map_err(|err| match err {
            RepoError::ArticleReferenceViolation(article_id) => {
                warn!(
                    "event=comment_create module=service status=rejected reason=unknown_article article_id={} error={}",
                    article_id, err
                );
                ServiceError::MissingArticleReference
            }
            other => ServiceError::Repo(other),
        })
    }

    /// Lists the comments attached to one article.
    pub fn get_comments_by_article_id(
        &self,
        article_id: ArticleId,
    ) -> ServiceResult<Vec<Comment>> {
        Ok(self.repo.get_comments_by_article_id(article_id)?)
    }
}
