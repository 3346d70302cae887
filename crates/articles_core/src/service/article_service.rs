//! Article use-case service.
//!
//! # Responsibility
//! - Provide article read/create entry points for the HTTP boundary.
//! - Translate the repository's `NotFound` into `NoArticleFound`.
//!
//! # Invariants
//! - Articles reaching the repository always carry a creation timestamp.
//! - Service layer remains storage-agnostic.

use crate::model::article::{Article, ArticleId, NewArticle};
use crate::repo::article_repo::ArticleRepository;
use crate::repo::RepoError;
use crate::service::error::{ServiceError, ServiceResult};
use chrono::Utc;

/// Use-case service over any article repository implementation.
pub struct ArticleService<R: ArticleRepository> {
    repo: R,
}

impl<R: ArticleRepository> ArticleService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Gets one article by id.
    ///
    /// # Errors
    /// - `NoArticleFound` when no row has this id.
    /// - `Repo` for any other persistence failure.
    pub fn get_article_by_id(&self, id: ArticleId) -> ServiceResult<Article> {
        self.repo.get_article_by_id(id).map_err(|err| match err {
            RepoError::NotFound(_) => ServiceError::NoArticleFound,
            other => ServiceError::Repo(other),
        })
    }

    /// Lists all articles.
    pub fn get_articles(&self) -> ServiceResult<Vec<Article>> {
        Ok(self.repo.get_articles()?)
    }

    /// Creates an article, stamping the current time when none was supplied.
    pub fn create_article(&self, mut article: NewArticle) -> ServiceResult<Article> {
        article.stamp_if_missing(Utc::now());
        Ok(self.repo.create_article(&article)?)
    }
}

#[cfg(test)]
mod tests {
    use super::ArticleService;
    use crate::db::DbError;
    use crate::model::article::{Article, ArticleId, NewArticle};
    use crate::repo::article_repo::ArticleRepository;
    use crate::repo::{RepoError, RepoResult};
    use crate::service::error::ErrorKind;
    use chrono::{TimeZone, Utc};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingRepo {
        created: RefCell<Vec<NewArticle>>,
        fail_reads: bool,
    }

    impl ArticleRepository for RecordingRepo {
        fn get_article_by_id(&self, id: ArticleId) -> RepoResult<Article> {
            if self.fail_reads {
                return Err(RepoError::Db(DbError::Sqlite(
                    rusqlite::Error::InvalidQuery,
                )));
            }
            Err(RepoError::NotFound(id))
        }

        fn get_articles(&self) -> RepoResult<Vec<Article>> {
            Ok(Vec::new())
        }

        fn create_article(&self, article: &NewArticle) -> RepoResult<Article> {
            article.validate()?;
            self.created.borrow_mut().push(article.clone());
            Ok(Article {
                id: self.created.borrow().len() as ArticleId,
                title: article.title.clone(),
                content: article.content.clone(),
                creation_timestamp: article.creation_timestamp.unwrap_or_default(),
            })
        }
    }

    #[test]
    fn not_found_maps_to_no_article_found() {
        let service = ArticleService::new(RecordingRepo::default());
        let err = service.get_article_by_id(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoArticleFound);
    }

    #[test]
    fn other_read_failures_stay_internal() {
        let service = ArticleService::new(RecordingRepo {
            fail_reads: true,
            ..RecordingRepo::default()
        });
        let err = service.get_article_by_id(7).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
    }

    #[test]
    fn create_stamps_missing_timestamp() {
        let before = Utc::now();
        let service = ArticleService::new(RecordingRepo::default());
        let created = service
            .create_article(NewArticle::new("title", "content"))
            .unwrap();
        assert!(created.creation_timestamp >= before);
        assert!(created.creation_timestamp <= Utc::now());
    }

    #[test]
    fn create_keeps_caller_timestamp() {
        let provided = Utc.with_ymd_and_hms(2020, 1, 2, 3, 4, 5).unwrap();
        let mut draft = NewArticle::new("title", "content");
        draft.creation_timestamp = Some(provided);

        let service = ArticleService::new(RecordingRepo::default());
        let created = service.create_article(draft).unwrap();
        assert_eq!(created.creation_timestamp, provided);
    }

    #[test]
    fn create_replaces_zero_timestamp_from_json() {
        let draft: NewArticle = serde_json::from_str(
            r#"{"title":"t","content":"c","creation_timestamp":"0001-01-01T00:00:00Z"}"#,
        )
        .unwrap();
        let before = Utc::now();

        let service = ArticleService::new(RecordingRepo::default());
        let created = service.create_article(draft).unwrap();
        assert!(created.creation_timestamp >= before);
    }
}
