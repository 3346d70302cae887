//! Core domain logic for the articles backend.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{open_pool, open_pool_in_memory, DbError, DbPool, DbResult};
pub use logging::{
    default_log_level, init_console_logging, init_logging, logging_status, LogTarget,
};
pub use model::article::{Article, ArticleId, NewArticle};
pub use model::comment::{Comment, CommentId, NewComment};
pub use model::ModelValidationError;
pub use repo::article_repo::ArticleRepository;
pub use repo::comment_repo::CommentRepository;
pub use repo::{RepoError, RepoResult, SqliteRepository};
pub use service::article_service::ArticleService;
pub use service::comment_service::CommentService;
pub use service::error::{
    ErrorKind, ServiceError, ServiceResult, MISSING_ARTICLE_REFERENCE_MESSAGE,
    NO_ARTICLE_FOUND_MESSAGE,
};

