//! HTTP use-case API over the article and comment services.
//!
//! # Responsibility
//! - Parse path/body input and invoke services.
//! - Map service error kinds to status codes.
//!
//! # Invariants
//! - Handlers never panic; every failure becomes an `ErrorResponse`.
//! - Blocking store work runs on the blocking thread pool.
//! - Error detail is logged, never returned to the client.

use crate::response::ErrorResponse;
use articles_core::{
    ArticleId, ArticleRepository, ArticleService, CommentRepository, CommentService, ErrorKind,
    NewArticle, NewComment, ServiceError, ServiceResult, SqliteRepository,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::{error, info, warn};
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use tokio::task::JoinError;

pub const ARTICLES_PATH: &str = "/v1/articles";
pub const ARTICLE_PATH: &str = "/v1/articles/{id}";
pub const COMMENTS_PATH: &str = "/v1/articles/{id}/comments";

/// Storage the HTTP state can be built on: both capability traits, shareable
/// across request tasks.
pub trait AppRepository: ArticleRepository + CommentRepository + Send + Sync + 'static {}

impl<R> AppRepository for R where
    R: ArticleRepository + CommentRepository + Send + Sync + 'static
{
}

/// Services shared by every in-flight request.
pub struct AppState<R: AppRepository = SqliteRepository> {
    articles: Arc<ArticleService<R>>,
    comments: Arc<CommentService<R>>,
}

impl<R: AppRepository> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            articles: Arc::clone(&self.articles),
            comments: Arc::clone(&self.comments),
        }
    }
}

impl<R: AppRepository> AppState<R> {
    pub fn new(articles: ArticleService<R>, comments: CommentService<R>) -> Self {
        Self {
            articles: Arc::new(articles),
            comments: Arc::new(comments),
        }
    }
}

impl<R: AppRepository + Clone> AppState<R> {
    /// Wires both services onto one repository.
    pub fn from_repository(repo: R) -> Self {
        Self::new(ArticleService::new(repo.clone()), CommentService::new(repo))
    }
}

/// Builds the versioned article/comment router.
pub fn router<R: AppRepository>(state: AppState<R>) -> Router {
    Router::new()
        .route(ARTICLES_PATH, get(get_articles::<R>).post(create_article::<R>))
        .route(ARTICLE_PATH, get(get_article_by_id::<R>))
        .route(
            COMMENTS_PATH,
            get(get_comments_for_article::<R>).post(create_comment::<R>),
        )
        .with_state(state)
}

pub async fn get_article_by_id<R: AppRepository>(
    State(state): State<AppState<R>>,
    Path(id_param): Path<String>,
) -> Response {
    let Some(id) = parse_article_id(&id_param) else {
        warn!("event=get_article module=http status=rejected reason=invalid_id id={id_param}");
        return ErrorResponse::invalid_article_id().into_response();
    };

    let articles = Arc::clone(&state.articles);
    match run_blocking(move || articles.get_article_by_id(id)).await {
        Ok(article) => (StatusCode::OK, Json(article)).into_response(),
        Err(err) if err.kind() == ErrorKind::NoArticleFound => {
            info!("event=get_article module=http status=not_found id={id}");
            ErrorResponse::article_not_found(&id_param).into_response()
        }
        Err(err) => {
            error!("event=get_article module=http status=error id={id} error={err}");
            ErrorResponse::article_by_id_error(&id_param).into_response()
        }
    }
}

pub async fn get_articles<R: AppRepository>(State(state): State<AppState<R>>) -> Response {
    let articles = Arc::clone(&state.articles);
    match run_blocking(move || articles.get_articles()).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(err) => {
            error!("event=list_articles module=http status=error error={err}");
            ErrorResponse::article_get_all_error().into_response()
        }
    }
}

pub async fn create_article<R: AppRepository>(
    State(state): State<AppState<R>>,
    payload: Result<Json<NewArticle>, JsonRejection>,
) -> Response {
    let Json(draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("event=create_article module=http status=rejected error={rejection}");
            return ErrorResponse::article_binding_error().into_response();
        }
    };

    let articles = Arc::clone(&state.articles);
    match run_blocking(move || articles.create_article(draft)).await {
        Ok(article) => {
            info!(
                "event=create_article module=http status=ok id={}",
                article.id
            );
            (StatusCode::CREATED, Json(article)).into_response()
        }
        Err(err) => {
            error!("event=create_article module=http status=error error={err}");
            ErrorResponse::article_creation_error().into_response()
        }
    }
}

pub async fn create_comment<R: AppRepository>(
    State(state): State<AppState<R>>,
    Path(id_param): Path<String>,
    payload: Result<Json<NewComment>, JsonRejection>,
) -> Response {
    let Some(article_id) = parse_article_id(&id_param) else {
        warn!("event=create_comment module=http status=rejected reason=invalid_id id={id_param}");
        return ErrorResponse::invalid_article_id().into_response();
    };
    let Json(mut draft) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("event=create_comment module=http status=rejected error={rejection}");
            return ErrorResponse::comment_binding_error().into_response();
        }
    };
    draft.article_id = article_id;

    let comments = Arc::clone(&state.comments);
    match run_blocking(move || comments.create_comment(draft)).await {
        Ok(comment) => {
            info!(
                "event=create_comment module=http status=ok id={} article_id={}",
                comment.id, comment.article_id
            );
            (StatusCode::CREATED, Json(comment)).into_response()
        }
        Err(err) if err.kind() == ErrorKind::MissingArticleReference => {
            warn!(
                "event=create_comment module=http status=rejected reason=missing_article article_id={article_id}"
            );
            ErrorResponse::comment_invalid_article_id().into_response()
        }
        Err(err) => {
            error!("event=create_comment module=http status=error error={err}");
            ErrorResponse::comment_creation_error().into_response()
        }
    }
}

pub async fn get_comments_for_article<R: AppRepository>(
    State(state): State<AppState<R>>,
    Path(id_param): Path<String>,
) -> Response {
    let Some(article_id) = parse_article_id(&id_param) else {
        warn!("event=list_comments module=http status=rejected reason=invalid_id id={id_param}");
        return ErrorResponse::invalid_article_id().into_response();
    };

    let comments = Arc::clone(&state.comments);
    match run_blocking(move || comments.get_comments_by_article_id(article_id)).await {
        Ok(list) => (StatusCode::OK, Json(list)).into_response(),
        Err(err) => {
            error!(
                "event=list_comments module=http status=error article_id={article_id} error={err}"
            );
            ErrorResponse::comment_get_all_error(&id_param).into_response()
        }
    }
}

/// Failure of a service call executed off the async runtime.
#[derive(Debug)]
enum HandlerError {
    Service(ServiceError),
    Join(JoinError),
}

impl HandlerError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Service(err) => err.kind(),
            Self::Join(_) => ErrorKind::Internal,
        }
    }
}

impl Display for HandlerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Service(err) => write!(f, "{err}"),
            Self::Join(err) => write!(f, "blocking task failed: {err}"),
        }
    }
}

async fn run_blocking<T, F>(task: F) -> Result<T, HandlerError>
where
    T: Send + 'static,
    F: FnOnce() -> ServiceResult<T> + Send + 'static,
{
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result.map_err(HandlerError::Service),
        Err(err) => Err(HandlerError::Join(err)),
    }
}

fn parse_article_id(raw: &str) -> Option<ArticleId> {
    raw.trim().parse::<ArticleId>().ok()
}
