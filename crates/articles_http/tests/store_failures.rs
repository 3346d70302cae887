use articles_core::{
    Article, ArticleId, ArticleRepository, Comment, CommentRepository, DbError, NewArticle,
    NewComment, RepoError, RepoResult,
};
use articles_http::{router, AppState};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

/// Repository whose every call fails the way a broken store would.
#[derive(Clone, Copy)]
struct BrokenStore;

fn store_error() -> RepoError {
    RepoError::Db(DbError::UnsupportedSchemaVersion {
        db_version: 99,
        latest_supported: 2,
    })
}

impl ArticleRepository for BrokenStore {
    fn get_article_by_id(&self, _id: ArticleId) -> RepoResult<Article> {
        Err(store_error())
    }

    fn get_articles(&self) -> RepoResult<Vec<Article>> {
        Err(store_error())
    }

    fn create_article(&self, _article: &NewArticle) -> RepoResult<Article> {
        Err(store_error())
    }
}

impl CommentRepository for BrokenStore {
    fn create_comment(&self, _comment: &NewComment) -> RepoResult<Comment> {
        Err(store_error())
    }

    fn get_comments_by_article_id(&self, _article_id: ArticleId) -> RepoResult<Vec<Comment>> {
        Err(store_error())
    }
}

fn app() -> Router {
    router(AppState::from_repository(BrokenStore))
}

async fn send(method: &str, uri: &str, body: Option<Value>) -> (StatusCode, String) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    let message = body["error"].as_str().unwrap().to_string();
    assert!(!message.contains("schema"), "store detail leaked: {message}");
    (status, message)
}

#[tokio::test]
async fn get_article_store_failure_is_400() {
    let (status, message) = send("GET", "/v1/articles/5", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        message,
        "Encountered an error while getting article by id: 5"
    );
}

#[tokio::test]
async fn list_articles_store_failure_is_500() {
    let (status, message) = send("GET", "/v1/articles", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message, "An error occurred while getting all articles");
}

#[tokio::test]
async fn create_article_store_failure_is_500() {
    let (status, message) = send(
        "POST",
        "/v1/articles",
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message, "An error occurred while creating an article");
}

#[tokio::test]
async fn create_comment_store_failure_is_500() {
    let (status, message) = send(
        "POST",
        "/v1/articles/5/comments",
        Some(json!({ "author": "a", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(message, "An error occurred while creating a comment");
}

#[tokio::test]
async fn list_comments_store_failure_is_500() {
    let (status, message) = send("GET", "/v1/articles/5/comments", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        message,
        "An error occurred while fetching comments for the article id: 5"
    );
}

#[tokio::test]
async fn zero_article_id_is_rejected_before_the_store() {
    let (status, message) = send(
        "POST",
        "/v1/articles/0/comments",
        Some(json!({ "author": "a", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(message, "Invalid article id provided for the comment");
}
