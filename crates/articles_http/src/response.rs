//! Error envelopes returned by the HTTP boundary.
//!
//! # Invariants
//! - Messages are fixed per failure case; storage detail never leaks into them.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// JSON error body paired with its status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ErrorResponse {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn invalid_article_id() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid or no article id was supplied",
        )
    }

    pub fn article_not_found(id: &str) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            format!("No article was found for id: {id}"),
        )
    }

    pub fn article_by_id_error(id: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            format!("Encountered an error while getting article by id: {id}"),
        )
    }

    pub fn article_get_all_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred while getting all articles",
        )
    }

    pub fn article_binding_error() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "An error occurred while parsing the request body as an article",
        )
    }

    pub fn article_creation_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred while creating an article",
        )
    }

    pub fn comment_binding_error() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "An error occurred while parsing the request body as a comment",
        )
    }

    pub fn comment_invalid_article_id() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "Invalid article id provided for the comment",
        )
    }

    pub fn comment_creation_error() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "An error occurred while creating a comment",
        )
    }

    pub fn comment_get_all_error(article_id: &str) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("An error occurred while fetching comments for the article id: {article_id}"),
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message.as_str(),
        };
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorResponse;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[tokio::test]
    async fn envelope_carries_status_and_message_only() {
        let response = ErrorResponse::article_not_found("12").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "No article was found for id: 12" })
        );
    }
}
