//! HTTP boundary for the articles backend.
//!
//! Thin adapter: request parsing, service invocation and status-code
//! mapping. Business rules live in `articles_core`.

pub mod api;
pub mod response;

pub use api::{router, AppRepository, AppState};
pub use response::ErrorResponse;
