//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Translate storage outcomes into the caller-facing error taxonomy.
//! - Keep the HTTP layer decoupled from storage details.

pub mod article_service;
pub mod comment_service;
pub mod error;
