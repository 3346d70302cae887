//! Caller-facing error taxonomy shared by article and comment services.
//!
//! # Invariants
//! - `NoArticleFound` and `MissingArticleReference` carry fixed messages and
//!   never embed storage detail.
//! - Callers classify failures with `ServiceError::kind`, never by message.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable message for `ServiceError::NoArticleFound`.
pub const NO_ARTICLE_FOUND_MESSAGE: &str = "no article was found";
/// Stable message for `ServiceError::MissingArticleReference`.
pub const MISSING_ARTICLE_REFERENCE_MESSAGE: &str =
    "please provide a valid article id to add the comment";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Coarse classification the HTTP boundary maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NoArticleFound,
    MissingArticleReference,
    Internal,
}

/// Domain error returned by services.
#[derive(Debug)]
pub enum ServiceError {
    /// Lookup by id matched no article.
    NoArticleFound,
    /// Comment draft had no article id, or one the store does not know.
    MissingArticleReference,
    /// Any other persistence failure, passed through unchanged.
    Repo(RepoError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoArticleFound => ErrorKind::NoArticleFound,
            Self::MissingArticleReference => ErrorKind::MissingArticleReference,
            Self::Repo(_) => ErrorKind::Internal,
        }
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoArticleFound => write!(f, "{NO_ARTICLE_FOUND_MESSAGE}"),
            Self::MissingArticleReference => write!(f, "{MISSING_ARTICLE_REFERENCE_MESSAGE}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, ServiceError};
    use crate::repo::RepoError;

    #[test]
    fn kinds_are_distinguishable() {
        assert_eq!(ServiceError::NoArticleFound.kind(), ErrorKind::NoArticleFound);
        assert_eq!(
            ServiceError::MissingArticleReference.kind(),
            ErrorKind::MissingArticleReference
        );
        assert_eq!(
            ServiceError::Repo(RepoError::NotFound(1)).kind(),
            ErrorKind::Internal
        );
    }

    #[test]
    fn mapped_messages_do_not_mention_storage() {
        for err in [
            ServiceError::NoArticleFound,
            ServiceError::MissingArticleReference,
        ] {
            let message = err.to_string().to_lowercase();
            assert!(!message.contains("foreign key"));
            assert!(!message.contains("sqlite"));
        }
    }
}
