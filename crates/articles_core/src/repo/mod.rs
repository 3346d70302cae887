//! Repository layer abstractions and persistence implementation.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts, split per resource so a
//!   service only sees the capability it needs.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Write paths validate drafts before SQL mutations.
//! - Repository APIs return semantic errors (`NotFound`,
//!   `ArticleReferenceViolation`) in addition to DB transport errors, and
//!   nothing coarser.
//! - Every operation is a single statement round trip.

use crate::db::{DbError, DbPool};
use crate::model::article::ArticleId;
use crate::model::ModelValidationError;
use chrono::{DateTime, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod article_repo;
pub mod comment_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by article and comment persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(ModelValidationError),
    Db(DbError),
    /// Lookup by primary key matched zero rows.
    NotFound(ArticleId),
    /// The store rejected a write whose article reference does not exist.
    ArticleReferenceViolation(ArticleId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "article not found: {id}"),
            Self::ArticleReferenceViolation(id) => {
                write!(f, "foreign key violation for article id {id}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::ArticleReferenceViolation(_) => None,
        }
    }
}

impl From<ModelValidationError> for RepoError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<r2d2::Error> for RepoError {
    fn from(value: r2d2::Error) -> Self {
        Self::Db(DbError::Pool(value))
    }
}

/// SQLite-backed repository implementing every capability trait.
///
/// Cloning is cheap and shares the underlying pool.
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
}

impl SqliteRepository {
    /// Constructs a repository from a migrated/ready pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepoResult<r2d2::PooledConnection<r2d2_sqlite::SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }
}

/// Timestamp column stored as Unix epoch milliseconds.
#[derive(Debug, Clone, Copy)]
struct EpochMillis(DateTime<Utc>);

impl FromSql for EpochMillis {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let millis = i64::column_result(value)?;
        DateTime::from_timestamp_millis(millis)
            .map(EpochMillis)
            .ok_or(FromSqlError::OutOfRange(millis))
    }
}

impl ToSql for EpochMillis {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.0.timestamp_millis().into())
    }
}

fn is_foreign_key_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
    )
}

#[cfg(test)]
mod tests {
    use super::{is_foreign_key_violation, EpochMillis};
    use chrono::{TimeZone, Utc};
    use rusqlite::types::{FromSql, ValueRef};
    use rusqlite::Connection;

    #[test]
    fn epoch_millis_rejects_out_of_range_values() {
        assert!(EpochMillis::column_result(ValueRef::Integer(i64::MAX)).is_err());
    }

    #[test]
    fn epoch_millis_reads_back_millisecond_precision() {
        let expected = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        let parsed = EpochMillis::column_result(ValueRef::Integer(1_700_000_000_123)).unwrap();
        assert_eq!(parsed.0, expected);
    }

    #[test]
    fn foreign_key_detection_ignores_other_constraints() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY);
             CREATE TABLE child (
                id INTEGER PRIMARY KEY,
                parent_id INTEGER NOT NULL REFERENCES parent(id),
                name TEXT NOT NULL UNIQUE
             );
             INSERT INTO parent (id) VALUES (1);
             INSERT INTO child (id, parent_id, name) VALUES (1, 1, 'a');",
        )
        .unwrap();

        let fk_err = conn
            .execute(
                "INSERT INTO child (parent_id, name) VALUES (42, 'b');",
                [],
            )
            .unwrap_err();
        assert!(is_foreign_key_violation(&fk_err));

        let unique_err = conn
            .execute("INSERT INTO child (parent_id, name) VALUES (1, 'a');", [])
            .unwrap_err();
        assert!(!is_foreign_key_violation(&unique_err));
    }
}
