//! Comment repository contract and SQLite implementation.
//!
//! # Invariants
//! - A foreign-key rejection on insert surfaces as
//!   `RepoError::ArticleReferenceViolation`, never as a raw SQLite error.
//! - Comment reads are always scoped to one article id.

use super::{is_foreign_key_violation, EpochMillis, RepoError, RepoResult, SqliteRepository};
use crate::model::article::ArticleId;
use crate::model::comment::{Comment, NewComment};
use rusqlite::{params, Row};

const COMMENT_COLUMNS: &str = "id, article_id, author, content, creation_timestamp";

/// Repository interface for comment access.
pub trait CommentRepository {
    /// Inserts one comment and returns it with its store-assigned id.
    fn create_comment(&self, comment: &NewComment) -> RepoResult<Comment>;
    /// Lists comments of one article, ascending by id.
    fn get_comments_by_article_id(&self, article_id: ArticleId) -> RepoResult<Vec<Comment>>;
}

impl CommentRepository for SqliteRepository {
    fn create_comment(&self, comment: &NewComment) -> RepoResult<Comment> {
        comment.validate()?;

        let conn = self.conn()?;
        conn.query_row(
            &format!(
                "INSERT INTO comment (article_id, author, content, creation_timestamp)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING {COMMENT_COLUMNS};"
            ),
            params![
                comment.article_id,
                comment.author.as_str(),
                comment.content.as_str(),
                comment.creation_timestamp.map(EpochMillis),
            ],
            parse_comment_row,
        )
        .map_err(|err| {
            if is_foreign_key_violation(&err) {
                RepoError::ArticleReferenceViolation(comment.article_id)
            } else {
                err.into()
            }
        })
    }

    fn get_comments_by_article_id(&self, article_id: ArticleId) -> RepoResult<Vec<Comment>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS}
             FROM comment
             WHERE article_id = ?1
             ORDER BY id ASC;"
        ))?;
        let comments = stmt
            .query_map([article_id], parse_comment_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }
}

fn parse_comment_row(row: &Row<'_>) -> rusqlite::Result<Comment> {
    let creation_timestamp: EpochMillis = row.get("creation_timestamp")?;
    Ok(Comment {
        id: row.get("id")?,
        article_id: row.get("article_id")?,
        author: row.get("author")?,
        content: row.get("content")?,
        creation_timestamp: creation_timestamp.0,
    })
}
