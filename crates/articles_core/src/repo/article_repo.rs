//! Article repository contract and SQLite implementation.
//!
//! # Invariants
//! - `get_article_by_id` reports a missing row as `RepoError::NotFound`.
//! - `create_article` returns the persisted row, including the generated id.

use super::{EpochMillis, RepoError, RepoResult, SqliteRepository};
use crate::model::article::{Article, ArticleId, NewArticle};
use rusqlite::{params, Row};

const ARTICLE_COLUMNS: &str = "id, title, content, creation_timestamp";

/// Repository interface for article access.
pub trait ArticleRepository {
    /// Fetches exactly one article by primary key.
    fn get_article_by_id(&self, id: ArticleId) -> RepoResult<Article>;
    /// Lists every article, ascending by id.
    fn get_articles(&self) -> RepoResult<Vec<Article>>;
    /// Inserts one article and returns it with its store-assigned id.
    fn create_article(&self, article: &NewArticle) -> RepoResult<Article>;
}

impl ArticleRepository for SqliteRepository {
    fn get_article_by_id(&self, id: ArticleId) -> RepoResult<Article> {
        let conn = self.conn()?;
        let result = conn.query_row(
            &format!("SELECT {ARTICLE_COLUMNS} FROM article WHERE id = ?1;"),
            [id],
            parse_article_row,
        );

        match result {
            Ok(article) => Ok(article),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepoError::NotFound(id)),
            Err(err) => Err(err.into()),
        }
    }

    fn get_articles(&self) -> RepoResult<Vec<Article>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM article ORDER BY id ASC;"
        ))?;
        let articles = stmt
            .query_map([], parse_article_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(articles)
    }

    fn create_article(&self, article: &NewArticle) -> RepoResult<Article> {
        article.validate()?;

        let conn = self.conn()?;
        let created = conn.query_row(
            &format!(
                "INSERT INTO article (title, content, creation_timestamp)
                 VALUES (?1, ?2, ?3)
                 RETURNING {ARTICLE_COLUMNS};"
            ),
            params![
                article.title.as_str(),
                article.content.as_str(),
                article.creation_timestamp.map(EpochMillis),
            ],
            parse_article_row,
        )?;

        Ok(created)
    }
}

fn parse_article_row(row: &Row<'_>) -> rusqlite::Result<Article> {
    let creation_timestamp: EpochMillis = row.get("creation_timestamp")?;
    Ok(Article {
        id: row.get("id")?,
        title: row.get("title")?,
        content: row.get("content")?,
        creation_timestamp: creation_timestamp.0,
    })
}
