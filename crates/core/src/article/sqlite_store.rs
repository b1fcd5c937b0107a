//! SQLite-backed article store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Datelike, SecondsFormat, SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension};

use super::{Article, ArticleError, ArticleFilter, ArticleStore, HostedPost, NewArticle};

const COLUMNS: &str = "id, title, content, images, published, published_at, hosted_post_id, hosted_post_url, created_at";

/// SQLite-backed article store.
///
/// Timestamps are stored as fixed-width RFC 3339 UTC strings so that text
/// ordering matches chronological ordering. Only years 0000-9999 keep that
/// width, so anything outside them is rejected on the way in.
pub struct SqliteArticleStore {
    conn: Mutex<Connection>,
}

impl SqliteArticleStore {
    /// Open (or create) the database file and its schema.
    pub fn new(path: &Path) -> Result<Self, ArticleError> {
        let conn = Connection::open(path)?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory store (useful for testing).
    pub fn in_memory() -> Result<Self, ArticleError> {
        let conn = Connection::open_in_memory()?;
        Self::initialize_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn initialize_schema(conn: &Connection) -> Result<(), ArticleError> {
        // `published` is nullable: rows imported without the flag are eligible.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS articles (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                content TEXT NOT NULL,
                images TEXT NOT NULL DEFAULT '[]',
                published INTEGER DEFAULT 0,
                published_at TEXT,
                hosted_post_id TEXT,
                hosted_post_url TEXT,
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_articles_queue ON articles(published, created_at);
            CREATE INDEX IF NOT EXISTS idx_articles_published_at ON articles(published_at);
            "#,
        )?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, ArticleError> {
        self.conn
            .lock()
            .map_err(|_| ArticleError::Database("connection mutex poisoned".to_string()))
    }

    fn where_clause(filter: &ArticleFilter) -> &'static str {
        match filter.published {
            Some(true) => "WHERE published = 1",
            Some(false) => "WHERE (published = 0 OR published IS NULL)",
            None => "",
        }
    }

    fn row_to_article(row: &rusqlite::Row) -> rusqlite::Result<Article> {
        let images_json: String = row.get(3)?;
        let images: Vec<String> = serde_json::from_str(&images_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
        let published: Option<bool> = row.get(4)?;
        let published_at: Option<String> = row.get(5)?;
        let created_at: String = row.get(8)?;

        Ok(Article {
            id: row.get(0)?,
            title: row.get(1)?,
            content: row.get(2)?,
            images,
            published: published.unwrap_or(false),
            published_at: published_at
                .map(|s| parse_timestamp(5, &s))
                .transpose()?,
            hosted_post_id: row.get(6)?,
            hosted_post_url: row.get(7)?,
            created_at: parse_timestamp(8, &created_at)?,
        })
    }

    fn get_with(conn: &Connection, id: &str) -> Result<Option<Article>, ArticleError> {
        let article = conn
            .query_row(
                &format!("SELECT {} FROM articles WHERE id = ?", COLUMNS),
                params![id],
                Self::row_to_article,
            )
            .optional()?;
        Ok(article)
    }
}

fn is_storable(ts: DateTime<Utc>) -> bool {
    (0..=9999).contains(&ts.year())
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

impl ArticleStore for SqliteArticleStore {
    fn create(&self, article: NewArticle) -> Result<Article, ArticleError> {
        if article.title.trim().is_empty() {
            return Err(ArticleError::Invalid("title is required".to_string()));
        }
        if article.content.trim().is_empty() {
            return Err(ArticleError::Invalid("content is required".to_string()));
        }

        if let Some(created_at) = article.created_at {
            if !is_storable(created_at) {
                return Err(ArticleError::Invalid(format!(
                    "created_at {} is outside years 0000-9999",
                    created_at
                )));
            }
        }

        let id = uuid::Uuid::new_v4().to_string();
        let created_at = article
            .created_at
            .unwrap_or_else(Utc::now)
            .trunc_subsecs(6);
        let images_json = serde_json::to_string(&article.images)
            .map_err(|e| ArticleError::Database(e.to_string()))?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO articles (id, title, content, images, published, created_at) VALUES (?, ?, ?, ?, 0, ?)",
            params![
                id,
                article.title,
                article.content,
                images_json,
                format_timestamp(created_at),
            ],
        )?;

        Ok(Article {
            id,
            title: article.title,
            content: article.content,
            images: article.images,
            published: false,
            published_at: None,
            hosted_post_id: None,
            hosted_post_url: None,
            created_at,
        })
    }

    fn get(&self, id: &str) -> Result<Option<Article>, ArticleError> {
        let conn = self.conn()?;
        Self::get_with(&conn, id)
    }

    fn list(&self, filter: &ArticleFilter) -> Result<Vec<Article>, ArticleError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM articles {} ORDER BY created_at DESC, rowid DESC LIMIT ? OFFSET ?",
            COLUMNS,
            Self::where_clause(filter)
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params![filter.limit, filter.offset], Self::row_to_article)?;

        let mut articles = Vec::new();
        for row in rows {
            articles.push(row?);
        }
        Ok(articles)
    }

    fn count(&self, filter: &ArticleFilter) -> Result<i64, ArticleError> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT COUNT(*) FROM articles {}",
            Self::where_clause(filter)
        );
        let count = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }

    fn next_unpublished(&self) -> Result<Option<Article>, ArticleError> {
        let conn = self.conn()?;
        let article = conn
            .query_row(
                &format!(
                    "SELECT {} FROM articles WHERE published = 0 OR published IS NULL ORDER BY created_at ASC, rowid ASC LIMIT 1",
                    COLUMNS
                ),
                [],
                Self::row_to_article,
            )
            .optional()?;
        Ok(article)
    }

    fn mark_published(
        &self,
        id: &str,
        post: &HostedPost,
        published_at: DateTime<Utc>,
    ) -> Result<Article, ArticleError> {
        let conn = self.conn()?;

        // Conditional on the flag so a row is never published twice.
        let changed = conn.execute(
            "UPDATE articles SET published = 1, published_at = ?, hosted_post_id = ?, hosted_post_url = ? WHERE id = ? AND (published = 0 OR published IS NULL)",
            params![format_timestamp(published_at), post.id, post.url, id],
        )?;

        match Self::get_with(&conn, id)? {
            Some(article) if changed == 1 => Ok(article),
            Some(_) => Err(ArticleError::AlreadyPublished(id.to_string())),
            None => Err(ArticleError::NotFound(id.to_string())),
        }
    }

    fn delete(&self, id: &str) -> Result<Article, ArticleError> {
        let conn = self.conn()?;
        let article =
            Self::get_with(&conn, id)?.ok_or_else(|| ArticleError::NotFound(id.to_string()))?;
        conn.execute("DELETE FROM articles WHERE id = ?", params![id])?;
        Ok(article)
    }

    fn delete_published_before(&self, cutoff: DateTime<Utc>) -> Result<usize, ArticleError> {
        let conn = self.conn()?;
        let deleted = conn.execute(
            "DELETE FROM articles WHERE published = 1 AND published_at < ?",
            params![format_timestamp(cutoff)],
        )?;
        Ok(deleted)
    }
}
