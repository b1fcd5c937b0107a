//! Article storage trait.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::{Article, ArticleFilter, HostedPost, NewArticle};

/// Error type for article storage.
#[derive(Debug, Error)]
pub enum ArticleError {
    #[error("Article not found: {0}")]
    NotFound(String),

    #[error("Article {0} is already published")]
    AlreadyPublished(String),

    #[error("Invalid article: {0}")]
    Invalid(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<rusqlite::Error> for ArticleError {
    fn from(e: rusqlite::Error) -> Self {
        ArticleError::Database(e.to_string())
    }
}

/// Trait for article storage backends.
pub trait ArticleStore: Send + Sync {
    /// Create a new, unpublished article.
    fn create(&self, article: NewArticle) -> Result<Article, ArticleError>;

    /// Get an article by ID.
    fn get(&self, id: &str) -> Result<Option<Article>, ArticleError>;

    /// List articles matching the filter, newest first.
    fn list(&self, filter: &ArticleFilter) -> Result<Vec<Article>, ArticleError>;

    /// Count articles matching the filter (limit/offset ignored).
    fn count(&self, filter: &ArticleFilter) -> Result<i64, ArticleError>;

    /// The oldest article whose `published` flag is false or unset.
    fn next_unpublished(&self) -> Result<Option<Article>, ArticleError>;

    /// Record a successful publish. Only succeeds for an unpublished article.
    fn mark_published(
        &self,
        id: &str,
        post: &HostedPost,
        published_at: DateTime<Utc>,
    ) -> Result<Article, ArticleError>;

    /// Permanently delete an article, returning it.
    fn delete(&self, id: &str) -> Result<Article, ArticleError>;

    /// Delete published articles whose `published_at` is before `cutoff`.
    fn delete_published_before(&self, cutoff: DateTime<Utc>) -> Result<usize, ArticleError>;
}
