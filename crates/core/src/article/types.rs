//! Article record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content record waiting for, or past, publication.
///
/// `published == true` implies `published_at`, `hosted_post_id` and
/// `hosted_post_url` are all set; the store only ever sets them together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Image URLs in the order they were scraped.
    pub images: Vec<String>,
    pub published: bool,
    pub published_at: Option<DateTime<Utc>>,
    pub hosted_post_id: Option<String>,
    pub hosted_post_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Article {
    /// Whether the publish cycle may pick this article.
    pub fn is_eligible(&self) -> bool {
        !self.published
    }
}

/// Input for creating an article.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    /// Defaults to now. Ingestion backfills may supply the original time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl NewArticle {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            images: Vec::new(),
            created_at: None,
        }
    }

    pub fn with_images<I, S>(mut self, images: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.images = images.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Identifiers returned by the hosting service for a published post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedPost {
    pub id: String,
    pub url: String,
}

/// Filter for listing articles.
#[derive(Debug, Clone)]
pub struct ArticleFilter {
    /// `Some(false)` also matches rows whose flag was never set.
    pub published: Option<bool>,
    pub limit: i64,
    pub offset: i64,
}

impl Default for ArticleFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl ArticleFilter {
    pub fn new() -> Self {
        Self {
            published: None,
            limit: 100,
            offset: 0,
        }
    }

    pub fn with_published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }
}
