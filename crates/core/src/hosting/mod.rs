//! Hosting service integration: the external platform that serves
//! published posts to readers.

mod blogger;
mod layout;
mod oauth;

pub use blogger::{BloggerClient, BloggerConfig};
pub use layout::{interleave_images, promote_second_image, render_post_html, LayoutBlock};
pub use oauth::{RefreshTokenProvider, TokenProvider};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;
use thiserror::Error;

pub use crate::article::HostedPost;

/// Errors from the hosting service or its credential exchange.
#[derive(Debug, Error)]
pub enum HostingError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Hosting API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Malformed hosting response: {0}")]
    MalformedResponse(String),

    /// The OAuth refresh exchange failed.
    #[error("Failed to authenticate with hosting service: {0}")]
    Auth(String),

    #[error("Hosting service not configured: {0}")]
    NotConfigured(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),
}

/// A post ready to be submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishPost {
    pub title: String,
    /// Plain paragraphs separated by blank lines; laid out by the adapter.
    pub content: String,
    /// Image URLs, lead image first.
    pub images: Vec<String>,
    /// When the post should go live. A past or present instant publishes now.
    pub publish_at: DateTime<Utc>,
}

/// Trait for hosting backends.
#[async_trait]
pub trait HostingService: Send + Sync {
    /// Backend name, used in logs and metrics.
    fn name(&self) -> &str;

    /// Submit a post and return its external identifiers.
    async fn publish(&self, post: &PublishPost) -> Result<HostedPost, HostingError>;
}
