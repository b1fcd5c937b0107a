//! Text rewrite service abstraction and the Gemini implementation.

mod gemini;
mod prompt;

pub use gemini::{GeminiConfig, GeminiRewriter};
pub use prompt::{build_prompt, clean_output};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Error type for rewrite operations.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Rewrite API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The reply did not match the expected schema.
    #[error("Malformed rewrite response: {0}")]
    MalformedResponse(String),

    #[error("Timeout after {0:?}")]
    Timeout(Duration),

    #[error("Rewriter not configured: {0}")]
    NotConfigured(String),
}

/// How the text should be rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteStyle {
    /// Search-optimized rewrite with headings and a strong hook.
    Seo,
    /// Livelier prose without SEO concerns.
    General,
}

impl RewriteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            RewriteStyle::Seo => "seo",
            RewriteStyle::General => "general",
        }
    }
}

/// A service that turns text into an improved version of itself.
#[async_trait]
pub trait Rewriter: Send + Sync {
    /// Provider name, used in logs and metrics.
    fn provider(&self) -> &str;

    /// Rewrite `text` in the given style.
    async fn rewrite(&self, text: &str, style: RewriteStyle) -> Result<String, RewriteError>;
}
