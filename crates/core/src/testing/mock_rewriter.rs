//! Mock rewriter for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::rewriter::{RewriteError, RewriteStyle, Rewriter};

/// Mock implementation of the Rewriter trait.
///
/// Returns a fixed response when one is set, otherwise the input prefixed
/// with `"Rewritten: "`. Every call is recorded.
///
/// # Example
///
/// ```rust,ignore
/// let rewriter = MockRewriter::new();
/// rewriter.set_response("Better text").await;
///
/// let text = rewriter.rewrite("text", RewriteStyle::Seo).await?;
/// assert_eq!(text, "Better text");
/// assert_eq!(rewriter.call_count().await, 1);
/// ```
#[derive(Debug)]
pub struct MockRewriter {
    response: Arc<RwLock<Option<String>>>,
    calls: Arc<RwLock<Vec<(String, RewriteStyle)>>>,
    /// If set, the next rewrite fails with this error.
    next_error: Arc<RwLock<Option<RewriteError>>>,
}

impl Default for MockRewriter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRewriter {
    pub fn new() -> Self {
        Self {
            response: Arc::new(RwLock::new(None)),
            calls: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Always return `response` instead of echoing the input.
    pub async fn set_response(&self, response: impl Into<String>) {
        *self.response.write().await = Some(response.into());
    }

    /// Configure the next rewrite to fail with the given error.
    pub async fn set_next_error(&self, error: RewriteError) {
        *self.next_error.write().await = Some(error);
    }

    /// Get recorded `(text, style)` calls.
    pub async fn recorded_calls(&self) -> Vec<(String, RewriteStyle)> {
        self.calls.read().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.read().await.len()
    }
}

#[async_trait]
impl Rewriter for MockRewriter {
    fn provider(&self) -> &str {
        "mock"
    }

    async fn rewrite(&self, text: &str, style: RewriteStyle) -> Result<String, RewriteError> {
        self.calls.write().await.push((text.to_string(), style));

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        Ok(match self.response.read().await.as_ref() {
            Some(response) => response.clone(),
            None => format!("Rewritten: {}", text),
        })
    }
}
