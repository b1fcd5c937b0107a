//! Types for the publish cycle.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::article::ArticleError;
use crate::hosting::HostingError;
use crate::rewriter::RewriteError;

/// Errors that end a cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The request's timing parameters are missing or malformed.
    #[error("{0}")]
    Validation(String),

    #[error("rewrite failed: {0}")]
    Rewrite(#[from] RewriteError),

    #[error("hosting failed: {0}")]
    Hosting(#[from] HostingError),

    #[error("article store error: {0}")]
    Store(#[from] ArticleError),

    /// The post is live on the hosting service but the article record was
    /// not updated.
    #[error("published as {post_url} but the article was not updated: {source}")]
    Persistence {
        post_url: String,
        #[source]
        source: ArticleError,
    },
}

impl CycleError {
    /// True when the caller sent a bad request; everything else is ours or upstream.
    pub fn is_client_error(&self) -> bool {
        matches!(self, CycleError::Validation(_))
    }
}

/// Trigger body. Both fields absent means "publish now".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CycleRequest {
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub publish_date: Option<String>,
    /// `HH:MM:SS` or `HH:MM`
    #[serde(default)]
    pub publish_time: Option<String>,
}

impl CycleRequest {
    pub fn now() -> Self {
        Self::default()
    }

    pub fn at(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            publish_date: Some(date.into()),
            publish_time: Some(time.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.publish_date.is_none() && self.publish_time.is_none()
    }
}

/// When a post goes live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schedule {
    pub publish_at: DateTime<Utc>,
    /// Resolved from an empty request rather than an explicit date and time.
    pub immediate: bool,
}

impl Schedule {
    /// Move an immediate schedule to `now`. Explicit schedules are unchanged.
    pub fn refreshed(self, now: DateTime<Utc>) -> Self {
        if self.immediate {
            Self {
                publish_at: now,
                immediate: true,
            }
        } else {
            self
        }
    }

    /// `"Now"` for immediate publishes, otherwise `"YYYY-MM-DD HH:MM:SS"`.
    pub fn describe(&self) -> String {
        if self.immediate {
            "Now".to_string()
        } else {
            self.publish_at.format("%Y-%m-%d %H:%M:%S").to_string()
        }
    }
}

/// Resolve the request's timing into an instant. Times are UTC.
pub fn resolve_schedule(request: &CycleRequest, now: DateTime<Utc>) -> Result<Schedule, CycleError> {
    if request.is_empty() {
        return Ok(Schedule {
            publish_at: now,
            immediate: true,
        });
    }

    let date = request.publish_date.as_deref().map(str::trim).unwrap_or("");
    let time = request.publish_time.as_deref().map(str::trim).unwrap_or("");
    if date.is_empty() || time.is_empty() {
        return Err(CycleError::Validation(
            "Publish date and time are required in the body if not publishing instantly."
                .to_string(),
        ));
    }

    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        CycleError::Validation(format!("Invalid publishDate '{}', expected YYYY-MM-DD", date))
    })?;
    let time = NaiveTime::parse_from_str(time, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
        .map_err(|_| {
            CycleError::Validation(format!("Invalid publishTime '{}', expected HH:MM:SS", time))
        })?;

    Ok(Schedule {
        publish_at: date.and_time(time).and_utc(),
        immediate: false,
    })
}

/// Details of a successful publish.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReport {
    pub article_id: String,
    pub title: String,
    pub hosted_post_id: String,
    pub hosted_post_url: String,
    pub scheduled_for: String,
    pub publish_at: DateTime<Utc>,
    pub publish_now: bool,
}

/// Result of a cycle that did not fail.
#[derive(Debug, Clone)]
pub enum CycleOutcome {
    /// No eligible article; not an error.
    NothingToPublish,
    Published(PublishReport),
}
