//! Publish cycle trigger endpoints.

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use autoblog_core::{ArticleError, CycleError, CycleOutcome, CycleRequest, PublishReport};

use super::handlers::{api_error, ApiError};
use super::middleware::AuthUser;
use crate::state::AppState;

// ============================================================================
// Response Types
// ============================================================================

/// Response for a cycle or manual publish.
///
/// Only `message` is present when there was nothing to publish.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_post_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_for: Option<String>,
}

impl PublishResponse {
    fn published(message: &str, report: PublishReport) -> Self {
        Self {
            message: message.to_string(),
            article_id: Some(report.article_id),
            hosted_post_id: Some(report.hosted_post_id),
            hosted_post_url: Some(report.hosted_post_url),
            scheduled_for: Some(report.scheduled_for),
        }
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Parse an optional JSON body. An empty body means "publish now".
fn parse_cycle_request(body: &Bytes) -> Result<CycleRequest, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CycleRequest::now());
    }
    serde_json::from_slice(body)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e)))
}

fn cycle_error(e: CycleError) -> ApiError {
    let status = match &e {
        CycleError::Validation(_) => StatusCode::BAD_REQUEST,
        CycleError::Store(ArticleError::NotFound(_)) => StatusCode::NOT_FOUND,
        CycleError::Store(ArticleError::AlreadyPublished(_)) => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.to_string())
}

fn not_configured() -> ApiError {
    api_error(
        StatusCode::SERVICE_UNAVAILABLE,
        "Publishing is not configured (requires [rewriter] and [hosting])",
    )
}

// ============================================================================
// Handlers
// ============================================================================

/// Run one publish cycle.
pub async fn auto_publish(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    body: Bytes,
) -> Result<Json<PublishResponse>, ApiError> {
    let orchestrator = state.orchestrator().ok_or_else(not_configured)?;
    let request = parse_cycle_request(&body)?;

    info!("Publish cycle triggered by {}", caller);

    match orchestrator.run_cycle(&request).await.map_err(cycle_error)? {
        CycleOutcome::NothingToPublish => Ok(Json(PublishResponse {
            message: "No unpublished blogs found.".to_string(),
            article_id: None,
            hosted_post_id: None,
            hosted_post_url: None,
            scheduled_for: None,
        })),
        CycleOutcome::Published(report) => Ok(Json(PublishResponse::published(
            "Blog improved and published successfully",
            report,
        ))),
    }
}

/// Publish a specific article without rewriting it.
pub async fn publish_article(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<PublishResponse>, ApiError> {
    let orchestrator = state.orchestrator().ok_or_else(not_configured)?;
    let request = parse_cycle_request(&body)?;

    info!("Manual publish of {} requested by {}", id, caller);

    let report = orchestrator
        .publish_article(&id, &request)
        .await
        .map_err(cycle_error)?;

    let message = if report.publish_now {
        "Blog published"
    } else {
        "Blog scheduled for publication"
    };
    Ok(Json(PublishResponse::published(message, report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_publish_now() {
        assert!(parse_cycle_request(&Bytes::new()).unwrap().is_empty());
        assert!(parse_cycle_request(&Bytes::from_static(b" \n"))
            .unwrap()
            .is_empty());
        assert!(parse_cycle_request(&Bytes::from_static(b"{}"))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let (status, _) = parse_cycle_request(&Bytes::from_static(b"{not json")).unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_cycle_error_status_mapping() {
        let cases = [
            (CycleError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (
                CycleError::Store(ArticleError::NotFound("a".into())),
                StatusCode::NOT_FOUND,
            ),
            (
                CycleError::Store(ArticleError::AlreadyPublished("a".into())),
                StatusCode::CONFLICT,
            ),
            (
                CycleError::Store(ArticleError::Database("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CycleError::Persistence {
                    post_url: "https://blog.example.com/p".into(),
                    source: ArticleError::NotFound("a".into()),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (error, expected) in cases {
            assert_eq!(cycle_error(error).0, expected);
        }
    }
}
