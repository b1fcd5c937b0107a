//! Notification check endpoint.

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use tracing::{info, warn};

use autoblog_core::{notify::connectivity_check, NotifyError};

use super::handlers::{api_error, ApiError, MessageResponse};
use crate::state::AppState;

/// Send a test notification to the configured admin address.
pub async fn send_test(
    State(state): State<Arc<AppState>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let admin_email = state.config().notifier.admin_email.trim();
    if admin_email.is_empty() {
        return Err(api_error(
            StatusCode::BAD_REQUEST,
            "notifier.admin_email is not configured",
        ));
    }

    let notifier = state.notifier();
    notifier
        .send(&connectivity_check(admin_email))
        .await
        .map_err(|e| {
            warn!("Test notification via {} failed: {}", notifier.name(), e);
            let status = match &e {
                NotifyError::NotConfigured(_) => StatusCode::BAD_REQUEST,
                _ => StatusCode::BAD_GATEWAY,
            };
            api_error(status, e.to_string())
        })?;

    info!("Test notification sent via {}", notifier.name());
    Ok(Json(MessageResponse {
        message: "Test email sent successfully!".to_string(),
    }))
}
