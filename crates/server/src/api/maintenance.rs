//! Housekeeping endpoints.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use autoblog_core::purge_expired;

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct PurgeResponse {
    pub message: String,
    pub deleted: usize,
}

/// Delete published articles older than the retention window.
pub async fn purge(State(state): State<Arc<AppState>>) -> Result<Json<PurgeResponse>, ApiError> {
    let retention_days = state.config().publisher.retention_days;
    let deleted = purge_expired(state.store(), retention_days, Utc::now())
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(PurgeResponse {
        message: format!("Successfully deleted {} old blogs.", deleted),
        deleted,
    }))
}
