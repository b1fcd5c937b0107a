//! Ad-hoc text rewriting.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use autoblog_core::{RewriteError, RewriteStyle};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RewriteBody {
    pub text: String,
    #[serde(default = "default_style")]
    pub style: RewriteStyle,
}

fn default_style() -> RewriteStyle {
    RewriteStyle::Seo
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteResponse {
    pub improved_text: String,
    pub original_text: String,
}

/// Rewrite arbitrary text without touching any article.
pub async fn rewrite_text(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RewriteBody>,
) -> Result<Json<RewriteResponse>, ApiError> {
    let rewriter = state.rewriter().ok_or_else(|| {
        api_error(
            StatusCode::SERVICE_UNAVAILABLE,
            "Rewriter is not configured",
        )
    })?;

    if body.text.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Text is required"));
    }

    let improved = rewriter
        .rewrite(&body.text, body.style)
        .await
        .map_err(|e| {
            let status = match e {
                RewriteError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
                _ => StatusCode::BAD_GATEWAY,
            };
            api_error(status, e.to_string())
        })?;

    Ok(Json(RewriteResponse {
        improved_text: improved,
        original_text: body.text,
    }))
}
