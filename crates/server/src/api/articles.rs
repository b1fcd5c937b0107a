//! Article API handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use autoblog_core::{Article, ArticleError, ArticleFilter, NewArticle};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

/// Maximum allowed limit for article queries
const MAX_LIMIT: i64 = 1000;

/// Default limit for article queries
const DEFAULT_LIMIT: i64 = 100;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Query parameters for listing articles
#[derive(Debug, Deserialize)]
pub struct ListArticlesParams {
    /// Filter by publish status
    pub published: Option<bool>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub images: Vec<String>,
    pub published: bool,
    pub published_at: Option<String>,
    pub hosted_post_id: Option<String>,
    pub hosted_post_url: Option<String>,
    pub created_at: String,
}

impl From<Article> for ArticleResponse {
    fn from(article: Article) -> Self {
        Self {
            id: article.id,
            title: article.title,
            content: article.content,
            images: article.images,
            published: article.published,
            published_at: article.published_at.map(|t| t.to_rfc3339()),
            hosted_post_id: article.hosted_post_id,
            hosted_post_url: article.hosted_post_url,
            created_at: article.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListArticlesResponse {
    pub articles: Vec<ArticleResponse>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

fn store_error(e: ArticleError) -> ApiError {
    let status = match &e {
        ArticleError::NotFound(_) => StatusCode::NOT_FOUND,
        ArticleError::Invalid(_) => StatusCode::BAD_REQUEST,
        ArticleError::AlreadyPublished(_) => StatusCode::CONFLICT,
        ArticleError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    api_error(status, e.to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// Queue a new article for publishing
pub async fn create_article(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewArticle>,
) -> Result<(StatusCode, Json<ArticleResponse>), ApiError> {
    let article = state.store().create(body).map_err(store_error)?;
    Ok((StatusCode::CREATED, Json(ArticleResponse::from(article))))
}

/// Get an article by ID
pub async fn get_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    match state.store().get(&id).map_err(store_error)? {
        Some(article) => Ok(Json(ArticleResponse::from(article))),
        None => Err(api_error(
            StatusCode::NOT_FOUND,
            format!("Article not found: {}", id),
        )),
    }
}

/// List articles, newest first
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListArticlesParams>,
) -> Result<Json<ListArticlesResponse>, ApiError> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let offset = params.offset.unwrap_or(0).max(0);

    let mut filter = ArticleFilter::new().with_limit(limit).with_offset(offset);
    if let Some(published) = params.published {
        filter = filter.with_published(published);
    }

    let articles = state.store().list(&filter).map_err(store_error)?;
    let total = state.store().count(&filter).map_err(store_error)?;

    Ok(Json(ListArticlesResponse {
        articles: articles.into_iter().map(ArticleResponse::from).collect(),
        total,
        limit,
        offset,
    }))
}

/// Delete an article
pub async fn delete_article(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ArticleResponse>, ApiError> {
    let article = state.store().delete(&id).map_err(store_error)?;
    Ok(Json(ArticleResponse::from(article)))
}
