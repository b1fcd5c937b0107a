use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{articles, handlers, maintenance, notify, publish, rewrite};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Everything under /api/v1 except health requires credentials
    let protected_routes = Router::new()
        .route("/config", get(handlers::get_config))
        // Publish cycle trigger
        .route("/auto-publish", post(publish::auto_publish))
        // Articles
        .route("/articles", post(articles::create_article))
        .route("/articles", get(articles::list_articles))
        .route("/articles/{id}", get(articles::get_article))
        .route("/articles/{id}", delete(articles::delete_article))
        .route("/articles/{id}/publish", post(publish::publish_article))
        // Rewriter
        .route("/rewrite", post(rewrite::rewrite_text))
        // Housekeeping
        .route("/maintenance/purge", post(maintenance::purge))
        .route("/notify/test", post(notify::send_test))
        .route_layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            auth_middleware,
        ));

    let api_routes = Router::new()
        .route("/health", get(handlers::health))
        .merge(protected_routes)
        .with_state(Arc::clone(&state));

    Router::new()
        .route("/metrics", get(handlers::metrics))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
}
