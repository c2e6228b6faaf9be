//! Router configuration - centralized route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::state::SharedState;
use super::{enhance, health, tags, thoughts};

/// Build the application router.
pub fn build_router(state: SharedState) -> Router {
    Router::new()
        // =================================================================
        // HEALTH
        // =================================================================
        .route("/health", get(health::health))
        // =================================================================
        // THOUGHTS
        // =================================================================
        .route("/api/thoughts", post(thoughts::capture))
        .route("/api/thoughts", get(thoughts::list))
        .route("/api/thoughts/reanalyze", post(thoughts::reanalyze))
        .route("/api/thoughts/{id}/boost", post(thoughts::boost))
        // =================================================================
        // SEMANTIC TAG GRAPH
        // =================================================================
        .route("/api/tags", get(tags::list))
        .route("/api/tags/{id}/boost", post(tags::boost))
        .route("/api/tags/{id}/thoughts", get(tags::thoughts))
        // =================================================================
        // PROMPT ENHANCEMENT
        // =================================================================
        .route("/api/enhance", post(enhance::enhance))
        // =================================================================
        // LAYERS & STATE
        // =================================================================
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
