//! Health endpoint

use axum::{extract::State, response::Json};
use serde::Serialize;

use super::state::SharedState;

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub thoughts: usize,
    pub tags: usize,
    pub provider_configured: bool,
}

/// Main health check endpoint
pub async fn health(State(state): State<SharedState>) -> Json<HealthResponse> {
    let store = state.store.read();

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        thoughts: store.thought_count(),
        tags: store.tag_count(),
        provider_configured: state.config.anthropic_api_key.is_some(),
    })
}
