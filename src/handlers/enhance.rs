//! Prompt enhancement handler

use axum::{extract::State, response::Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use super::state::SharedState;
use crate::constants::ENHANCE_CONTEXT_CAP;
use crate::errors::{Result, ValidationErrorExt};
use crate::types::EnhancedPrompt;
use crate::validation;

/// Enhancement request
#[derive(Debug, Deserialize)]
pub struct EnhanceRequest {
    pub prompt: String,

    /// Optional focus tag: when set and still active, context is drawn
    /// from that tag's thoughts.
    #[serde(default)]
    pub tag_id: Option<Uuid>,
}

/// Enhance a prompt with relevant non-fossil thoughts.
pub async fn enhance(
    State(state): State<SharedState>,
    Json(request): Json<EnhanceRequest>,
) -> Result<Json<EnhancedPrompt>> {
    validation::validate_prompt(&request.prompt).map_validation_err("prompt")?;

    let context = state
        .store
        .read()
        .enhancement_candidates(request.tag_id, ENHANCE_CONTEXT_CAP);

    let result = state.enhancer.enhance(&request.prompt, &context).await?;
    info!(context_used = result.context_used, "prompt enhanced");
    Ok(Json(result))
}
