//! Thought handlers: capture, listing, boost and the re-analysis sweep

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use super::state::SharedState;
use crate::errors::{Result, ValidationErrorExt};
use crate::types::Thought;
use crate::validation;

/// Capture request - a new free-text thought
#[derive(Debug, Deserialize)]
pub struct CaptureRequest {
    pub text: String,
}

/// Re-analysis sweep response
#[derive(Debug, Serialize)]
pub struct ReanalyzeResponse {
    pub analyzed: usize,
    pub failed: usize,
}

/// Capture a new thought.
///
/// The thought is created and persisted immediately; tag extraction runs
/// afterwards as a best-effort enrichment. If the extraction call fails
/// the thought simply keeps empty tags - capture never fails because the
/// provider did.
pub async fn capture(
    State(state): State<SharedState>,
    Json(request): Json<CaptureRequest>,
) -> Result<Json<Thought>> {
    validation::validate_thought_text(&request.text).map_validation_err("text")?;

    let now = chrono::Utc::now();
    let thought = state.store.write().ingest(request.text.clone(), now);
    state.persist();
    info!(thought_id = %thought.id, "thought captured");

    let context = state.extraction_context(thought.id);
    match state.extractor.extract(&request.text, &context).await {
        Ok(payload) => {
            let candidates = validation::sanitize_tag_names(payload.tags);
            let now = chrono::Utc::now();
            if let Err(e) = state
                .store
                .write()
                .apply_extraction(thought.id, &candidates, now)
            {
                warn!(thought_id = %thought.id, error = %e, "tag resolution failed");
            }
            state.persist();
        }
        Err(e) => {
            warn!(thought_id = %thought.id, error = %e,
                  "extraction failed, thought kept without tags");
        }
    }

    let updated = state
        .store
        .read()
        .thought(thought.id)
        .cloned()
        .unwrap_or(thought);
    Ok(Json(updated))
}

/// List all thoughts, newest first.
pub async fn list(State(state): State<SharedState>) -> Json<Vec<Thought>> {
    Json(state.store.read().all_thoughts())
}

/// Manually boost a thought's energy.
pub async fn boost(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Thought>> {
    let boosted = state
        .store
        .write()
        .boost_thought(id, state.config.thought_boost)?;
    state.persist();
    Ok(Json(boosted))
}

/// Re-run extraction over every stored thought, sequentially.
///
/// Each thought's resolution and reinforcement applies to the store as one
/// atomic batch, in completion order. Individual failures are counted and
/// skipped; the sweep always finishes.
pub async fn reanalyze(State(state): State<SharedState>) -> Json<ReanalyzeResponse> {
    let thoughts: Vec<(Uuid, String)> = state
        .store
        .read()
        .all_thoughts()
        .into_iter()
        .map(|t| (t.id, t.text))
        .collect();

    let mut analyzed = 0;
    let mut failed = 0;

    for (thought_id, text) in thoughts {
        let context = state.extraction_context(thought_id);
        match state.extractor.extract(&text, &context).await {
            Ok(payload) => {
                let candidates = validation::sanitize_tag_names(payload.tags);
                let now = chrono::Utc::now();
                match state
                    .store
                    .write()
                    .apply_extraction(thought_id, &candidates, now)
                {
                    Ok(_) => analyzed += 1,
                    Err(e) => {
                        warn!(thought_id = %thought_id, error = %e, "re-analysis skipped");
                        failed += 1;
                    }
                }
            }
            Err(e) => {
                warn!(thought_id = %thought_id, error = %e, "re-analysis extraction failed");
                failed += 1;
            }
        }
    }

    state.persist();
    info!(analyzed, failed, "re-analysis sweep finished");
    Json(ReanalyzeResponse { analyzed, failed })
}
