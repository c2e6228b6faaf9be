//! Semantic tag handlers: graph listing, boost and query-by-tag

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::Serialize;
use uuid::Uuid;

use super::state::SharedState;
use crate::errors::Result;
use crate::types::{SemanticTag, Thought};

/// Tag view with derived status, what the graph panel renders.
#[derive(Debug, Serialize)]
pub struct TagView {
    #[serde(flatten)]
    pub tag: SemanticTag,
    pub status: &'static str,
}

impl From<SemanticTag> for TagView {
    fn from(tag: SemanticTag) -> Self {
        let status = tag.status().as_str();
        Self { tag, status }
    }
}

/// List all semantic tags in creation order, edges included.
pub async fn list(State(state): State<SharedState>) -> Json<Vec<TagView>> {
    Json(
        state
            .store
            .read()
            .all_tags()
            .into_iter()
            .map(TagView::from)
            .collect(),
    )
}

/// Manually boost a tag's energy.
pub async fn boost(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TagView>> {
    let boosted = state.store.write().boost_tag(id)?;
    state.persist();
    Ok(Json(TagView::from(boosted)))
}

/// Thoughts associated with one tag, newest first.
pub async fn thoughts(
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Thought>>> {
    Ok(Json(state.store.read().thoughts_for_tag(id)?))
}
