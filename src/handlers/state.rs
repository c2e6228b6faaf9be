//! Shared application state
//!
//! One `GraphStore` behind one `parking_lot::RwLock` is the single writer
//! for all graph state. Handlers and the decay timer take the same lock,
//! which serializes decay, resolution, reinforcement and boosts with
//! respect to each other. No lock is ever held across an await point.

use anyhow::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::anthropic::AnthropicClient;
use crate::config::ServerConfig;
use crate::enhancement::PromptEnhancer;
use crate::extraction::{TagExtractor, ThoughtContext};
use crate::persistence::BlobStore;
use crate::store::GraphStore;

/// Shared application state
pub struct AppState {
    pub store: RwLock<GraphStore>,
    pub blobs: BlobStore,
    pub extractor: TagExtractor,
    pub enhancer: PromptEnhancer,
    pub config: ServerConfig,
}

/// Application state type alias
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Open persistence, load the previous session and wire up the
    /// provider clients.
    pub fn new(config: ServerConfig) -> Result<Self> {
        let blobs = BlobStore::open(&config.data_dir)?;
        let store = GraphStore::from_snapshot(blobs.load());

        info!(
            thoughts = store.thought_count(),
            tags = store.tag_count(),
            "graph store ready"
        );

        let client = AnthropicClient::new(
            config.anthropic_api_key.clone(),
            config.api_url.clone(),
        );
        let extractor = TagExtractor::new(client.clone(), config.extraction_model.clone());
        let enhancer = PromptEnhancer::new(client, config.enhancement_model.clone());

        Ok(Self {
            store: RwLock::new(store),
            blobs,
            extractor,
            enhancer,
            config,
        })
    }

    /// Best-effort snapshot after a mutation batch. Persistence failure is
    /// logged and swallowed: the in-memory state stays authoritative.
    pub fn persist(&self) {
        let snapshot = self.store.read().snapshot();
        if let Err(e) = self.blobs.save(&snapshot) {
            error!(error = %e, "snapshot save failed");
        }
    }

    /// Context lines for an extraction call: every stored thought except
    /// the one being analyzed.
    pub fn extraction_context(&self, exclude: Uuid) -> Vec<ThoughtContext> {
        self.store
            .read()
            .all_thoughts()
            .into_iter()
            .filter(|t| t.id != exclude)
            .map(|t| ThoughtContext {
                id: t.id,
                text: t.text,
                tags: t.tags,
            })
            .collect()
    }
}
