//! Living Graph Library
//!
//! A metabolic knowledge-graph memory system: captured thoughts and their
//! extracted semantic tags carry a decaying energy budget ("ATP"), tags
//! compete for mentions so synonyms collapse onto one concept node, and
//! co-mentioned tags build a weighted, mutually-symmetric edge graph.
//!
//! # Core model
//! - Decay engine: per-tick energy cost for thoughts, tags and edges
//! - Tag resolution & competition: exact and fuzzy matching of extracted
//!   tag names onto existing concept nodes
//! - Co-mention reinforcement: pairwise edge strengthening per thought
//! - Store: single-writer owner of all graph state
//!
//! The extraction and enhancement collaborators (Anthropic Messages API)
//! are best-effort: every provider failure degrades to a local fallback or
//! an untagged-but-valid thought.

pub mod anthropic;
pub mod config;
pub mod constants;
pub mod decay;
pub mod enhancement;
pub mod errors;
pub mod extraction;
pub mod handlers;
pub mod persistence;
pub mod similarity;
pub mod store;
pub mod types;
pub mod validation;

// Re-export dependencies to ensure tests use the same version
pub use chrono;
pub use parking_lot;
pub use uuid;
