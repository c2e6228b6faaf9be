//! HTTP handlers, organized by domain
//!
//! - `state`: shared application state (the single-writer store)
//! - `router`: route definitions
//! - `thoughts`: capture, listing, boost, re-analysis
//! - `tags`: semantic tag graph endpoints
//! - `enhance`: prompt enhancement
//! - `health`: health check

pub mod enhance;
pub mod health;
pub mod router;
pub mod state;
pub mod tags;
pub mod thoughts;

pub use router::build_router;
pub use state::{AppState, SharedState};
