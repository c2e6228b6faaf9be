//! Configuration management
//!
//! All configurable parameters in one place with environment variable
//! overrides. Sensible defaults, configurable in production.

use std::env;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

use crate::constants::{DECAY_INTERVAL_SECS_DEFAULT, THOUGHT_BOOST_DEFAULT};

/// Default Anthropic Messages API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";

/// Model used for tag extraction. Small and fast; extraction runs on every
/// captured thought.
pub const DEFAULT_EXTRACTION_MODEL: &str = "claude-3-haiku-20240307";

/// Model used for prompt enhancement, where output quality matters more
/// than latency.
pub const DEFAULT_ENHANCEMENT_MODEL: &str = "claude-3-opus-20240229";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port for the HTTP server
    pub port: u16,

    /// Directory for the embedded blob store
    pub data_dir: PathBuf,

    /// Cadence of the metabolic decay tick
    pub decay_interval: Duration,

    /// Manual boost amount applied to a thought
    pub thought_boost: f32,

    /// Anthropic API key. Absent key disables provider calls per request,
    /// not the whole process.
    pub anthropic_api_key: Option<String>,

    /// Anthropic Messages API endpoint
    pub api_url: String,

    /// Model for tag extraction
    pub extraction_model: String,

    /// Model for prompt enhancement
    pub enhancement_model: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            data_dir: PathBuf::from("./living_graph_data"),
            decay_interval: Duration::from_secs(DECAY_INTERVAL_SECS_DEFAULT),
            thought_boost: THOUGHT_BOOST_DEFAULT,
            anthropic_api_key: None,
            api_url: DEFAULT_API_URL.to_string(),
            extraction_model: DEFAULT_EXTRACTION_MODEL.to_string(),
            enhancement_model: DEFAULT_ENHANCEMENT_MODEL.to_string(),
        }
    }
}

impl ServerConfig {
    /// Load from environment variables.
    ///
    /// Recognized variables:
    /// - `LIVING_GRAPH_PORT`
    /// - `LIVING_GRAPH_DATA_DIR`
    /// - `LIVING_GRAPH_DECAY_INTERVAL_SECS`
    /// - `LIVING_GRAPH_THOUGHT_BOOST`
    /// - `LIVING_GRAPH_API_URL`
    /// - `LIVING_GRAPH_EXTRACTION_MODEL`
    /// - `LIVING_GRAPH_ENHANCEMENT_MODEL`
    /// - `ANTHROPIC_API_KEY`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = env::var("LIVING_GRAPH_PORT") {
            if let Ok(port) = val.parse() {
                config.port = port;
            }
        }

        if let Ok(dir) = env::var("LIVING_GRAPH_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }

        if let Ok(val) = env::var("LIVING_GRAPH_DECAY_INTERVAL_SECS") {
            if let Ok(secs) = val.parse::<u64>() {
                if secs > 0 {
                    config.decay_interval = Duration::from_secs(secs);
                }
            }
        }

        if let Ok(val) = env::var("LIVING_GRAPH_THOUGHT_BOOST") {
            if let Ok(boost) = val.parse::<f32>() {
                if boost > 0.0 {
                    config.thought_boost = boost;
                }
            }
        }

        if let Ok(url) = env::var("LIVING_GRAPH_API_URL") {
            config.api_url = url;
        }

        if let Ok(model) = env::var("LIVING_GRAPH_EXTRACTION_MODEL") {
            config.extraction_model = model;
        }

        if let Ok(model) = env::var("LIVING_GRAPH_ENHANCEMENT_MODEL") {
            config.enhancement_model = model;
        }

        config.anthropic_api_key = env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.is_empty());

        if config.anthropic_api_key.is_none() {
            tracing::warn!(
                "ANTHROPIC_API_KEY not set; thoughts will be captured without tags and \
                 prompt enhancement will be refused"
            );
        }

        info!(
            port = config.port,
            data_dir = %config.data_dir.display(),
            decay_interval_secs = config.decay_interval.as_secs(),
            "configuration loaded"
        );

        config
    }
}
