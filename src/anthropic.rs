//! Minimal Anthropic Messages API client
//!
//! One completion call shape shared by tag extraction and prompt
//! enhancement. Callers own prompt construction and response parsing; this
//! module only speaks the wire protocol.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::errors::{AppError, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Request body for the Messages API
#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

/// Response body from the Messages API
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Shared HTTP client for the Anthropic Messages API.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
}

impl AnthropicClient {
    pub fn new(api_key: Option<String>, api_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            api_url,
        }
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Send a single-turn user prompt and return the model's text output.
    pub async fn complete(
        &self,
        model: &str,
        prompt: String,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(AppError::ProviderNotConfigured)?;

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature,
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ProviderError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ProviderError(format!(
                "HTTP {status}: {body}"
            )));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| AppError::ProviderError(format!("invalid response body: {e}")))?;

        let text = parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| AppError::ProviderError("empty response content".to_string()))?;

        debug!(model, chars = text.len(), "completion received");
        Ok(text)
    }
}
