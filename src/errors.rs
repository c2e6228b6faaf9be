//! Structured error types with machine-readable codes
//!
//! Every error carries a code and an HTTP status so clients can react
//! without parsing message strings. Core decay/resolution logic never sees
//! these: all failures stay at the ingestion/enhancement boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Structured error response for API clients
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error types with proper categorization
#[derive(Debug)]
pub enum AppError {
    // Validation errors (400)
    InvalidInput { field: String, reason: String },

    // Not found errors (404)
    ThoughtNotFound(String),
    TagNotFound(String),

    // Provider errors
    /// No API key configured. Fatal for the request, not for the process.
    ProviderNotConfigured,
    /// The provider call itself failed (transport, HTTP status, bad payload).
    ProviderError(String),

    // Internal errors (500)
    StorageError(String),
    SerializationError(String),

    // Generic wrapper for external errors
    Internal(anyhow::Error),
}

impl AppError {
    /// Get error code for client identification
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::ThoughtNotFound(_) => "THOUGHT_NOT_FOUND",
            Self::TagNotFound(_) => "TAG_NOT_FOUND",
            Self::ProviderNotConfigured => "PROVIDER_NOT_CONFIGURED",
            Self::ProviderError(_) => "PROVIDER_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::SerializationError(_) => "SERIALIZATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::ThoughtNotFound(_) | Self::TagNotFound(_) => StatusCode::NOT_FOUND,
            Self::ProviderNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ProviderError(_) => StatusCode::BAD_GATEWAY,
            Self::StorageError(_) | Self::SerializationError(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get detailed error message
    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason } => {
                format!("Invalid input for field '{field}': {reason}")
            }
            Self::ThoughtNotFound(id) => format!("Thought not found: {id}"),
            Self::TagNotFound(id) => format!("Tag not found: {id}"),
            Self::ProviderNotConfigured => {
                "API key not configured (set ANTHROPIC_API_KEY)".to_string()
            }
            Self::ProviderError(msg) => format!("Provider call failed: {msg}"),
            Self::StorageError(msg) => format!("Storage error: {msg}"),
            Self::SerializationError(msg) => format!("Serialization error: {msg}"),
            Self::Internal(err) => format!("Internal error: {err}"),
        }
    }

    /// Convert to structured error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.code().to_string(),
            message: self.message(),
            details: None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

/// Axum IntoResponse implementation for proper HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = self.to_response();

        (status, Json(body)).into_response()
    }
}

/// Helper trait to convert validation errors
pub trait ValidationErrorExt<T> {
    fn map_validation_err(self, field: &str) -> Result<T>;
}

impl<T> ValidationErrorExt<T> for anyhow::Result<T> {
    fn map_validation_err(self, field: &str) -> Result<T> {
        self.map_err(|e| AppError::InvalidInput {
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Type alias for Results using AppError
pub type Result<T> = std::result::Result<T, AppError>;
