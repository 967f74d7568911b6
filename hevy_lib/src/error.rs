//! Error types for the Hevy API client.

use thiserror::Error;

/// Base error type for Hevy operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Api(#[from] ApiError),

    /// Failure with no HTTP response attached, passed through as the transport reported it.
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Raised when the client cannot be configured (e.g. missing or empty API key).
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raised when the API returns a non-2xx response.
///
/// `message` is always `API Error: <status> - <body as JSON>`.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ApiError {
    pub message: String,
    pub status_code: Option<u16>,
    pub response_data: Option<serde_json::Value>,
}

impl ApiError {
    pub fn new(
        message: impl Into<String>,
        status_code: Option<u16>,
        response_data: Option<serde_json::Value>,
    ) -> Self {
        Self {
            message: message.into(),
            status_code,
            response_data,
        }
    }

    /// Build the normalized error for a response with `status` and decoded `body`.
    pub fn from_response(status: u16, body: serde_json::Value) -> Self {
        let message = format!("API Error: {} - {}", status, body);
        Self::new(message, Some(status), Some(body))
    }
}

/// Failure reported by a [`crate::Transport`] implementation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    /// The server answered with a non-2xx status. `body` is the decoded JSON,
    /// or a JSON string holding the raw text when the body is not JSON.
    #[error("HTTP {status}: {body}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },

    /// No response was obtained (connect, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The resource path could not be turned into a request URL.
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}
