//! Errors surfaced by the call gate

use thiserror::Error;

/// Failure of a single gated call
#[derive(Error, Debug)]
pub enum GateError {
    /// Non-success response from the remote service
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The remote service reported quota exhaustion (HTTP 429)
    #[error("HTTP 429: rate limited: {body}")]
    RateLimited { body: String },

    /// Connection or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Request body could not be encoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The caller's cancellation token fired
    #[error("Request cancelled")]
    Cancelled,

    /// The gate's admission queue was closed
    #[error("Call gate closed")]
    Closed,
}

impl GateError {
    /// Map a response status and body onto the matching variant
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        if status == 429 {
            GateError::RateLimited { body }
        } else {
            GateError::Http { status, body }
        }
    }

    /// Whether this failure is a rate-limit signal
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GateError::RateLimited { .. })
    }

    /// Status code carried by the failure, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            GateError::Http { status, .. } => Some(*status),
            GateError::RateLimited { .. } => Some(429),
            _ => None,
        }
    }

    /// Whether a later attempt could plausibly succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            GateError::RateLimited { .. } | GateError::Network(_) => true,
            GateError::Http { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl From<reqwest::Error> for GateError {
    fn from(err: reqwest::Error) -> Self {
        GateError::Network(err.to_string())
    }
}
