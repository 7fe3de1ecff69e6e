//! Error handling for the enrichment pipeline
//!
//! This module defines the crate-level error type used outside of the call gate.

use crate::core::gate::GateError;
use thiserror::Error;

/// Result type alias for the pipeline
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// HTTP client errors
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Outbound model call errors
    #[error("Gate error: {0}")]
    Gate(#[from] GateError),

    /// Feed retrieval errors
    #[error("Feed error: {url}: {message}")]
    Feed { url: String, message: String },
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a feed error
    pub fn feed(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Feed {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Whether retrying the failed operation could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::HttpClient(e) => e.is_timeout() || e.is_connect(),
            Error::Gate(e) => e.is_retryable(),
            Error::Feed { .. } => true,
            _ => false,
        }
    }
}
