//! Transport used by the call gate to reach the remote service

use super::error::GateError;
use super::types::GateRequest;
use crate::core::streaming::content_stream;
use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

/// Lazy, finite, non-restartable sequence of text fragments
pub type FragmentStream = BoxStream<'static, Result<String, GateError>>;

/// Issues one completion request and exposes its streamed text
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return its fragment stream
    ///
    /// A non-success status must be reported as an error here, before any
    /// fragment is produced.
    async fn open(&self, request: &GateRequest) -> Result<FragmentStream, GateError>;
}

/// Chat completions request body
#[derive(Debug, Serialize)]
struct ChatRequestBody<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// OpenAI-compatible streaming transport over HTTP
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with a per-request timeout
    pub fn new(timeout: Duration) -> Result<Self, GateError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GateError::Network(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }

    /// Wrap an existing client
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn open(&self, request: &GateRequest) -> Result<FragmentStream, GateError> {
        let body = ChatRequestBody {
            model: &request.model,
            messages: [ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            stream: true,
        };

        debug!(endpoint = %request.endpoint, model = %request.model, "Sending completion request");

        let response = self
            .client
            .post(&request.endpoint)
            .bearer_auth(&request.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let reason = status.canonical_reason().unwrap_or("");
            return Err(GateError::from_status(
                status.as_u16(),
                format!("{} - {}", reason, text),
            ));
        }

        Ok(content_stream(response.bytes_stream()))
    }
}
