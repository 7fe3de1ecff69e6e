//! Remote model endpoint configuration

use crate::core::gate::GateRequest;
use serde::{Deserialize, Serialize};

/// Where and how to reach the completion endpoint
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AiConfig {
    /// Chat completions URL
    #[serde(default)]
    pub endpoint: String,
    /// Bearer credential
    #[serde(default)]
    pub api_key: String,
    /// Model identifier
    #[serde(default)]
    pub model: String,
}

impl AiConfig {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build a gated request for `prompt`
    pub fn request(&self, prompt: impl Into<String>) -> GateRequest {
        GateRequest::new(&self.endpoint, &self.api_key, &self.model, prompt)
    }
}

// The key never ends up in logs.
impl std::fmt::Debug for AiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AiConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &if self.api_key.is_empty() { "" } else { "***" })
            .field("model", &self.model)
            .finish()
    }
}
