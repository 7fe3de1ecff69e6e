//! Request and statistics types for the call gate

use tokio_util::sync::CancellationToken;

/// A single outbound completion request
#[derive(Debug, Clone)]
pub struct GateRequest {
    /// Full URL of the chat completions endpoint
    pub endpoint: String,
    /// Bearer credential
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Prompt sent as the only user message
    pub prompt: String,
    /// Budget units charged for this call; defaults to the prompt length
    pub cost: Option<u64>,
    /// Abandons the call when cancelled
    pub cancel: Option<CancellationToken>,
}

impl GateRequest {
    /// Create a new request
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            model: model.into(),
            prompt: prompt.into(),
            cost: None,
            cancel: None,
        }
    }

    /// Override the budget cost of this request
    pub fn with_cost(mut self, cost: u64) -> Self {
        self.cost = Some(cost);
        self
    }

    /// Attach a cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Cost charged against the rolling budget
    ///
    /// One unit per prompt character unless overridden.
    pub fn estimated_cost(&self) -> u64 {
        self.cost
            .unwrap_or_else(|| self.prompt.chars().count() as u64)
    }
}

/// Point-in-time view of a gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateStats {
    /// Calls currently holding a slot
    pub in_flight: usize,
    /// Highest number of simultaneous calls observed
    pub peak_in_flight: usize,
    /// Configured slot count
    pub max_concurrent: usize,
    /// Units charged in the current window
    pub window_usage: u64,
    /// Calls that were admitted
    pub admitted: u64,
    /// Rate-limit retries performed
    pub rate_limit_retries: u64,
}
