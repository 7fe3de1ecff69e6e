//! Call gate configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Limits applied to outbound model calls
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GateConfig {
    /// Maximum calls in flight at once
    ///
    /// Not read from the `gate` section of a feed file; the feed's own
    /// `max_concurrent` is applied by `Config::gate_config`.
    #[serde(skip, default = "default_max_concurrent")]
    pub max_concurrent: usize,
    /// Budget units allowed per window before callers are held back
    #[serde(default = "default_rate_ceiling")]
    pub rate_ceiling: u64,
    /// Length of the rolling window in milliseconds
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    /// Extra wait added after the window expires, in milliseconds
    #[serde(default = "default_safety_margin_ms")]
    pub safety_margin_ms: u64,
    /// Retries for rate-limited (429) calls
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    /// Wait before each rate-limit retry, in milliseconds
    #[serde(default = "default_retry_cooldown_ms")]
    pub retry_cooldown_ms: u64,
    /// Transport timeout for one call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            max_concurrent: default_max_concurrent(),
            rate_ceiling: default_rate_ceiling(),
            window_ms: default_window_ms(),
            safety_margin_ms: default_safety_margin_ms(),
            max_retries: default_max_retries(),
            retry_cooldown_ms: default_retry_cooldown_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl GateConfig {
    /// Set the slot count
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Set the per-window ceiling
    pub fn with_rate_ceiling(mut self, ceiling: u64) -> Self {
        self.rate_ceiling = ceiling;
        self
    }

    /// Set the rate-limit retry policy
    pub fn with_retries(mut self, max_retries: u32, cooldown: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_cooldown_ms = cooldown.as_millis() as u64;
        self
    }

    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    pub fn safety_margin(&self) -> Duration {
        Duration::from_millis(self.safety_margin_ms)
    }

    pub fn retry_cooldown(&self) -> Duration {
        Duration::from_millis(self.retry_cooldown_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
