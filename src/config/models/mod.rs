//! Configuration data models
//!
//! This module defines all configuration structures used by the pipeline.

pub mod ai;
pub mod feed;
pub mod gate;
pub mod output;

// Re-export all configuration types
pub use ai::*;
pub use feed::*;
pub use gate::*;
pub use output::*;

/// Default items per batch
pub fn default_batch_size() -> usize {
    20
}

/// Default concurrency for batches and outbound calls
pub fn default_max_concurrent() -> usize {
    5
}

/// Default per-window budget ceiling
pub fn default_rate_ceiling() -> u64 {
    250_000
}

/// Default rolling window length
pub fn default_window_ms() -> u64 {
    60_000
}

/// Default wait added past the end of a window
pub fn default_safety_margin_ms() -> u64 {
    1_000
}

/// Default rate-limit retries
pub fn default_max_retries() -> u32 {
    3
}

/// Default wait before a rate-limit retry
pub fn default_retry_cooldown_ms() -> u64 {
    60_000
}

/// Default transport timeout
pub fn default_request_timeout_secs() -> u64 {
    600
}

/// Default output directory
pub fn default_output_dir() -> std::path::PathBuf {
    std::path::PathBuf::from("cache")
}
