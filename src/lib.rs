//! # feed-enricher
//!
//! Fetches JSON Feeds, enriches their items through an OpenAI-compatible
//! streaming completion API, and writes the results as JSON.
//!
//! ## Features
//!
//! - **Bounded batching**: items are split into batches and a fixed number of
//!   batches run at once; results come back in batch order
//! - **Call gate**: one shared gate caps concurrent calls, keeps a rolling
//!   per-window budget and retries rate-limited calls after a cool-down
//! - **Partial results**: a failing batch only loses its own items
//! - **Streaming**: replies are decoded from Server-Sent Events as they arrive
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use feed_enricher::{run_batches, BatchOptions, CallGate, GateConfig, GateRequest};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gate = Arc::new(CallGate::new(GateConfig::default())?);
//!     let options = BatchOptions::new().with_max_concurrent(2);
//!
//!     let replies = run_batches(
//!         vec!["first post", "second post", "third post"],
//!         2,
//!         |batch, _index| {
//!             let gate = gate.clone();
//!             async move {
//!                 let request = GateRequest::new(
//!                     "https://api.example.com/v1/chat/completions",
//!                     "sk-...",
//!                     "gpt-4o-mini",
//!                     format!("Summarize: {:?}", batch),
//!                 );
//!                 gate.execute_collect(&request).await.map(|text| vec![text])
//!             }
//!         },
//!         &options,
//!     )
//!     .await;
//!
//!     println!("{} replies", replies.len());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod enrich;
pub mod feed;
pub mod pipeline;
pub mod utils;

// Re-export main types
pub use config::{AiConfig, BotConfig, Config, FeedConfig, GateConfig, OutputConfig};
pub use utils::error::{Error, Result};

// Export the dispatch engine
pub use core::batch::{
    Batch, BatchFailure, BatchOptions, BatchOutcome, partition, run_batches,
    run_batches_with_report,
};
pub use core::gate::{
    CallGate, FragmentStream, GateError, GateRequest, GateStats, HttpTransport, Transport,
};

// Export the pipeline
pub use enrich::{Enricher, Enrichment, TagInfo};
pub use feed::{Feed, FeedFetcher, FeedItem};
pub use pipeline::{RunSummary, run};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build time, seconds since the Unix epoch
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: env!("BUILD_TIME"),
            git_hash: env!("GIT_HASH"),
            rust_version: env!("RUST_VERSION"),
        }
    }
}

/// Build
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
