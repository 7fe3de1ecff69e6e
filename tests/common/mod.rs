//! Common test utilities for feed-enricher
//!
//! - Feed, bot and configuration fixtures
//! - wiremock servers that speak the completion SSE protocol and JSON Feed
//! - Decoding of compressed output files

pub mod fixtures;
pub mod server;

// Re-export commonly used items
pub use fixtures::{ConfigFactory, FeedFactory};
pub use server::{ModelServer, sse_body};

/// Read and decode a zlib-compressed JSON output file
pub async fn read_output<T: serde::de::DeserializeOwned>(path: impl AsRef<std::path::Path>) -> T {
    use std::io::Read;
    let bytes = tokio::fs::read(path).await.expect("Failed to read output file");
    let mut json = Vec::new();
    flate2::read::ZlibDecoder::new(bytes.as_slice())
        .read_to_end(&mut json)
        .expect("Output file is not zlib data");
    serde_json::from_slice(&json).expect("Output file is not JSON")
}

/// Skip test if environment variable is not set
#[macro_export]
macro_rules! skip_without_env {
    ($var:expr) => {
        if std::env::var($var).is_err() {
            eprintln!("Skipping test: {} environment variable not set", $var);
            return;
        }
    };
}
