//! Configuration management for the pipeline
//!
//! The feed file (JSON or YAML) describes what to ingest and how to batch it.
//! The model endpoint and output location come from the environment.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::core::batch::BatchOptions;
use crate::utils::error::{Error, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Main configuration struct for the pipeline
#[derive(Debug, Clone)]
pub struct Config {
    /// Feed file contents
    pub feed: FeedConfig,
    /// Model endpoint
    pub ai: AiConfig,
    /// Output settings
    pub output: OutputConfig,
    /// File the feed configuration was read from
    pub source: Option<PathBuf>,
}

impl Config {
    /// Create a configuration from parts
    pub fn new(feed: FeedConfig, ai: AiConfig) -> Self {
        Self {
            feed,
            ai,
            output: OutputConfig::default(),
            source: None,
        }
    }

    /// Load the feed configuration from file
    ///
    /// Files ending in `.json` are parsed as JSON, anything else as YAML.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading config from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| Error::config(format!("Failed to read config file: {}", e)))?;

        let feed = parse_feed_config(path, &content)?;
        debug!(feed_id = %feed.feed_id, "Configuration loaded successfully");

        Ok(Self {
            feed,
            ai: AiConfig::default(),
            output: OutputConfig::default(),
            source: Some(path.to_path_buf()),
        })
    }

    /// Apply `AI_MODEL`, `AI_ENDPOINT`, `AI_API_KEY`, `OUTPUT_DIR` and `OVERVIEW_DAY`
    pub fn apply_env(&mut self) {
        if let Ok(model) = env::var("AI_MODEL") {
            self.ai.model = model;
        }
        if let Ok(endpoint) = env::var("AI_ENDPOINT") {
            self.ai.endpoint = endpoint;
        }
        if let Ok(api_key) = env::var("AI_API_KEY") {
            self.ai.api_key = api_key;
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            self.output.dir = PathBuf::from(dir);
        }
        if let Ok(day) = env::var("OVERVIEW_DAY") {
            self.output.overview_day = Some(day);
        }
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.feed.validate().map_err(Error::validation)?;
        self.ai.validate().map_err(Error::validation)?;
        self.output.validate().map_err(Error::validation)?;
        Ok(())
    }

    /// Increment the feed version and write the file back
    pub async fn bump_version(&mut self) -> Result<u64> {
        let (old, new) = self.feed.bump_version();
        info!("Version updated: {} -> {}", old, new);

        if let Some(path) = &self.source {
            let content = serialize_feed_config(path, &self.feed)?;
            tokio::fs::write(path, content).await?;
            info!("Config updated at: {:?}", path);
        }

        Ok(new)
    }

    /// Gate settings, with the feed's concurrency applied
    pub fn gate_config(&self) -> GateConfig {
        self.feed
            .gate
            .clone()
            .unwrap_or_default()
            .with_max_concurrent(self.feed.max_concurrent)
    }

    /// Scheduler settings for the feed
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::new()
            .with_max_concurrent(self.feed.max_concurrent)
            .with_disable_batch(self.feed.no_batch)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn parse_feed_config(path: &Path, content: &str) -> Result<FeedConfig> {
    let parsed = if is_json(path) {
        serde_json::from_str(content).map_err(|e| e.to_string())
    } else {
        serde_yaml::from_str(content).map_err(|e| e.to_string())
    };
    parsed.map_err(|e| Error::config(format!("Failed to parse config: {}", e)))
}

fn serialize_feed_config(path: &Path, feed: &FeedConfig) -> Result<String> {
    if is_json(path) {
        Ok(serde_json::to_string_pretty(feed)?)
    } else {
        Ok(serde_yaml::to_string(feed)?)
    }
}
