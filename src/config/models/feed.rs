//! Feed configuration file model

use super::*;
use crate::enrich::TagInfo;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Contents of a feed configuration file
///
/// Keys this crate does not know about are kept in `extra` so that writing the
/// file back after a version bump does not lose them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FeedConfig {
    pub name: String,
    pub feed_id: String,
    #[serde(default)]
    pub feed_url: String,
    #[serde(default)]
    pub avatar: String,
    /// Monotonic counter, stored as a string
    #[serde(default)]
    pub version: String,
    /// JSON Feed URLs to ingest
    #[serde(default)]
    pub rss_urls: Vec<String>,
    #[serde(default)]
    pub ai_bots: Vec<BotConfig>,
    /// Tags carried over when tag generation produces none
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags_info: Vec<TagInfo>,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: usize,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub no_batch: bool,
    /// Rate budget and retry settings
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gate: Option<GateConfig>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FeedConfig {
    /// Increment the version counter and return `(old, new)`
    ///
    /// A missing or non-numeric version counts as zero.
    pub fn bump_version(&mut self) -> (u64, u64) {
        let current = self.version.trim().parse::<u64>().unwrap_or(0);
        let next = current + 1;
        self.version = next.to_string();
        (current, next)
    }
}

/// A content-generating bot applied to every item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotConfig {
    pub bot_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Instructions describing what the bot writes and for which items
    pub prompt: String,
}
