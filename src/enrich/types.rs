//! Enrichment data types

use crate::feed::FeedItem;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Generated markdown keyed by item id, then bot id
pub type BotContent = HashMap<String, HashMap<String, String>>;

/// Overview markdown keyed by day (`YYYY-MM-DD`)
pub type Overview = HashMap<String, String>;

/// Id and text of one item, as sent to the model
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemText {
    pub tw_id: String,
    pub content: String,
}

impl ItemText {
    pub fn new(tw_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            tw_id: tw_id.into(),
            content: content.into(),
        }
    }
}

impl From<&FeedItem> for ItemText {
    fn from(item: &FeedItem) -> Self {
        Self::new(&item.tw_id, &item.content)
    }
}

/// A category label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagInfo {
    pub tag_id: String,
    pub tag_name: String,
}

impl TagInfo {
    /// Id of the catch-all tag
    pub const OTHER_ID: &'static str = "other";

    pub fn new(tag_id: impl Into<String>, tag_name: impl Into<String>) -> Self {
        Self {
            tag_id: tag_id.into(),
            tag_name: tag_name.into(),
        }
    }

    /// The catch-all tag
    pub fn other() -> Self {
        Self::new(Self::OTHER_ID, "其他")
    }
}

/// Translated text for one item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Translation {
    pub tw_id: String,
    pub translated_content: String,
}

/// Tags chosen for one item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagAssignment {
    pub tw_id: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One bot's markdown for one item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BotOutput {
    pub tw_id: String,
    #[serde(default)]
    pub md: String,
}

/// Everything produced by [`Enricher::enrich`](super::Enricher::enrich)
#[derive(Debug, Clone, Default)]
pub struct Enrichment {
    /// Items with translations and tags applied, newest first
    pub items: Vec<FeedItem>,
    /// Generated tag set; empty when generation failed
    pub tags_info: Vec<TagInfo>,
    /// Per-item bot markdown
    pub bot_content: BotContent,
}
