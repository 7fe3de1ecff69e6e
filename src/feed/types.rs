//! Feed data types
//!
//! `JsonFeed*` types mirror the subset of JSON Feed 1.1 the pipeline reads.
//! [`FeedItem`] and [`Feed`] are the enriched output.

use crate::config::{BotConfig, FeedConfig};
use crate::enrich::TagInfo;
use serde::{Deserialize, Serialize};

/// A JSON Feed document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonFeed {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub home_page_url: Option<String>,
    #[serde(default)]
    pub items: Vec<JsonFeedItem>,
}

/// One entry of a JSON Feed
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JsonFeedItem {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub content_text: Option<String>,
    #[serde(default)]
    pub content_html: Option<String>,
    /// Non-standard HTML body some generators emit instead of `content_html`
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub date_published: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub authors: Vec<FeedAuthor>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Author entry as listed in the source feed
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedAuthor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Account a feed belongs to
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Author {
    pub author_id: String,
    pub author_name: String,
    pub author_favicon: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MediaItem {
    pub url: String,
    #[serde(rename = "type")]
    pub kind: MediaKind,
}

/// A normalized, enrichable item
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    pub tw_id: String,
    pub url: String,
    pub content: String,
    /// Text before translation; empty unless `is_translated`
    #[serde(rename = "originText")]
    pub origin_text: String,
    pub date_published: String,
    pub author: Author,
    pub authors: Vec<FeedAuthor>,
    pub media: Vec<MediaItem>,
    pub is_rt: bool,
    pub is_translated: bool,
    pub tags: Vec<String>,
}

/// The enriched feed written to `FEED_CONTENT`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feed {
    pub name: String,
    pub feed_id: String,
    pub feed_url: String,
    pub avatar: String,
    pub version: String,
    pub ai_bots: Vec<BotConfig>,
    pub list: Vec<FeedItem>,
    pub tags_info: Vec<TagInfo>,
}

impl Feed {
    /// Assemble the output feed
    ///
    /// Generated tags replace the configured ones unless generation produced
    /// none.
    pub fn assemble(config: &FeedConfig, list: Vec<FeedItem>, generated_tags: Vec<TagInfo>) -> Self {
        let tags_info = if generated_tags.is_empty() {
            config.tags_info.clone()
        } else {
            generated_tags
        };

        Self {
            name: config.name.clone(),
            feed_id: config.feed_id.clone(),
            feed_url: config.feed_url.clone(),
            avatar: config.avatar.clone(),
            version: config.version.clone(),
            ai_bots: config.ai_bots.clone(),
            list,
            tags_info,
        }
    }
}
