//! Normalization of raw feed entries

use super::types::{Author, FeedItem, JsonFeed, JsonFeedItem, MediaItem, MediaKind};
use regex::Regex;
use std::sync::LazyLock;

// "— Evan You (@youyuxi) Dec 23, 2025"
static SIGNATURE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"—\s+.*?\s+\(@.*?\)\s+\w+\s+\d{1,2},\s+\d{4}$").expect("Invalid signature regex")
});
static SIGNATURE_SUFFIX_LOOSE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"—\s+.*?\s+\(@.*?\)\s+.*$").expect("Invalid loose signature regex")
});
static VIDEO_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+Video$").expect("Invalid video suffix regex"));
static X_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"x\.com/([^/]+)").expect("Invalid x.com regex"));
static TWITTER_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"twitter\.com/([^/]+)").expect("Invalid twitter.com regex"));

const RETWEET_PREFIX: &str = "RT by @";
const AVATAR_BASE: &str = "https://unavatar.io/x/";

/// Strip the trailing author signature and "Video" marker from an item's text
pub fn clean_content(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let mut cleaned = SIGNATURE_SUFFIX.replace(text, "").trim().to_string();
    if cleaned == text {
        cleaned = SIGNATURE_SUFFIX_LOOSE.replace(text, "").trim().to_string();
    }

    VIDEO_SUFFIX.replace(&cleaned, "").trim().to_string()
}

/// Collect the item's image and attachments, without duplicates
///
/// Everything is typed as video when the text ends in "Video"; otherwise a
/// URL is a video when it points at a video thumbnail.
pub fn extract_media(item: &JsonFeedItem) -> Vec<MediaItem> {
    let has_video_suffix = item
        .content_text
        .as_deref()
        .is_some_and(|text| VIDEO_SUFFIX.is_match(text));

    let urls = item
        .image
        .iter()
        .chain(item.attachments.iter().filter_map(|a| a.url.as_ref()));

    let mut media: Vec<MediaItem> = Vec::new();
    for url in urls {
        if url.is_empty() || media.iter().any(|m| &m.url == url) {
            continue;
        }
        let kind = if has_video_suffix || url.contains("video_thumb") {
            MediaKind::Video
        } else {
            MediaKind::Image
        };
        media.push(MediaItem {
            url: url.clone(),
            kind,
        });
    }
    media
}

/// Derive the account from the feed's home page URL
pub fn extract_author(home_page_url: Option<&str>) -> Author {
    let home = home_page_url.unwrap_or_default();
    let handle = X_HANDLE
        .captures(home)
        .or_else(|| TWITTER_HANDLE.captures(home))
        .and_then(|caps| caps.get(1))
        .map_or("unknown", |m| m.as_str());

    Author {
        author_id: format!("@{}", handle),
        author_name: handle.to_string(),
        author_favicon: format!("{}{}", AVATAR_BASE, handle),
    }
}

/// True when the item's HTML marks it as a repost
pub fn is_retweet(item: &JsonFeedItem) -> bool {
    item.content
        .as_deref()
        .or(item.content_html.as_deref())
        .is_some_and(|html| html.starts_with(RETWEET_PREFIX))
}

/// Turn one raw entry into a [`FeedItem`]
pub fn normalize_item(item: JsonFeedItem, author: &Author) -> FeedItem {
    let media = extract_media(&item);
    let is_rt = is_retweet(&item);
    let content = clean_content(item.content_text.as_deref().unwrap_or_default());

    FeedItem {
        tw_id: item.id,
        url: item.url.unwrap_or_default(),
        content,
        origin_text: String::new(),
        date_published: item.date_published.unwrap_or_default(),
        author: author.clone(),
        authors: item.authors,
        media,
        is_rt,
        is_translated: false,
        tags: Vec::new(),
    }
}

/// Normalize every entry of a feed, in feed order
pub fn normalize_feed(feed: JsonFeed) -> Vec<FeedItem> {
    let author = extract_author(feed.home_page_url.as_deref());
    feed.items
        .into_iter()
        .map(|item| normalize_item(item, &author))
        .collect()
}
