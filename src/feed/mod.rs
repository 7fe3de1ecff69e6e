//! Feed ingestion and output
//!
//! Downloads JSON Feeds, normalizes their entries into [`FeedItem`]s, and
//! writes the enriched results.

pub mod clean;
mod fetch;
mod output;
mod types;


pub use clean::{clean_content, extract_author, extract_media, is_retweet, normalize_feed};
pub use fetch::{DEFAULT_FEED_RETRIES, FeedFetcher};
pub use output::{
    FEED_AI_BOT_FILE, FEED_AI_OVERVIEW_PREFIX, FEED_CONTENT_FILE, compress, overview_file_name,
    write_outputs,
};
pub use types::{
    Attachment, Author, Feed, FeedAuthor, FeedItem, JsonFeed, JsonFeedItem, MediaItem, MediaKind,
};
