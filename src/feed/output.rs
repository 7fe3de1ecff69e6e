//! Output files
//!
//! Every file holds zlib-compressed (level 9) JSON.

use super::types::Feed;
use crate::enrich::{BotContent, Overview};
use crate::utils::error::Result;
use flate2::Compression;
use flate2::write::ZlibEncoder;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File holding the enriched feed
pub const FEED_CONTENT_FILE: &str = "FEED_CONTENT";
/// File holding per-item bot content
pub const FEED_AI_BOT_FILE: &str = "FEED_AI_BOT";
/// Prefix of the overview file; the day follows as `YYYY_MM_DD`
pub const FEED_AI_OVERVIEW_PREFIX: &str = "FEED_AI_OVERVIEW_";

/// Name of the overview file for `day` (`YYYY-MM-DD`)
pub fn overview_file_name(day: &str) -> String {
    format!("{}{}", FEED_AI_OVERVIEW_PREFIX, day.replace('-', "_"))
}

/// Zlib-compress `data` at the best compression level
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 4), Compression::best());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

async fn write_compressed(path: &Path, json: Vec<u8>) -> Result<()> {
    let compressed = compress(&json)?;
    debug!(raw = json.len(), compressed = compressed.len(), "Compressed {}", path.display());
    tokio::fs::write(path, compressed).await?;
    Ok(())
}

/// Write the run's results into `dir` and return the written paths
///
/// The overview file is only written when an overview is given; its file
/// name uses the first day it contains.
pub async fn write_outputs(
    dir: &Path,
    feed: &Feed,
    bot_content: &BotContent,
    overview: Option<&Overview>,
) -> Result<Vec<PathBuf>> {
    tokio::fs::create_dir_all(dir).await?;
    let mut written = Vec::with_capacity(3);

    let feed_path = dir.join(FEED_CONTENT_FILE);
    write_compressed(&feed_path, serde_json::to_vec(feed)?).await?;
    info!("Saved compressed feed to: {}", feed_path.display());
    written.push(feed_path);

    let bots_path = dir.join(FEED_AI_BOT_FILE);
    write_compressed(&bots_path, serde_json::to_vec_pretty(bot_content)?).await?;
    info!("Saved compressed AI bots content to: {}", bots_path.display());
    written.push(bots_path);

    if let Some(overview) = overview {
        let mut days: Vec<&String> = overview.keys().collect();
        days.sort();
        if let Some(day) = days.first() {
            let overview_path = dir.join(overview_file_name(day));
            write_compressed(&overview_path, serde_json::to_vec_pretty(overview)?).await?;
            info!("Saved compressed overview to: {}", overview_path.display());
            written.push(overview_path);
        }
    }

    Ok(written)
}
