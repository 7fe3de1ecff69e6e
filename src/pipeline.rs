//! One complete run: fetch, enrich, summarize, write

use crate::config::Config;
use crate::core::gate::CallGate;
use crate::enrich::Enricher;
use crate::feed::{Feed, FeedFetcher, write_outputs};
use crate::utils::error::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Items in the written feed
    pub items: usize,
    /// Items that were translated
    pub translated: usize,
    /// Items with bot content
    pub bot_items: usize,
    /// Day the overview covers, when one was written
    pub overview_day: Option<String>,
    /// Files written, in order
    pub written: Vec<PathBuf>,
}

/// Run the pipeline for `config`
///
/// Every model call goes through `gate`. A feed that cannot be fetched fails
/// the run; failed model tasks only leave their results out.
pub async fn run(config: &Config, fetcher: &FeedFetcher, gate: Arc<CallGate>) -> Result<RunSummary> {
    let items = fetcher.fetch_all(&config.feed.rss_urls).await?;
    info!(items = items.len(), "Fetched all feeds");

    let enricher = Enricher::from_config(config, gate);
    let enrichment = enricher.enrich(items, &config.feed.ai_bots).await;

    let translated = enrichment.items.iter().filter(|i| i.is_translated).count();
    let feed = Feed::assemble(&config.feed, enrichment.items, enrichment.tags_info);

    let (overview_day, overview) = if feed.list.is_empty() {
        (None, None)
    } else {
        let day = config.output.overview_day_or_yesterday();
        info!("Generating overview for day: {}", day);
        let overview = enricher.generate_overview(&feed.list, &day).await;
        if overview.is_none() {
            warn!(day = %day, "Overview generation failed, no overview written");
        }
        (overview.as_ref().map(|_| day), overview)
    };

    let written = write_outputs(
        &config.output.dir,
        &feed,
        &enrichment.bot_content,
        overview.as_ref(),
    )
    .await?;

    Ok(RunSummary {
        items: feed.list.len(),
        translated,
        bot_items: enrichment.bot_content.len(),
        overview_day,
        written,
    })
}
