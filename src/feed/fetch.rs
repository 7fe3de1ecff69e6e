//! Feed retrieval

use super::clean::normalize_feed;
use super::types::{FeedItem, JsonFeed};
use crate::utils::error::{Error, Result};
use std::time::Duration;
use tracing::{error, info};

/// Extra attempts after a failed request
pub const DEFAULT_FEED_RETRIES: u32 = 2;

const FEED_TIMEOUT: Duration = Duration::from_secs(30);

/// Downloads JSON Feeds
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: reqwest::Client,
    retries: u32,
}

impl FeedFetcher {
    /// Create a fetcher with its own HTTP client
    pub fn new() -> Result<Self> {
        let client = reqwest::Client::builder().timeout(FEED_TIMEOUT).build()?;
        Ok(Self::with_client(client))
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            retries: DEFAULT_FEED_RETRIES,
        }
    }

    pub fn with_retries(mut self, retries: u32) -> Self {
        self.retries = retries;
        self
    }

    /// Download and parse one feed
    ///
    /// Failed requests and non-success statuses are retried; a body that is
    /// not a JSON Feed is not.
    pub async fn fetch_feed(&self, url: &str) -> Result<JsonFeed> {
        let attempts = self.retries + 1;
        let mut attempt = 0;

        let response = loop {
            attempt += 1;
            match self.request(url).await {
                Ok(response) => break response,
                Err(e) => {
                    error!(url, "Fetch failed for {} (Attempt {}/{}): {}", url, attempt, attempts, e);
                    if attempt >= attempts {
                        return Err(e);
                    }
                }
            }
        };

        response
            .json::<JsonFeed>()
            .await
            .map_err(|e| Error::feed(url, format!("Invalid JSON Feed: {}", e)))
    }

    async fn request(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::feed(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::feed(url, format!("Status {}", status.as_u16())));
        }
        Ok(response)
    }

    /// Fetch every feed in order and normalize their items
    ///
    /// Items are concatenated without deduplication. The first feed that
    /// cannot be fetched fails the whole call.
    pub async fn fetch_all(&self, urls: &[String]) -> Result<Vec<FeedItem>> {
        let mut items = Vec::new();

        for url in urls {
            info!("Fetching feed: {}", url);
            let feed = self.fetch_feed(url).await?;
            let normalized = normalize_feed(feed);
            info!(url = %url, items = normalized.len(), "Feed fetched");
            items.extend(normalized);
        }

        Ok(items)
    }
}
