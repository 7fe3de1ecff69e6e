//! Test fixtures and data factories
//!
//! Provides factory methods for feeds and configurations with sensible
//! defaults.

use feed_enricher::config::{AiConfig, Config, FeedConfig, OutputConfig};
use serde_json::{Value, json};
use std::path::Path;

/// Factory for JSON Feed documents
pub struct FeedFactory;

impl FeedFactory {
    /// A feed for `handle` with `(id, text, date_published)` entries
    pub fn with_items(handle: &str, items: &[(&str, &str, &str)]) -> Value {
        let items: Vec<Value> = items
            .iter()
            .map(|(id, text, date)| {
                json!({
                    "id": id,
                    "url": format!("https://x.com/{}/status/{}", handle, id),
                    "content_text": format!("{} — {} (@{}) Jan 5, 2026", text, handle, handle),
                    "content_html": format!("<p>{}</p>", text),
                    "date_published": date,
                    "authors": [{"name": handle}]
                })
            })
            .collect();

        json!({
            "version": "https://jsonfeed.org/version/1.1",
            "title": format!("{} / X", handle),
            "home_page_url": format!("https://x.com/{}", handle),
            "items": items
        })
    }

    /// Three posts, two of them on 2026-01-05
    pub fn sample() -> Value {
        Self::with_items(
            "rustlang",
            &[
                ("100", "Rust 1.90 is out", "2026-01-05T09:00:00.000Z"),
                ("101", "This week in Rust 600", "2026-01-04T09:00:00.000Z"),
                ("102", "Cargo gets a new resolver", "2026-01-05T18:00:00.000Z"),
            ],
        )
    }
}

/// Factory for configurations
pub struct ConfigFactory;

impl ConfigFactory {
    /// Feed configuration reading `rss_urls`
    pub fn feed(rss_urls: Vec<String>) -> FeedConfig {
        serde_json::from_value(json!({
            "name": "Rust news",
            "feed_id": "rust-news",
            "feed_url": "https://example.com/rust-news",
            "avatar": "https://example.com/avatar.png",
            "version": "41",
            "rss_urls": rss_urls,
            "ai_bots": [{
                "bot_id": "release",
                "name": "Release bot",
                "avatar": "",
                "prompt": "Explain release announcements"
            }],
            "batch_size": 2,
            "max_concurrent": 2
        }))
        .expect("valid feed config")
    }

    /// Full configuration against a model at `endpoint`, writing into `output_dir`
    pub fn config(rss_urls: Vec<String>, endpoint: &str, output_dir: &Path) -> Config {
        let mut config = Config::new(
            Self::feed(rss_urls),
            AiConfig::new(endpoint, "sk-test", "test-model"),
        );
        config.output = OutputConfig {
            dir: output_dir.to_path_buf(),
            overview_day: Some("2026-01-05".to_string()),
        };
        config
    }
}
