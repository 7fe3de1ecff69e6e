//! Configuration loading and validation integration tests

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use feed_enricher::config::{AiConfig, Config, Validate};
    use feed_enricher::Error;

    const FEED_YAML: &str = r#"
name: Rust news
feed_id: rust-news
version: "9"
rss_urls:
  - https://rss.app/feeds/v1.1/rust.json
ai_bots:
  - bot_id: release
    name: Release bot
    prompt: Explain release announcements
batch_size: 10
max_concurrent: 3
gate:
  rate_ceiling: 100000
  retry_cooldown_ms: 30000
homepage_theme: dark
"#;

    #[tokio::test]
    async fn test_yaml_config_round_trip_through_bump() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("feed.yaml");
        tokio::fs::write(&path, FEED_YAML).await.unwrap();

        let mut config = Config::from_file(&path).await.unwrap();
        config.ai = AiConfig::new("https://api.example.com/v1/chat/completions", "sk", "m");
        config.validate().unwrap();

        let gate = config.gate_config();
        assert_eq!(gate.max_concurrent, 3);
        assert_eq!(gate.rate_ceiling, 100_000);
        assert_eq!(gate.retry_cooldown().as_secs(), 30);
        assert_eq!(gate.max_retries, 3);

        assert_eq!(config.bump_version().await.unwrap(), 10);

        let reloaded = Config::from_file(&path).await.unwrap();
        assert_eq!(reloaded.feed.version, "10");
        assert_eq!(reloaded.feed.ai_bots, config.feed.ai_bots);
        assert_eq!(
            reloaded.feed.extra.get("homepage_theme"),
            Some(&serde_json::json!("dark"))
        );
    }

    #[test]
    fn test_missing_model_settings_fail_validation() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigFactory::config(vec![], "https://api.example.com", dir.path());
        config.validate().unwrap();

        config.ai = AiConfig::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("AI_ENDPOINT is not set")));

        config.ai = AiConfig::new("https://api.example.com", "", "m");
        assert!(config.validate().unwrap_err().to_string().contains("AI_API_KEY"));
    }

    #[test]
    fn test_invalid_feed_settings() {
        let mut feed = ConfigFactory::feed(vec!["ftp://example.com/feed".to_string()]);
        assert!(feed.validate().unwrap_err().contains("http"));

        feed.rss_urls.clear();
        feed.ai_bots.push(feed.ai_bots[0].clone());
        assert!(feed.validate().unwrap_err().contains("Duplicate bot_id"));
    }

    #[test]
    fn test_invalid_overview_day() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ConfigFactory::config(vec![], "https://api.example.com", dir.path());
        config.output.overview_day = Some("05/01/2026".to_string());

        assert!(config.validate().unwrap_err().to_string().contains("overview day"));
    }
}
