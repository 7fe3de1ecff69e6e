//! Full pipeline runs against mock feed and model servers

#[cfg(test)]
mod tests {
    use crate::common::{ConfigFactory, FeedFactory, ModelServer, read_output};
    use feed_enricher::feed::{FEED_AI_BOT_FILE, FEED_CONTENT_FILE};
    use feed_enricher::utils::logging::TASK_LOG_FILE;
    use feed_enricher::{CallGate, Error, Feed, FeedFetcher, TagInfo, run};
    use std::sync::Arc;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn feed_server(status: u16) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed.json"))
            .respond_with(ResponseTemplate::new(status).set_body_json(FeedFactory::sample()))
            .mount(&server)
            .await;
        server
    }

    async fn scripted_model() -> ModelServer {
        let model = ModelServer::start().await;
        model
            .reply_when(
                "professional translator",
                &[
                    r#"<Translate>{"data": [{"tw_id": "100", "#,
                    r#""translated_content": "Rust 1.90 发布了"}]}</Translate>"#,
                ],
            )
            .await;
        model
            .reply_when(
                "content classification expert",
                &[r#"<TagsInfo>{"tags_info": [{"tag_id": "release", "tag_name": "发布"}, {"tag_id": "news", "tag_name": "新闻"}]}</TagsInfo>"#],
            )
            .await;
        model
            .reply_when(
                "You assign tags",
                &[r#"<TagsData>{"data": [{"tw_id": "100", "tags": ["release"]}, {"tw_id": "101", "tags": ["news"]}, {"tw_id": "102", "tags": ["release"]}]}</TagsData>"#],
            )
            .await;
        model
            .reply_when(
                "strictly follows its rules",
                &[r#"<AIBOT>{"data": [{"tw_id": "100", "md": "Upgrade now"}]}</AIBOT>"#],
            )
            .await;
        model.reply(&["# Overview\n", "Two releases today"]).await;
        model
    }

    #[tokio::test]
    async fn test_full_run_writes_enriched_outputs() {
        let feeds = feed_server(200).await;
        let model = scripted_model().await;
        let out = tempfile::tempdir().unwrap();
        let config = ConfigFactory::config(
            vec![format!("{}/feed.json", feeds.uri())],
            &model.endpoint(),
            out.path(),
        );
        let gate = Arc::new(CallGate::new(config.gate_config()).unwrap());

        let summary = run(&config, &FeedFetcher::new().unwrap(), gate.clone())
            .await
            .unwrap();

        assert_eq!(summary.items, 3);
        assert_eq!(summary.translated, 1);
        assert_eq!(summary.bot_items, 1);
        assert_eq!(summary.overview_day.as_deref(), Some("2026-01-05"));
        assert_eq!(summary.written.len(), 3);
        assert!(gate.stats().await.peak_in_flight <= 2);

        let feed: Feed = read_output(out.path().join(FEED_CONTENT_FILE)).await;
        assert_eq!(feed.feed_id, "rust-news");
        assert_eq!(feed.version, "41");
        assert!(feed.tags_info.contains(&TagInfo::other()));

        let ids: Vec<&str> = feed.list.iter().map(|i| i.tw_id.as_str()).collect();
        assert_eq!(ids, vec!["102", "100", "101"]);

        let translated = &feed.list[1];
        assert!(translated.is_translated);
        assert_eq!(translated.content, "Rust 1.90 发布了");
        assert_eq!(translated.origin_text, "Rust 1.90 is out");
        assert_eq!(translated.tags, vec!["release"]);
        assert_eq!(translated.author.author_id, "@rustlang");

        let bots: serde_json::Value = read_output(out.path().join(FEED_AI_BOT_FILE)).await;
        assert_eq!(bots["100"]["release"], "Upgrade now");

        let overview: serde_json::Value =
            read_output(out.path().join("FEED_AI_OVERVIEW_2026_01_05")).await;
        assert_eq!(overview["2026-01-05"], "# Overview\nTwo releases today");
    }

    #[tokio::test]
    async fn test_feed_failure_aborts_run() {
        let feeds = feed_server(404).await;
        let model = ModelServer::start().await;
        let out = tempfile::tempdir().unwrap();
        let config = ConfigFactory::config(
            vec![format!("{}/feed.json", feeds.uri())],
            &model.endpoint(),
            out.path(),
        );
        let gate = Arc::new(CallGate::new(config.gate_config()).unwrap());

        let err = run(&config, &FeedFetcher::new().unwrap(), gate).await.unwrap_err();

        assert!(matches!(err, Error::Feed { .. }));
        assert_eq!(model.request_count().await, 0);
        assert!(!out.path().join(FEED_CONTENT_FILE).exists());
    }

    #[tokio::test]
    async fn test_model_outage_still_writes_feed() {
        let feeds = feed_server(200).await;
        let model = ModelServer::start().await;
        model.fail_next(503, 1000).await;
        let out = tempfile::tempdir().unwrap();
        let config = ConfigFactory::config(
            vec![format!("{}/feed.json", feeds.uri())],
            &model.endpoint(),
            out.path(),
        );
        let gate = Arc::new(CallGate::new(config.gate_config()).unwrap());

        let summary = run(&config, &FeedFetcher::new().unwrap(), gate).await.unwrap();

        assert_eq!(summary.items, 3);
        assert_eq!(summary.translated, 0);
        assert_eq!(summary.overview_day, None);
        assert_eq!(summary.written.len(), 2);

        let feed: Feed = read_output(out.path().join(FEED_CONTENT_FILE)).await;
        assert!(feed.list.iter().all(|i| !i.is_translated && i.tags.is_empty()));
        assert!(feed.tags_info.is_empty());

        let log = tokio::fs::read_to_string(out.path().join(TASK_LOG_FILE)).await.unwrap();
        assert!(log.contains("Translation batch FAILED (HTTP 503)"));
    }
}
