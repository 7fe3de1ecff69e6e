//! Call gate over HTTP
//!
//! Exercises the real transport and SSE decoding against a mock endpoint.

#[cfg(test)]
mod tests {
    use crate::common::ModelServer;
    use feed_enricher::{CallGate, GateConfig, GateError, GateRequest};
    use std::sync::Arc;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    fn fast_retry_config() -> GateConfig {
        GateConfig::default().with_retries(3, Duration::from_millis(20))
    }

    fn request(server: &ModelServer, prompt: &str) -> GateRequest {
        GateRequest::new(server.endpoint(), "sk-test", "test-model", prompt)
    }

    #[tokio::test]
    async fn test_streams_fragments_in_order() {
        let server = ModelServer::start().await;
        server.reply(&["Hello", ", ", "world", "!"]).await;
        let gate = CallGate::new(GateConfig::default()).unwrap();

        let mut chunks = Vec::new();
        gate.execute(&request(&server, "Say hello"), |chunk| chunks.push(chunk.to_string()))
            .await
            .unwrap();

        assert_eq!(chunks, vec!["Hello", ", ", "world", "!"]);

        let bodies = server.request_bodies().await;
        assert_eq!(bodies.len(), 1);
        assert_eq!(bodies[0]["model"], "test-model");
        assert_eq!(bodies[0]["stream"], true);
        assert_eq!(bodies[0]["messages"][0]["role"], "user");
        assert_eq!(bodies[0]["messages"][0]["content"], "Say hello");
    }

    #[tokio::test]
    async fn test_rate_limit_recovers_after_cooldown() {
        let server = ModelServer::start().await;
        server.fail_next(429, 2).await;
        server.reply(&["finally"]).await;
        let gate = CallGate::new(fast_retry_config()).unwrap();

        let text = gate.execute_collect(&request(&server, "p")).await.unwrap();

        assert_eq!(text, "finally");
        assert_eq!(server.request_count().await, 3);
        assert_eq!(gate.stats().await.rate_limit_retries, 2);
    }

    #[tokio::test]
    async fn test_rate_limit_gives_up_after_max_retries() {
        let server = ModelServer::start().await;
        server.fail_next(429, 100).await;
        let gate = CallGate::new(fast_retry_config()).unwrap();

        let err = gate.execute_collect(&request(&server, "p")).await.unwrap_err();

        assert!(err.is_rate_limited());
        assert!(err.to_string().contains("quota exhausted"));
        assert_eq!(server.request_count().await, 4);
    }

    #[tokio::test]
    async fn test_server_error_is_not_retried() {
        let server = ModelServer::start().await;
        server.fail_next(500, 100).await;
        let gate = CallGate::new(fast_retry_config()).unwrap();

        let err = gate.execute_collect(&request(&server, "p")).await.unwrap_err();

        assert!(matches!(err, GateError::Http { status: 500, .. }));
        assert_eq!(server.request_count().await, 1);
    }

    #[tokio::test]
    async fn test_concurrent_callers_share_slots() {
        let server = ModelServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(crate::common::sse_body(&["ok"]), "text/event-stream")
                    .set_delay(Duration::from_millis(100)),
            )
            .mount(&server.server)
            .await;
        let gate = Arc::new(CallGate::new(GateConfig::default().with_max_concurrent(2)).unwrap());

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let gate = gate.clone();
                let request = request(&server, &format!("caller {}", i));
                tokio::spawn(async move { gate.execute_collect(&request).await })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "ok");
        }

        let stats = gate.stats().await;
        assert_eq!(stats.admitted, 6);
        assert_eq!(stats.peak_in_flight, 2);
        assert_eq!(stats.in_flight, 0);
        assert_eq!(server.request_count().await, 6);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_network_error() {
        let gate = CallGate::new(GateConfig::default()).unwrap();
        let request = GateRequest::new("http://127.0.0.1:1/v1/chat/completions", "k", "m", "p");

        let err = gate.execute_collect(&request).await.unwrap_err();

        assert!(matches!(err, GateError::Network(_)));
    }
}
