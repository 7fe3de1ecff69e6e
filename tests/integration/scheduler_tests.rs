//! Batch scheduler driving the call gate over HTTP

#[cfg(test)]
mod tests {
    use crate::common::ModelServer;
    use feed_enricher::{
        BatchOptions, CallGate, GateConfig, GateRequest, run_batches, run_batches_with_report,
    };
    use std::sync::Arc;

    fn gate(max_concurrent: usize) -> Arc<CallGate> {
        Arc::new(CallGate::new(GateConfig::default().with_max_concurrent(max_concurrent)).unwrap())
    }

    #[tokio::test]
    async fn test_batches_through_shared_gate() {
        let server = ModelServer::start().await;
        server.reply(&["done"]).await;
        let gate = gate(2);
        let endpoint = server.endpoint();
        let options = BatchOptions::new().with_max_concurrent(2);
        let items: Vec<u32> = (0..37).collect();

        let results = run_batches(
            items.clone(),
            15,
            |batch, index| {
                let gate = gate.clone();
                let request = GateRequest::new(
                    endpoint.as_str(),
                    "sk-test",
                    "test-model",
                    format!("batch-{} {:?}", index, batch),
                );
                async move {
                    let reply = gate.execute_collect(&request).await?;
                    assert_eq!(reply, "done");
                    Ok::<_, feed_enricher::GateError>(batch)
                }
            },
            &options,
        )
        .await;

        assert_eq!(results, items);
        assert_eq!(server.request_count().await, 3);
        assert!(gate.stats().await.peak_in_flight <= 2);
    }

    #[tokio::test]
    async fn test_failed_batch_keeps_siblings() {
        let server = ModelServer::start().await;
        server.fail_when("batch-1 ", 400).await;
        server.reply(&["ok"]).await;
        let gate = gate(3);
        let endpoint = server.endpoint();
        let options = BatchOptions::new().with_max_concurrent(3);

        let outcome = run_batches_with_report(
            (0..9).collect::<Vec<u32>>(),
            3,
            |batch, index| {
                let gate = gate.clone();
                let request = GateRequest::new(
                    endpoint.as_str(),
                    "sk-test",
                    "test-model",
                    format!("batch-{} {:?}", index, batch),
                );
                async move {
                    gate.execute_collect(&request).await?;
                    Ok::<_, feed_enricher::GateError>(batch)
                }
            },
            &options,
        )
        .await;

        assert_eq!(outcome.results, vec![0, 1, 2, 6, 7, 8]);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].index, 1);
        assert!(outcome.failures[0].message.contains("HTTP 400"));
    }

    #[tokio::test]
    async fn test_disable_batch_sends_one_request() {
        let server = ModelServer::start().await;
        server.reply(&["all"]).await;
        let gate = gate(5);
        let endpoint = server.endpoint();
        let options = BatchOptions::new().with_disable_batch(true);

        let results = run_batches(
            (0..100).collect::<Vec<u32>>(),
            15,
            |batch, index| {
                let gate = gate.clone();
                let request =
                    GateRequest::new(endpoint.as_str(), "sk-test", "test-model", format!("{:?}", batch));
                async move {
                    assert_eq!(index, 0);
                    gate.execute_collect(&request).await.map(|text| vec![text])
                }
            },
            &options,
        )
        .await;

        assert_eq!(results, vec!["all".to_string()]);
        assert_eq!(server.request_count().await, 1);
    }
}
