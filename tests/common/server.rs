//! Mock completion endpoint
//!
//! Replies use the same Server-Sent Events framing as OpenAI-compatible
//! services: one `data:` line per delta, then `data: [DONE]`.

use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// SSE body streaming `fragments` as content deltas
pub fn sse_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        let chunk = json!({
            "id": "chatcmpl-test",
            "object": "chat.completion.chunk",
            "choices": [{"index": 0, "delta": {"content": fragment}, "finish_reason": null}]
        });
        body.push_str(&format!("data: {}\n\n", chunk));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn sse_response(fragments: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(sse_body(fragments), "text/event-stream")
}

/// A wiremock server standing in for the completion API
pub struct ModelServer {
    pub server: MockServer,
}

impl ModelServer {
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Full completions URL
    pub fn endpoint(&self) -> String {
        format!("{}{}", self.server.uri(), COMPLETIONS_PATH)
    }

    /// Answer every request with `fragments`
    pub async fn reply(&self, fragments: &[&str]) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(header("authorization", "Bearer sk-test"))
            .respond_with(sse_response(fragments))
            .mount(&self.server)
            .await;
    }

    /// Answer requests whose body contains `needle` with `fragments`
    ///
    /// Takes precedence over [`reply`](Self::reply).
    pub async fn reply_when(&self, needle: &str, fragments: &[&str]) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(body_string_contains(needle))
            .respond_with(sse_response(fragments))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Fail requests whose body contains `needle` with `status`
    pub async fn fail_when(&self, needle: &str, status: u16) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .and(body_string_contains(needle))
            .respond_with(ResponseTemplate::new(status).set_body_string("upstream failure"))
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Fail the next `times` requests with `status`
    pub async fn fail_next(&self, status: u16, times: u64) {
        Mock::given(method("POST"))
            .and(path(COMPLETIONS_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_string("quota exhausted"))
            .up_to_n_times(times)
            .with_priority(1)
            .mount(&self.server)
            .await;
    }

    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map_or(0, |requests| requests.len())
    }

    /// Bodies of all requests received so far
    pub async fn request_bodies(&self) -> Vec<serde_json::Value> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .iter()
            .filter_map(|r| serde_json::from_slice(&r.body).ok())
            .collect()
    }
}
