//! Utility functions for streaming

use serde_json::Value;

/// End-of-stream sentinel carried in a data record
pub const DONE_SENTINEL: &str = "[DONE]";

/// Parse SSE data line
///
/// Accepts both `data: x` and `data:x`.
pub fn parse_sse_line(line: &str) -> Option<&str> {
    let data = line.strip_prefix("data:")?;
    Some(data.strip_prefix(' ').unwrap_or(data))
}

/// Check if SSE line indicates end of stream
pub fn is_done_line(line: &str) -> bool {
    let line = line.trim();
    line == DONE_SENTINEL || parse_sse_line(line).is_some_and(|d| d.trim() == DONE_SENTINEL)
}

/// Extract `choices[0].delta.content` from a JSON data payload
///
/// Returns `None` for malformed JSON or payloads without text.
pub fn extract_delta_content(data: &str) -> Option<String> {
    let json: Value = serde_json::from_str(data).ok()?;
    json.get("choices")?
        .as_array()?
        .first()?
        .get("delta")?
        .get("content")?
        .as_str()
        .filter(|content| !content.is_empty())
        .map(str::to_string)
}
