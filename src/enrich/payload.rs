//! Extraction of structured payloads from model replies
//!
//! Replies are expected to wrap a JSON object in a pseudo-XML tag, e.g.
//! `<TagsData>{"data": [...]}</TagsData>`. Models are not reliable about this,
//! so every step degrades to an empty result instead of failing.

use serde::de::DeserializeOwned;
use tracing::debug;

/// Return the body of the first `<tag>...</tag>` in `text`, trimmed
pub fn find_tagged<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let (_, rest) = text.split_once(open.as_str())?;
    let (body, _) = rest.split_once(close.as_str())?;
    Some(body.trim())
}

/// Return the body of the first `<tag>...</tag>` in `text`, trimmed
///
/// Falls back to the whole trimmed text when the tag is absent.
pub fn extract_tagged<'a>(text: &'a str, tag: &str) -> &'a str {
    find_tagged(text, tag).unwrap_or_else(|| text.trim())
}

/// Parse the array under `key` of the JSON object in `body`
///
/// Entries that do not deserialize into `T` are skipped. Returns `None` when
/// `body` is not a JSON object with an array under `key`, so an empty array
/// can be told apart from an unusable reply.
pub fn parse_array<T: DeserializeOwned>(body: &str, key: &str) -> Option<Vec<T>> {
    let value: serde_json::Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            debug!(key, error = %e, "Model reply is not valid JSON");
            return None;
        }
    };

    let Some(entries) = value.get(key).and_then(|v| v.as_array()) else {
        debug!(key, "Model reply has no array under key");
        return None;
    };

    Some(
        entries
            .iter()
            .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
            .collect(),
    )
}

/// Parse the array under `key` inside the `<tag>` payload of `text`
///
/// Lenient: anything unusable yields an empty list.
pub fn parse_list<T: DeserializeOwned>(text: &str, tag: &str, key: &str) -> Vec<T> {
    parse_array(extract_tagged(text, tag), key).unwrap_or_default()
}

/// [`parse_list`] with the usual `data` key
pub fn parse_data<T: DeserializeOwned>(text: &str, tag: &str) -> Vec<T> {
    parse_list(text, tag, "data")
}

/// The first `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
