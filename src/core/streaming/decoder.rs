//! Decoding of line-framed SSE responses into text fragments

use super::utils::{extract_delta_content, is_done_line, parse_sse_line};
use crate::core::gate::{FragmentStream, GateError};
use futures::stream::{Stream, StreamExt};
use std::fmt::Display;

/// Result of decoding one SSE line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SseLine {
    /// Incremental text content
    Fragment(String),
    /// Blank lines, comments, non-data fields and unparseable payloads
    Skip,
    /// End-of-stream sentinel
    Done,
}

/// Decode a single line of an SSE response
pub fn decode_line(line: &str) -> SseLine {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() {
        return SseLine::Skip;
    }
    if is_done_line(line) {
        return SseLine::Done;
    }

    match parse_sse_line(line).and_then(extract_delta_content) {
        Some(content) => SseLine::Fragment(content),
        None => SseLine::Skip,
    }
}

/// Byte buffer that yields complete lines
///
/// Lines are only decoded once their terminating newline has arrived, so a
/// multi-byte character split across network chunks is reassembled first.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buf: Vec<u8>,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append raw bytes
    pub fn push(&mut self, chunk: &[u8]) {
        self.buf.extend_from_slice(chunk);
    }

    /// Pop the next complete line, without its terminator
    pub fn next_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.buf.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line[..pos]).into_owned())
    }

    /// Take whatever is left after the body ended without a final newline
    pub fn take_remainder(&mut self) -> Option<String> {
        if self.buf.is_empty() {
            return None;
        }
        let rest = std::mem::take(&mut self.buf);
        Some(String::from_utf8_lossy(&rest).into_owned())
    }
}

/// Turn a response body into a stream of text fragments
///
/// The returned stream ends at the `[DONE]` sentinel or when the body ends.
/// Malformed records are skipped; a body read error is yielded once and ends
/// the stream.
pub fn content_stream<S, B, E>(body: S) -> FragmentStream
where
    S: Stream<Item = Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut lines = LineBuffer::new();
        let mut body = Box::pin(body);

        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(e) => {
                    yield Err(GateError::Network(format!("Stream error: {}", e)));
                    return;
                }
            };

            lines.push(chunk.as_ref());
            while let Some(line) = lines.next_line() {
                match decode_line(&line) {
                    SseLine::Fragment(text) => yield Ok(text),
                    SseLine::Skip => continue,
                    SseLine::Done => return,
                }
            }
        }

        if let Some(line) = lines.take_remainder() {
            if let SseLine::Fragment(text) = decode_line(&line) {
                yield Ok(text);
            }
        }
    };

    Box::pin(stream)
}
