//! Streaming response decoding
//!
//! The remote service answers with Server-Sent Events: `data: {json}` lines
//! carrying `choices[0].delta.content`, closed by `data: [DONE]`.

mod decoder;
pub mod utils;


// Re-export decoder
pub use decoder::{LineBuffer, SseLine, content_stream, decode_line};

// Re-export utils
pub use utils::{DONE_SENTINEL, extract_delta_content, is_done_line, parse_sse_line};
