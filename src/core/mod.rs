//! Core dispatch engine
//!
//! Batch scheduling, the shared call gate, and decoding of streamed replies.

pub mod batch;
pub mod gate;
pub mod streaming;
