//! Integration tests for feed-enricher
//!
//! These tests run the public API against wiremock servers over real HTTP.

pub mod config_tests;
pub mod gate_http_tests;
pub mod pipeline_tests;
pub mod scheduler_tests;
