//! End-to-end tests against a real completion endpoint
//!
//! Ignored by default. Run with:
//! `AI_ENDPOINT=... AI_API_KEY=... AI_MODEL=... cargo test -- --ignored`
