//! Batch scheduling for model calls
//!
//! Splits work items into ordered batches, runs a bounded number of them at a
//! time, and merges their results back in batch order. A failing batch only
//! loses its own results.

mod scheduler;
mod types;


// Re-export all public types
pub use scheduler::{partition, run_batches, run_batches_with_report};
pub use types::{Batch, BatchFailure, BatchOptions, BatchOutcome};
