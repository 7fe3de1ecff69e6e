//! Batch scheduling types

/// A contiguous slice of the input, tagged with its position in the partition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch<T> {
    /// Zero-based batch index
    pub index: usize,
    /// Items in input order
    pub items: Vec<T>,
}

/// Configuration for one scheduler run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    /// Maximum batches running at once (default: 5)
    pub max_concurrent: usize,
    /// Process everything as a single batch (default: false)
    pub disable_batch: bool,
    /// Skip partitioning when the input fits in one batch (default: true)
    pub single_batch_when_fits: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            max_concurrent: 5,
            disable_batch: false,
            single_batch_when_fits: true,
        }
    }
}

impl BatchOptions {
    /// Create a new config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set concurrency limit
    pub fn with_max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    /// Set whether to bypass partitioning entirely
    pub fn with_disable_batch(mut self, disable_batch: bool) -> Self {
        self.disable_batch = disable_batch;
        self
    }

    /// Set whether an input no larger than one batch skips partitioning
    pub fn with_single_batch_when_fits(mut self, single: bool) -> Self {
        self.single_batch_when_fits = single;
        self
    }
}

/// A batch whose processing failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchFailure {
    /// Index of the failed batch
    pub index: usize,
    /// Number of items in the batch
    pub size: usize,
    /// Error message
    pub message: String,
}

/// Merged results of a scheduler run, plus what failed
#[derive(Debug, Clone)]
pub struct BatchOutcome<R> {
    /// Results of all batches, flattened in batch order
    pub results: Vec<R>,
    /// Number of batches that were run
    pub batch_count: usize,
    /// Failed batches, in completion order
    pub failures: Vec<BatchFailure>,
}

impl<R> BatchOutcome<R> {
    /// True when no batch failed
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}
