//! Bounded concurrent batch scheduler

use super::types::{Batch, BatchFailure, BatchOptions, BatchOutcome};
use futures::FutureExt;
use futures::stream::{FuturesUnordered, StreamExt};
use std::any::Any;
use std::fmt::Display;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use tracing::{error, info};

/// Split `items` into contiguous batches of `batch_size`
///
/// The last batch may be shorter. A `batch_size` of zero is treated as one.
pub fn partition<T>(items: Vec<T>, batch_size: usize) -> Vec<Batch<T>> {
    let size = batch_size.max(1);
    let mut batches = Vec::with_capacity(items.len().div_ceil(size));
    let mut items = items.into_iter();

    loop {
        let chunk: Vec<T> = items.by_ref().take(size).collect();
        if chunk.is_empty() {
            break;
        }
        batches.push(Batch {
            index: batches.len(),
            items: chunk,
        });
    }

    batches
}

/// Run `process` over `items` in batches and return the merged results
///
/// A failed batch contributes nothing; it never aborts its siblings. See
/// [`run_batches_with_report`] for the list of failures.
pub async fn run_batches<T, R, E, F, Fut>(
    items: Vec<T>,
    batch_size: usize,
    process: F,
    options: &BatchOptions,
) -> Vec<R>
where
    F: Fn(Vec<T>, usize) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
    E: Display,
{
    run_batches_with_report(items, batch_size, process, options)
        .await
        .results
}

/// Run `process` over `items` in batches, keeping at most
/// `options.max_concurrent` batches running
///
/// # Arguments
/// * `items` - Work items, in order
/// * `batch_size` - Items per batch
/// * `process` - Called with each batch and its index
/// * `options` - Concurrency and bypass settings
///
/// # Returns
/// Results flattened in batch order, regardless of completion order, plus a
/// record of every batch that returned an error or panicked.
pub async fn run_batches_with_report<T, R, E, F, Fut>(
    items: Vec<T>,
    batch_size: usize,
    process: F,
    options: &BatchOptions,
) -> BatchOutcome<R>
where
    F: Fn(Vec<T>, usize) -> Fut,
    Fut: Future<Output = Result<Vec<R>, E>>,
    E: Display,
{
    let batch_size = batch_size.max(1);

    if options.disable_batch || (options.single_batch_when_fits && items.len() <= batch_size) {
        info!("[Batch] Processing all {} items (single batch)", items.len());
        let size = items.len();
        let mut failures = Vec::new();
        let results = match guarded(process(items, 0)).await {
            Ok(results) => results,
            Err(message) => {
                error!(batch = 1, total = 1, "Batch 1 failed: {}", message);
                failures.push(BatchFailure {
                    index: 0,
                    size,
                    message,
                });
                Vec::new()
            }
        };
        return BatchOutcome {
            results,
            batch_count: 1,
            failures,
        };
    }

    let batches = partition(items, batch_size);
    let total = batches.len();
    let max_concurrent = options.max_concurrent.max(1);

    info!(
        "[Batch] Total batches: {}. Items per batch: {}. Max Concurrent: {}",
        total, batch_size, max_concurrent
    );

    let mut slots: Vec<Option<Vec<R>>> = (0..total).map(|_| None).collect();
    let mut failures = Vec::new();
    let mut pending = batches.into_iter();
    let mut running = FuturesUnordered::new();
    let mut completed = 0usize;

    let start = |batch: Batch<T>| {
        let Batch { index, items } = batch;
        let size = items.len();
        let work = guarded(process(items, index));
        async move { (index, size, work.await) }
    };

    for batch in pending.by_ref().take(max_concurrent) {
        info!(
            "[Batch] Starting Batch {}/{} (Items: {}, Active: {})",
            batch.index + 1,
            total,
            batch.items.len(),
            running.len() + 1
        );
        running.push(start(batch));
    }

    while let Some((index, size, outcome)) = running.next().await {
        completed += 1;

        slots[index] = Some(match outcome {
            Ok(results) => results,
            Err(message) => {
                error!(batch = index + 1, total, "Batch {} failed: {}", index + 1, message);
                failures.push(BatchFailure {
                    index,
                    size,
                    message,
                });
                Vec::new()
            }
        });

        info!(
            "[Batch] Finished Batch {}/{}. Remaining: {}",
            index + 1,
            total,
            total - completed
        );

        if let Some(batch) = pending.next() {
            info!(
                "[Batch] Starting Batch {}/{} (Items: {}, Active: {})",
                batch.index + 1,
                total,
                batch.items.len(),
                running.len() + 1
            );
            running.push(start(batch));
        }
    }

    BatchOutcome {
        results: slots.into_iter().flatten().flatten().collect(),
        batch_count: total,
        failures,
    }
}

/// Await a batch, turning errors and panics into a message
async fn guarded<R, E, Fut>(work: Fut) -> Result<Vec<R>, String>
where
    Fut: Future<Output = Result<Vec<R>, E>>,
    E: Display,
{
    match AssertUnwindSafe(work).catch_unwind().await {
        Ok(Ok(results)) => Ok(results),
        Ok(Err(e)) => Err(e.to_string()),
        Err(panic) => Err(format!("batch panicked: {}", panic_message(panic.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg
    } else {
        "unknown panic"
    }
}
