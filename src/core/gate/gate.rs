//! Core call gate implementation

use super::budget::CallBudget;
use super::error::GateError;
use super::transport::{HttpTransport, Transport};
use super::types::{GateRequest, GateStats};
use crate::config::GateConfig;
use futures::StreamExt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{Mutex, Semaphore};
use tokio::time::Instant;
use tracing::{debug, error, info, warn};

/// Single choke point for outbound model calls
///
/// Admission is FIFO: callers queue on a fair semaphore and are let in in the
/// order they arrived. The rolling budget check and any rate-limit retries run
/// while the caller holds its slot.
pub struct CallGate {
    config: GateConfig,
    transport: Arc<dyn Transport>,
    /// Concurrency slots
    permits: Semaphore,
    /// Usage in the current window
    budget: Mutex<CallBudget>,
    counters: Counters,
}

#[derive(Default)]
struct Counters {
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    admitted: AtomicU64,
    rate_limit_retries: AtomicU64,
}

/// Marks a call as in flight until dropped
struct InFlight<'a> {
    counters: &'a Counters,
}

impl<'a> InFlight<'a> {
    fn enter(counters: &'a Counters) -> (Self, usize) {
        let now = counters.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        counters.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        counters.admitted.fetch_add(1, Ordering::Relaxed);
        (Self { counters }, now)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counters.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

impl CallGate {
    /// Create a gate that talks HTTP
    pub fn new(config: GateConfig) -> Result<Self, GateError> {
        let transport = HttpTransport::new(config.request_timeout())?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Create a gate over a custom transport
    pub fn with_transport(config: GateConfig, transport: Arc<dyn Transport>) -> Self {
        let slots = config.max_concurrent.max(1);
        Self {
            permits: Semaphore::new(slots),
            budget: Mutex::new(CallBudget::new(Instant::now())),
            counters: Counters::default(),
            transport,
            config,
        }
    }

    /// Gate configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Run one request, delivering each text fragment to `on_chunk` in order
    ///
    /// Waits for a free slot, charges the rolling budget, then performs the
    /// call, retrying rate-limited attempts up to `max_retries` times. The slot
    /// is released on every exit path.
    pub async fn execute<F>(&self, request: &GateRequest, mut on_chunk: F) -> Result<(), GateError>
    where
        F: FnMut(&str) + Send,
    {
        match request.cancel.clone() {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => {
                        debug!(model = %request.model, "Gated call cancelled");
                        Err(GateError::Cancelled)
                    }
                    result = self.admit_and_call(request, &mut on_chunk) => result,
                }
            }
            None => self.admit_and_call(request, &mut on_chunk).await,
        }
    }

    /// Run one request and return the concatenated text
    pub async fn execute_collect(&self, request: &GateRequest) -> Result<String, GateError> {
        let mut text = String::new();
        self.execute(request, |chunk| text.push_str(chunk)).await?;
        Ok(text)
    }

    /// Current gate statistics
    pub async fn stats(&self) -> GateStats {
        let window_usage = self
            .budget
            .lock()
            .await
            .usage_at(Instant::now(), self.config.window());

        GateStats {
            in_flight: self.counters.in_flight.load(Ordering::SeqCst),
            peak_in_flight: self.counters.peak_in_flight.load(Ordering::SeqCst),
            max_concurrent: self.config.max_concurrent.max(1),
            window_usage,
            admitted: self.counters.admitted.load(Ordering::Relaxed),
            rate_limit_retries: self.counters.rate_limit_retries.load(Ordering::Relaxed),
        }
    }

    async fn admit_and_call<F>(&self, request: &GateRequest, on_chunk: &mut F) -> Result<(), GateError>
    where
        F: FnMut(&str) + Send,
    {
        let _permit = self.permits.acquire().await.map_err(|_| GateError::Closed)?;
        let (_in_flight, running) = InFlight::enter(&self.counters);
        info!(
            running,
            max_concurrent = self.config.max_concurrent,
            "Processing {}/{}",
            running,
            self.config.max_concurrent
        );

        self.check_budget(request.estimated_cost()).await;
        self.call_with_retry(request, on_chunk).await
    }

    /// Charge the rolling budget, sleeping out the window when it is exhausted
    async fn check_budget(&self, cost: u64) {
        let wait = {
            let mut budget = self.budget.lock().await;
            let wait = budget.charge(
                cost,
                Instant::now(),
                self.config.window(),
                self.config.rate_ceiling,
                self.config.safety_margin(),
            );
            if wait.is_some() {
                warn!(
                    usage = budget.used,
                    ceiling = self.config.rate_ceiling,
                    "[Rate Limit] Usage exceeded per-window ceiling"
                );
            }
            wait
        };

        if let Some(wait) = wait {
            warn!(wait_secs = wait.as_secs_f64().ceil(), "[Rate Limit] Waiting for window reset");
            tokio::time::sleep(wait).await;
            self.budget.lock().await.reset(Instant::now());
        }
    }

    async fn call_with_retry<F>(&self, request: &GateRequest, on_chunk: &mut F) -> Result<(), GateError>
    where
        F: FnMut(&str) + Send,
    {
        let mut retries_left = self.config.max_retries;

        loop {
            match self.call_once(request, on_chunk).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_rate_limited() && retries_left > 0 => {
                    let cooldown = self.config.retry_cooldown();
                    warn!(
                        retries_left,
                        cooldown_secs = cooldown.as_secs(),
                        "[429 Too Many Requests] Quota exhausted, waiting before retrying"
                    );
                    self.counters.rate_limit_retries.fetch_add(1, Ordering::Relaxed);
                    retries_left -= 1;
                    tokio::time::sleep(cooldown).await;
                }
                Err(e) => {
                    if e.is_rate_limited() {
                        error!(retries = self.config.max_retries, "Rate limit retries exhausted: {}", e);
                    }
                    return Err(e);
                }
            }
        }
    }

    async fn call_once<F>(&self, request: &GateRequest, on_chunk: &mut F) -> Result<(), GateError>
    where
        F: FnMut(&str) + Send,
    {
        let mut fragments = self.transport.open(request).await?;
        while let Some(fragment) = fragments.next().await {
            on_chunk(&fragment?);
        }
        Ok(())
    }
}

impl std::fmt::Debug for CallGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallGate")
            .field("config", &self.config)
            .field("available_permits", &self.permits.available_permits())
            .finish()
    }
}
