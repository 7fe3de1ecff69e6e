//! Rolling usage budget

use std::time::Duration;
use tokio::time::Instant;

/// Usage accumulated in the current window
#[derive(Debug, Clone)]
pub(super) struct CallBudget {
    /// Units charged since `window_start`
    pub(super) used: u64,
    /// Start of the current window
    pub(super) window_start: Instant,
}

impl CallBudget {
    pub(super) fn new(now: Instant) -> Self {
        Self {
            used: 0,
            window_start: now,
        }
    }

    /// Charge `cost` units and decide whether the caller must wait
    ///
    /// An expired window is reset before charging. Returns the time to sleep when
    /// the charge pushes usage over `ceiling`: the remainder of the window plus
    /// `margin`.
    pub(super) fn charge(
        &mut self,
        cost: u64,
        now: Instant,
        window: Duration,
        ceiling: u64,
        margin: Duration,
    ) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.window_start);
        if elapsed >= window {
            self.reset(now);
        }

        self.used = self.used.saturating_add(cost);
        if self.used <= ceiling {
            return None;
        }

        let elapsed = now.saturating_duration_since(self.window_start);
        Some(window.saturating_sub(elapsed) + margin)
    }

    /// Start a fresh window at `now`
    pub(super) fn reset(&mut self, now: Instant) {
        self.used = 0;
        self.window_start = now;
    }

    /// Usage as seen at `now`, treating an expired window as empty
    pub(super) fn usage_at(&self, now: Instant, window: Duration) -> u64 {
        if now.saturating_duration_since(self.window_start) >= window {
            0
        } else {
            self.used
        }
    }
}
