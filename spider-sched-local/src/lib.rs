#![deny(missing_docs)]
//! In-process implementation of spider-protocol's Scheduler trait.
//!
//! One `LocalScheduler` governs one cooperative task. The budget is the
//! length of a slice in milliseconds. Host code running under the task
//! (getters, interpreters) calls [`LocalScheduler::checkpoint`], which
//! fails with [`Preempted`] once the slice has overrun. Yielding hands
//! control to the tokio runtime and starts a new slice. Time is read from
//! `tokio::time`, so a paused test clock drives it deterministically.

use async_trait::async_trait;
use spider_protocol::{Budget, Preempted, Scheduler};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// Cooperative time-slice scheduler for a single task.
///
/// Share it as `Arc<LocalScheduler>` between the spider and whatever host
/// code needs to call [`checkpoint`](Self::checkpoint).
pub struct LocalScheduler {
    budget: AtomicU64,
    slice_start: Mutex<Instant>,
    ticks: AtomicU64,
    preemptions: AtomicU64,
}

impl LocalScheduler {
    /// Create a scheduler whose slices last `budget`. The first slice
    /// starts now.
    pub fn new(budget: Budget) -> Self {
        Self {
            budget: AtomicU64::new(budget.as_units()),
            slice_start: Mutex::new(Instant::now()),
            ticks: AtomicU64::new(0),
            preemptions: AtomicU64::new(0),
        }
    }

    /// Time spent in the current slice.
    pub fn elapsed(&self) -> Duration {
        self.slice_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .elapsed()
    }

    /// Time left in the current slice, zero once overrun.
    pub fn remaining(&self) -> Duration {
        self.current_budget().to_std().saturating_sub(self.elapsed())
    }

    /// Fail with [`Preempted`] if the current slice has run longer than
    /// the budget. Does not start a new slice; only a yield does.
    pub fn checkpoint(&self) -> Result<(), Preempted> {
        let elapsed = self.elapsed();
        if elapsed > self.current_budget().to_std() {
            self.preemptions.fetch_add(1, Ordering::Relaxed);
            tracing::trace!(elapsed_ms = elapsed.as_millis() as u64, "sched.preempt");
            return Err(Preempted);
        }
        Ok(())
    }

    /// Completed yields.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Checkpoints that reported preemption.
    pub fn preemptions(&self) -> u64 {
        self.preemptions.load(Ordering::Relaxed)
    }

    fn start_slice(&self) {
        *self
            .slice_start
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Instant::now();
    }
}

impl Default for LocalScheduler {
    fn default() -> Self {
        Self::new(Budget::UNLIMITED)
    }
}

#[async_trait]
impl Scheduler for LocalScheduler {
    fn current_budget(&self) -> Budget {
        Budget::from_units(self.budget.load(Ordering::Relaxed))
    }

    fn set_budget(&self, budget: Budget) {
        tracing::debug!(%budget, "sched.set_budget");
        self.budget.store(budget.as_units(), Ordering::Relaxed);
    }

    async fn yield_tick(&self) {
        tokio::task::yield_now().await;
        self.start_slice();
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }
}
