//! ManualScheduler — a clockless Scheduler that records what it was asked.

use crate::budget::Budget;
use crate::scheduler::Scheduler;
use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

/// A scheduler with no clock. It never preempts anything by itself; pair
/// it with a model that raises [`Preempted`](crate::Preempted) (such as
/// [`PreemptOnce`](super::PreemptOnce)). Records every budget request and
/// counts yields.
pub struct ManualScheduler {
    budget: Mutex<Budget>,
    requests: Mutex<Vec<Budget>>,
    ticks: AtomicU64,
}

impl ManualScheduler {
    /// Create a scheduler whose task starts with `budget`.
    pub fn new(budget: Budget) -> Self {
        Self {
            budget: Mutex::new(budget),
            requests: Mutex::new(Vec::new()),
            ticks: AtomicU64::new(0),
        }
    }

    /// Every budget passed to `set_budget`, in order.
    pub fn requests(&self) -> Vec<Budget> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of completed `yield_tick` calls.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::SeqCst)
    }
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(Budget::UNLIMITED)
    }
}

#[async_trait]
impl Scheduler for ManualScheduler {
    fn current_budget(&self) -> Budget {
        *self.budget.lock().unwrap()
    }

    fn set_budget(&self, budget: Budget) {
        *self.budget.lock().unwrap() = budget;
        self.requests.lock().unwrap().push(budget);
    }

    async fn yield_tick(&self) {
        tokio::task::yield_now().await;
        self.ticks.fetch_add(1, Ordering::SeqCst);
    }
}
