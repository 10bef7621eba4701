//! The Scheduler protocol — cooperative time slicing.

use crate::budget::Budget;
use async_trait::async_trait;
use std::sync::Arc;

/// Protocol ② — Scheduler
///
/// The shared cooperative scheduler a traversal runs under. It grants the
/// calling task a time budget per slice and, when a slice is exhausted,
/// makes whatever host code is running fail with
/// [`Preempted`](crate::Preempted). The spider reacts by calling
/// [`yield_tick`](Scheduler::yield_tick) and retrying.
///
/// Budget methods are synchronous and must not block: they are called
/// from inside a traversal step, which never suspends except on a yield.
#[async_trait]
pub trait Scheduler: Send + Sync {
    /// The calling task's current per-slice budget.
    fn current_budget(&self) -> Budget;

    /// Request a new per-slice budget for the calling task.
    fn set_budget(&self, budget: Budget);

    /// Suspend the calling task until it is next scheduled, then start a
    /// fresh slice.
    async fn yield_tick(&self);
}

/// Blanket implementation: a shared scheduler is a scheduler.
#[async_trait]
impl<S: Scheduler + ?Sized> Scheduler for Arc<S> {
    fn current_budget(&self) -> Budget {
        (**self).current_budget()
    }

    fn set_budget(&self, budget: Budget) {
        (**self).set_budget(budget)
    }

    async fn yield_tick(&self) {
        (**self).yield_tick().await
    }
}
