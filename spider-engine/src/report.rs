//! What a completed walk did.

use serde::{Deserialize, Serialize};

/// Counters for one successful [`GraphSpider::spider`](crate::GraphSpider::spider)
/// call. Failed walks return an error instead; there is no partial report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpiderReport {
    /// Containers passed to the visitor.
    pub visited: u64,
    /// Visits where the visitor asked to prune.
    pub pruned: u64,
    /// Property reads that completed (retries not counted).
    pub properties_read: u64,
    /// Reads that came back preempted and were retried.
    pub preemptions: u64,
    /// Deepest path length at which the visitor was called.
    pub max_depth: u64,
}
