#![deny(missing_docs)]
//! Time-sliced, cycle-safe object-graph spider.
//!
//! [`GraphSpider`] walks the containers reachable from a root in
//! depth-first pre-order, calling a [`Visitor`](spider_protocol::Visitor)
//! once per container with the path of property names that reached it.
//!
//! The walk is iterative: an explicit frame stack runs parallel to the
//! path stack, so graph depth is bounded by memory, not by the native
//! stack. It cooperates with a [`Scheduler`](spider_protocol::Scheduler):
//! the budget is capped for the walk's duration, and a property read that
//! comes back [`Preempted`](spider_protocol::Preempted) is retried after
//! yielding one tick. Preemption is never visible to the visitor or the
//! caller. Every other failure aborts the walk.

mod config;
mod report;
mod spider;

pub use config::{DEFAULT_BUDGET_CAP, SpiderConfig};
pub use report::SpiderReport;
pub use spider::{GraphSpider, spider_with};
