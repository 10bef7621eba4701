//! # spider-protocol — Protocol traits for time-sliced graph traversal
//!
//! This crate defines the boundaries a graph spider is composed from. The
//! spider itself lives in `spider-engine`; everything it talks to is a
//! trait here so hosts can plug in their own object model and scheduler.
//!
//! ## The Protocols
//!
//! | Protocol | Trait | What it does |
//! |----------|-------|-------------|
//! | ① Model | [`PropertyModel`] | Containers, identity, ordered property names, reads |
//! | ② Scheduler | [`Scheduler`] | Time budget, preemption, one-tick yield |
//! | ③ Visitor | [`Visitor`] | What the caller does with each container |
//!
//! ## Design Principle
//!
//! A property read is the only place the host can interrupt a traversal.
//! Reads return [`ReadError`], and a preempted read is the distinguished
//! [`ReadError::Preempted`] variant rather than a generic failure. The
//! engine retries those and surfaces everything else unchanged.
//!
//! ## Future: Native Async Traits
//!
//! Protocol traits currently use `async-trait` (heap-allocated futures).
//! When Rust stabilizes `async fn in dyn Trait` with `Send` bounds,
//! these traits will migrate to native async.

#![deny(missing_docs)]

pub mod budget;
pub mod error;
pub mod id;
pub mod model;
pub mod path;
pub mod scheduler;
pub mod visitor;

#[cfg(feature = "test-utils")]
pub mod test_utils;

// Re-exports for convenience
pub use budget::Budget;
pub use error::{BoxError, Preempted, ReadError, SpiderError, VisitError};
pub use id::ContainerId;
pub use model::PropertyModel;
pub use path::PropertyPath;
pub use scheduler::Scheduler;
pub use visitor::{Visit, Visitor};
