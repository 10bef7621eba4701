//! In-memory fixtures for testing.
//!
//! Available behind the `test-utils` feature flag. These are minimal
//! implementations that let engine and model crates test against the
//! protocol without a real host.

mod manual_scheduler;
mod preempt_once;
mod recording_visitor;

pub use manual_scheduler::ManualScheduler;
pub use preempt_once::PreemptOnce;
pub use recording_visitor::RecordingVisitor;
