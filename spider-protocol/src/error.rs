//! Error types for each protocol.

use crate::path::PropertyPath;
use thiserror::Error;

/// Boxed foreign error carried through the protocol unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The scheduler's preemption signal: the current task ran past its slice.
///
/// Transient. The spider yields one tick and retries the step that
/// produced it; callers of the spider never observe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Error)]
#[error("ran too long")]
pub struct Preempted;

/// Property read errors.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ReadError {
    /// The read was interrupted by the scheduler. Retrying will succeed
    /// once the task has been given a new slice.
    #[error("preempted: {0}")]
    Preempted(#[from] Preempted),

    /// The property's computed value raised an error.
    #[error("property read failed: {0}")]
    Failed(BoxError),

    /// Catch-all. Include context.
    #[error("{0}")]
    Other(String),
}

impl ReadError {
    /// Wrap any error as a non-preemption read failure.
    pub fn failed(err: impl Into<BoxError>) -> Self {
        Self::Failed(err.into())
    }

    /// Whether this is the scheduler's preemption signal.
    pub fn is_preemption(&self) -> bool {
        matches!(self, Self::Preempted(_))
    }
}

/// Visitor callback errors. Fatal to the traversal.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum VisitError {
    /// The visitor asked to stop the traversal.
    #[error("visitor aborted: {0}")]
    Aborted(String),

    /// Catch-all.
    #[error("{0}")]
    Other(#[from] BoxError),
}

/// Errors surfaced by a traversal. The original failure is kept as
/// `source`; `path` is where the traversal was when it happened.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SpiderError {
    /// Reading a property failed for a reason other than preemption.
    #[error("read failed at {path}: {source}")]
    Read {
        /// Path to the property whose read failed (the property name is the
        /// last segment).
        path: PropertyPath,
        /// The model's error, unchanged.
        source: ReadError,
    },

    /// The visitor callback failed.
    #[error("visitor failed at {path}: {source}")]
    Visitor {
        /// Path to the container being visited.
        path: PropertyPath,
        /// The visitor's error, unchanged.
        source: VisitError,
    },
}

impl SpiderError {
    /// Path at which the traversal aborted.
    pub fn path(&self) -> &PropertyPath {
        match self {
            Self::Read { path, .. } | Self::Visitor { path, .. } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preempted_converts_and_is_detected() {
        let err: ReadError = Preempted.into();
        assert!(err.is_preemption());
        assert_eq!(err.to_string(), "preempted: ran too long");
    }

    #[test]
    fn failures_are_not_preemption() {
        let err = ReadError::failed("getter exploded");
        assert!(!err.is_preemption());
        assert!(err.to_string().contains("getter exploded"));
        assert!(!ReadError::Other("x".into()).is_preemption());
    }

    #[test]
    fn spider_error_reports_path() {
        let err = SpiderError::Read {
            path: PropertyPath::from(vec!["a".to_owned(), "b".to_owned()]),
            source: ReadError::failed("boom"),
        };
        assert_eq!(err.path().len(), 2);
        assert_eq!(err.to_string(), "read failed at a.b: property read failed: boom");
    }
}
