//! RecordingVisitor — records every visit, optionally prunes or fails.

use crate::error::VisitError;
use crate::path::PropertyPath;
use crate::visitor::{Visit, Visitor};

/// A visitor that records the path of every container it is shown.
///
/// By default it always descends. [`prune_at`](Self::prune_at) and
/// [`fail_at`](Self::fail_at) make it prune or fail at specific paths.
#[derive(Debug, Default)]
pub struct RecordingVisitor {
    visits: Vec<PropertyPath>,
    prune_at: Vec<PropertyPath>,
    fail_at: Option<PropertyPath>,
}

impl RecordingVisitor {
    /// Create a visitor that records and always descends.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prune at the container reached by `path`.
    pub fn prune_at(mut self, path: &[&str]) -> Self {
        self.prune_at.push(PropertyPath::from(path));
        self
    }

    /// Fail with [`VisitError::Aborted`] at the container reached by `path`.
    pub fn fail_at(mut self, path: &[&str]) -> Self {
        self.fail_at = Some(PropertyPath::from(path));
        self
    }

    /// Paths of every visit, in call order.
    pub fn visits(&self) -> &[PropertyPath] {
        &self.visits
    }

    /// Visited paths rendered dotted (`<root>` for the root).
    pub fn dotted(&self) -> Vec<String> {
        self.visits.iter().map(ToString::to_string).collect()
    }
}

impl<V: ?Sized> Visitor<V> for RecordingVisitor {
    fn visit(&mut self, _value: &V, path: &PropertyPath) -> Result<Visit, VisitError> {
        self.visits.push(path.clone());
        if self.fail_at.as_ref() == Some(path) {
            return Err(VisitError::Aborted(format!("refused {path}")));
        }
        Ok(Visit::from(self.prune_at.contains(path)))
    }
}
