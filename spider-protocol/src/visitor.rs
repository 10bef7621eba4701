//! The Visitor protocol — what the caller does with each container.

use crate::{error::VisitError, path::PropertyPath};

/// What a visitor wants done with the container it was just shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Traverse this container's properties.
    Descend,
    /// Skip this container's properties.
    Prune,
}

impl Visit {
    /// Whether this is [`Visit::Prune`].
    pub fn is_prune(self) -> bool {
        matches!(self, Self::Prune)
    }
}

/// `true` means "prune", matching the classic `(value, path) -> bool`
/// callback shape.
impl From<bool> for Visit {
    fn from(prune: bool) -> Self {
        if prune { Self::Prune } else { Self::Descend }
    }
}

/// Protocol ③ — Visitor
///
/// Called synchronously, once per distinct container, in depth-first
/// pre-order. `path` is the spider's own path stack, lent for the duration
/// of the call. An error aborts the traversal and is surfaced unchanged.
///
/// The path cannot outlive the call. Keeping the reference is rejected:
///
/// ```compile_fail
/// use spider_protocol::{PropertyPath, Visit, VisitError, Visitor};
///
/// struct Keeper<'a> {
///     last: Option<&'a PropertyPath>,
/// }
///
/// impl<'a> Visitor<u32> for Keeper<'a> {
///     fn visit(&mut self, _: &u32, path: &PropertyPath) -> Result<Visit, VisitError> {
///         self.last = Some(path);
///         Ok(Visit::Descend)
///     }
/// }
/// ```
///
/// Cloning it is the way to keep it:
///
/// ```
/// use spider_protocol::{PropertyPath, Visit, VisitError, Visitor};
///
/// #[derive(Default)]
/// struct Keeper {
///     last: Option<PropertyPath>,
/// }
///
/// impl Visitor<u32> for Keeper {
///     fn visit(&mut self, _: &u32, path: &PropertyPath) -> Result<Visit, VisitError> {
///         self.last = Some(path.clone());
///         Ok(Visit::Descend)
///     }
/// }
///
/// let mut keeper = Keeper::default();
/// let mut path = PropertyPath::new();
/// path.push("a");
/// keeper.visit(&1, &path).unwrap();
/// path.pop();
/// assert_eq!(keeper.last.unwrap(), ["a"]);
/// ```
pub trait Visitor<V: ?Sized> {
    /// Visit one container.
    fn visit(&mut self, value: &V, path: &PropertyPath) -> Result<Visit, VisitError>;
}

impl<V: ?Sized, F> Visitor<V> for F
where
    F: FnMut(&V, &PropertyPath) -> Result<Visit, VisitError>,
{
    fn visit(&mut self, value: &V, path: &PropertyPath) -> Result<Visit, VisitError> {
        self(value, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_maps_to_prune() {
        assert_eq!(Visit::from(true), Visit::Prune);
        assert_eq!(Visit::from(false), Visit::Descend);
        assert!(Visit::Prune.is_prune());
    }

    #[test]
    fn closures_are_visitors() {
        let mut seen = Vec::new();
        let mut v = |value: &u32, path: &PropertyPath| {
            seen.push((*value, path.depth()));
            Ok::<_, VisitError>(Visit::Descend)
        };
        let mut path = PropertyPath::new();
        path.push("a");
        Visitor::visit(&mut v, &7u32, &path).unwrap();
        assert_eq!(seen, vec![(7, 1)]);
    }
}
