//! Property paths from the traversal root.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Ordered property names leading from the traversal root to a container.
/// Empty for the root itself.
///
/// During a traversal the spider owns a single `PropertyPath` and pushes
/// and pops names on it as it descends and returns. Visitors receive it
/// by reference for the duration of one call only; to keep it, clone it
/// (see [`Visitor`](crate::Visitor)).
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyPath(Vec<String>);

impl PropertyPath {
    /// An empty path (the root).
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a property name.
    pub fn push(&mut self, name: impl Into<String>) {
        self.0.push(name.into());
    }

    /// Remove and return the last property name.
    pub fn pop(&mut self) -> Option<String> {
        self.0.pop()
    }

    /// Drop every segment past `depth`.
    pub fn truncate(&mut self, depth: usize) {
        self.0.truncate(depth);
    }

    /// Number of segments, i.e. the depth below the root.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Borrow the segments.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Take the segments.
    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

impl Deref for PropertyPath {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for PropertyPath {
    fn from(segments: Vec<String>) -> Self {
        Self(segments)
    }
}

impl From<&[&str]> for PropertyPath {
    fn from(segments: &[&str]) -> Self {
        Self(segments.iter().map(|s| (*s).to_owned()).collect())
    }
}

impl PartialEq<[&str]> for PropertyPath {
    fn eq(&self, other: &[&str]) -> bool {
        self.0.len() == other.len() && self.0.iter().zip(other).all(|(a, b)| a == b)
    }
}

impl<const N: usize> PartialEq<[&str; N]> for PropertyPath {
    fn eq(&self, other: &[&str; N]) -> bool {
        *self == other[..]
    }
}

impl fmt::Display for PropertyPath {
    /// Dotted form, `<root>` when empty.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        f.write_str(&self.0.join("."))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_tracks_depth() {
        let mut path = PropertyPath::new();
        path.push("a");
        path.push(String::from("b"));
        assert_eq!(path.depth(), 2);
        assert_eq!(path.pop().as_deref(), Some("b"));
        assert_eq!(path.depth(), 1);
        path.truncate(0);
        assert!(path.is_empty());
    }

    #[test]
    fn display_is_dotted() {
        assert_eq!(PropertyPath::new().to_string(), "<root>");
        let path = PropertyPath::from(&["x", "0", "y"][..]);
        assert_eq!(path.to_string(), "x.0.y");
        assert!(path == ["x", "0", "y"][..]);
        assert_eq!(path, ["x", "0", "y"]);
    }
}
