//! Heap values.

use serde::{Deserialize, Serialize};
use spider_protocol::ContainerId;
use std::fmt;

/// Index of an object in a [`Heap`](crate::Heap).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(pub u64);

impl From<ObjectId> for ContainerId {
    fn from(id: ObjectId) -> Self {
        ContainerId::new(id.0)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "obj#{}", self.0)
    }
}

/// A value stored in a heap property. Only [`HeapValue::Object`] is a
/// container; everything else is a leaf.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HeapValue {
    /// Absent property.
    #[default]
    Undefined,
    /// Explicit null.
    Null,
    /// Boolean.
    Bool(bool),
    /// Number.
    Number(f64),
    /// String.
    Str(String),
    /// Reference to a heap object (plain, array or function).
    Object(ObjectId),
}

impl HeapValue {
    /// The referenced object, if this is one.
    pub fn as_object(&self) -> Option<ObjectId> {
        match self {
            Self::Object(id) => Some(*id),
            _ => None,
        }
    }

    /// Whether this is an object reference.
    pub fn is_object(&self) -> bool {
        self.as_object().is_some()
    }
}

impl From<bool> for HeapValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for HeapValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for HeapValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for HeapValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<&str> for HeapValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for HeapValue {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<ObjectId> for HeapValue {
    fn from(id: ObjectId) -> Self {
        Self::Object(id)
    }
}
