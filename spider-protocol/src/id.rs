//! Container identity.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity of a container, as assigned by a [`PropertyModel`](crate::PropertyModel).
///
/// Two containers with identical contents have distinct ids. The spider
/// keys its visited set on this, never on structural equality. What the
/// number means (an arena index, an address, a handle) is up to the model.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContainerId(pub u64);

impl ContainerId {
    /// Create a container id from a raw handle.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw handle.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<u64> for ContainerId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}
