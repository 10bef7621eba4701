//! Scheduler time budget.
//!
//! [`Budget`] serializes as a plain integer (time units), not as serde's
//! internal `{"secs": N, "nanos": N}` format, so configs stay readable.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A scheduler time budget in abstract time units.
///
/// Schedulers decide what a unit is. The local scheduler treats one unit
/// as one millisecond, which is what [`Budget::to_std`] assumes.
///
/// # Examples
///
/// ```
/// use spider_protocol::Budget;
///
/// let b = Budget::from_units(250).min(Budget::from_units(100));
/// assert_eq!(b.as_units(), 100);
///
/// let json = serde_json::to_string(&b).unwrap();
/// assert_eq!(json, "100");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Budget(u64);

impl Budget {
    /// No time at all.
    pub const ZERO: Self = Self(0);

    /// Effectively unlimited.
    pub const UNLIMITED: Self = Self(u64::MAX);

    /// Create from time units.
    pub fn from_units(units: u64) -> Self {
        Self(units)
    }

    /// Get the value in time units.
    pub fn as_units(&self) -> u64 {
        self.0
    }

    /// The smaller of two budgets.
    pub fn min(self, other: Self) -> Self {
        Ord::min(self, other)
    }

    /// Convert to `std::time::Duration`, one unit per millisecond.
    pub fn to_std(&self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl From<Duration> for Budget {
    fn from(d: Duration) -> Self {
        Self(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

impl Default for Budget {
    fn default() -> Self {
        Self::UNLIMITED
    }
}

impl std::fmt::Display for Budget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}u", self.0)
    }
}
