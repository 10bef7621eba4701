//! Configuration for GraphSpider.

use serde::{Deserialize, Serialize};
use spider_protocol::Budget;

/// Default per-slice budget cap, in scheduler time units.
pub const DEFAULT_BUDGET_CAP: u64 = 100;

/// Static configuration for a [`GraphSpider`](crate::GraphSpider).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpiderConfig {
    /// Upper bound on the scheduler budget during a walk. The walk runs
    /// with `min(caller's budget, budget_cap)`.
    pub budget_cap: Budget,

    /// Put the caller's budget back when the walk ends, including when
    /// the walk future is dropped. When false the capped budget is left
    /// in place.
    pub restore_budget: bool,
}

impl SpiderConfig {
    /// Set the budget cap.
    pub fn with_budget_cap(mut self, cap: Budget) -> Self {
        self.budget_cap = cap;
        self
    }

    /// Set whether the caller's budget is restored afterwards.
    pub fn with_restore_budget(mut self, restore: bool) -> Self {
        self.restore_budget = restore;
        self
    }
}

impl Default for SpiderConfig {
    fn default() -> Self {
        Self {
            budget_cap: Budget::from_units(DEFAULT_BUDGET_CAP),
            restore_budget: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SpiderConfig = serde_json::from_str(r#"{"budget_cap": 25}"#).unwrap();
        assert_eq!(config.budget_cap, Budget::from_units(25));
        assert!(config.restore_budget);

        let config: SpiderConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, SpiderConfig::default());
    }

    #[test]
    fn builders_override() {
        let config = SpiderConfig::default()
            .with_budget_cap(Budget::from_units(5))
            .with_restore_budget(false);
        assert_eq!(config.budget_cap.as_units(), 5);
        assert!(!config.restore_budget);
    }
}
