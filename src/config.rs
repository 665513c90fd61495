//! Engine configuration.
//!
//! Tunable knobs for a scheduling run. Every field has a serde default so a
//! config can be deserialized from an empty document and overridden piecemeal.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::models::Priority;

/// Per-run tunables.
///
/// The defaults reproduce the engine's documented behavior: a 14-day
/// horizon, no minimum-slot filtering (only zero-length fragments are
/// discarded), medium priority for tasks that arrive without one, and no
/// assumed estimate (estimate-less tasks are dropped during normalization).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Planning horizon length in days.
    pub horizon_days: i64,
    /// Shortest free fragment worth keeping, in minutes. Zero keeps every
    /// non-empty fragment.
    pub min_slot_minutes: i64,
    /// Priority assumed when the board omits one.
    pub default_priority: Priority,
    /// Estimate assumed when the board omits one. `None` means such tasks
    /// are dropped with a warning instead of guessed at.
    pub default_estimate_minutes: Option<i64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_days: 14,
            min_slot_minutes: 0,
            default_priority: Priority::Medium,
            default_estimate_minutes: None,
        }
    }
}

impl EngineConfig {
    /// Horizon length as a duration.
    pub fn horizon_length(&self) -> Duration {
        Duration::days(self.horizon_days)
    }

    /// Minimum free-fragment size as a duration.
    pub fn min_slot(&self) -> Duration {
        Duration::minutes(self.min_slot_minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.horizon_days, 14);
        assert_eq!(config.min_slot_minutes, 0);
        assert_eq!(config.default_priority, Priority::Medium);
        assert_eq!(config.default_estimate_minutes, None);
    }

    #[test]
    fn test_deserialize_empty_document() {
        let config: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.horizon_days, 14);
    }

    #[test]
    fn test_deserialize_partial_override() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"horizon_days": 7, "default_priority": "high"}"#).unwrap();
        assert_eq!(config.horizon_days, 7);
        assert_eq!(config.default_priority, Priority::High);
        assert_eq!(config.min_slot_minutes, 0);
    }

    #[test]
    fn test_durations() {
        let config = EngineConfig {
            horizon_days: 2,
            min_slot_minutes: 15,
            ..Default::default()
        };
        assert_eq!(config.horizon_length(), Duration::days(2));
        assert_eq!(config.min_slot(), Duration::minutes(15));
    }
}
