use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Queue core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueCoreConfig {
    /// Ordering engine settings
    pub ordering: OrderingConfig,

    /// Snapshot polling settings
    pub polling: PollingConfig,
}

/// Ordering engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderingConfig {
    /// Display name used when an entry has no resolvable profile or the
    /// profile carries no name
    pub fallback_display_name: String,
}

/// Snapshot polling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    /// Interval between snapshot polls
    pub poll_interval: Duration,

    /// Maximum consecutive fetch failures before the watcher logs at error
    /// level instead of warn
    pub max_quiet_failures: u32,
}

impl QueueCoreConfig {
    /// Validate the configuration for consistency and correctness
    pub fn validate(&self) -> Result<(), String> {
        if self.ordering.fallback_display_name.is_empty() {
            return Err("fallback_display_name cannot be empty".to_string());
        }

        if self.polling.poll_interval.is_zero() {
            return Err("poll_interval must be greater than 0".to_string());
        }

        if self.polling.poll_interval < Duration::from_millis(100) {
            return Err("poll_interval below 100ms would hammer the backend".to_string());
        }

        Ok(())
    }
}

impl Default for QueueCoreConfig {
    fn default() -> Self {
        Self {
            ordering: OrderingConfig::default(),
            polling: PollingConfig::default(),
        }
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            // Patient-facing fallback; the roster is Brazilian-Portuguese
            fallback_display_name: "Paciente".to_string(),
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            max_quiet_failures: 3,
        }
    }
}
