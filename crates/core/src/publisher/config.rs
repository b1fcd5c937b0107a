//! Publisher configuration.

use serde::{Deserialize, Serialize};

/// Configuration for publishing and housekeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublisherConfig {
    /// Published articles older than this many days are purged by the
    /// maintenance endpoint.
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,

    /// Run a cycle every N seconds from inside the service.
    /// Unset means cycles are only triggered over HTTP.
    #[serde(default)]
    pub schedule_interval_secs: Option<u64>,
}

fn default_retention_days() -> u32 {
    7
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            schedule_interval_secs: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PublisherConfig::default();
        assert_eq!(config.retention_days, 7);
        assert!(config.schedule_interval_secs.is_none());
    }

    #[test]
    fn test_deserialize_full() {
        let toml = r#"
            retention_days = 30
            schedule_interval_secs = 21600
        "#;
        let config: PublisherConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.retention_days, 30);
        assert_eq!(config.schedule_interval_secs, Some(21600));
    }
}
