use super::{types::Config, AuthMethod, ConfigError};
use crate::notify::NotifierBackend;

/// Shortest interval accepted for the in-process publish schedule.
const MIN_SCHEDULE_INTERVAL_SECS: u64 = 60;

/// Longest retention window accepted, in days (about a century).
const MAX_RETENTION_DAYS: u32 = 36_500;

/// Validate configuration beyond what serde enforces.
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    if config.auth.method == AuthMethod::ApiKey
        && config.auth.api_key.as_deref().unwrap_or("").is_empty()
    {
        return Err(ConfigError::ValidationError(
            "auth.api_key must be set when auth.method = \"api_key\"".to_string(),
        ));
    }

    if config.notifier.backend == NotifierBackend::Relay && config.notifier.relay.is_none() {
        return Err(ConfigError::ValidationError(
            "notifier.relay must be set when notifier.backend = \"relay\"".to_string(),
        ));
    }

    if config.publisher.retention_days == 0 {
        return Err(ConfigError::ValidationError(
            "publisher.retention_days must be at least 1".to_string(),
        ));
    }

    if config.publisher.retention_days > MAX_RETENTION_DAYS {
        return Err(ConfigError::ValidationError(format!(
            "publisher.retention_days must be at most {}",
            MAX_RETENTION_DAYS
        )));
    }

    if let Some(interval) = config.publisher.schedule_interval_secs {
        if interval < MIN_SCHEDULE_INTERVAL_SECS {
            return Err(ConfigError::ValidationError(format!(
                "publisher.schedule_interval_secs must be at least {}",
                MIN_SCHEDULE_INTERVAL_SECS
            )));
        }
    }

    Ok(())
}
