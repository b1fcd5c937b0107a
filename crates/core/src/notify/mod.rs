//! Outcome notifications for the administrator.
//!
//! Notifications are best-effort: callers log a failed send and carry on.

mod log;
mod messages;
mod relay;

pub use self::log::LogNotifier;
pub use messages::{connectivity_check, cycle_failed, nothing_to_publish, published};
pub use relay::RelayNotifier;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a notification backend.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Relay rejected message: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("Notifier not configured: {0}")]
    NotConfigured(String),
}

/// A single outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Trait for notification backends.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotifierBackend {
    /// Write notifications to the service log.
    #[default]
    Log,
    /// POST notifications to an HTTP mail relay.
    Relay,
}

/// HTTP mail relay endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayConfig {
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_relay_timeout")]
    pub timeout_secs: u32,
}

fn default_relay_timeout() -> u32 {
    15
}

/// Notification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotifierConfig {
    #[serde(default)]
    pub backend: NotifierBackend,
    /// Recipient of every outcome notification.
    #[serde(default)]
    pub admin_email: String,
    /// Sender address passed to the relay.
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub relay: Option<RelayConfig>,
}

/// Build the notifier selected by configuration.
pub fn create_notifier(config: &NotifierConfig) -> Result<Arc<dyn Notifier>, NotifyError> {
    match config.backend {
        NotifierBackend::Log => Ok(Arc::new(LogNotifier::new())),
        NotifierBackend::Relay => {
            let relay = config.relay.as_ref().ok_or_else(|| {
                NotifyError::NotConfigured("notifier.relay section is missing".to_string())
            })?;
            Ok(Arc::new(RelayNotifier::new(relay, &config.from)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_log_notifier_by_default() {
        let notifier = create_notifier(&NotifierConfig::default()).unwrap();
        assert_eq!(notifier.name(), "log");
    }

    #[test]
    fn test_create_relay_without_section_fails() {
        let config = NotifierConfig {
            backend: NotifierBackend::Relay,
            ..Default::default()
        };
        assert!(matches!(
            create_notifier(&config),
            Err(NotifyError::NotConfigured(_))
        ));
    }

    #[test]
    fn test_create_relay_notifier() {
        let config = NotifierConfig {
            backend: NotifierBackend::Relay,
            admin_email: "admin@example.com".to_string(),
            from: "bot@example.com".to_string(),
            relay: Some(RelayConfig {
                url: "http://127.0.0.1:9/send".to_string(),
                api_key: "k".to_string(),
                timeout_secs: 5,
            }),
        };
        let notifier = create_notifier(&config).unwrap();
        assert_eq!(notifier.name(), "relay");
    }
}
