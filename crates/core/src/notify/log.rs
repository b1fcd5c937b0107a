use async_trait::async_trait;
use tracing::info;

use super::{Notification, Notifier, NotifyError};

/// Notifier that only writes to the log. Used when no mail relay is set up.
#[derive(Debug, Default)]
pub struct LogNotifier;

impl LogNotifier {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        info!(
            to = %notification.to,
            subject = %notification.subject,
            "Notification"
        );
        Ok(())
    }
}
