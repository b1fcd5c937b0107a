//! Mock notifier for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::notify::{Notification, Notifier, NotifyError};

/// Mock implementation of the Notifier trait. Records every send attempt.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Arc<RwLock<Vec<Notification>>>,
    fail: Arc<RwLock<bool>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent send fail (after being recorded).
    pub async fn set_fail(&self, fail: bool) {
        *self.fail.write().await = fail;
    }

    /// Every notification passed to `send`, including failed ones.
    pub async fn recorded(&self) -> Vec<Notification> {
        self.sent.read().await.clone()
    }

    pub async fn send_count(&self) -> usize {
        self.sent.read().await.len()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.write().await.push(notification.clone());

        if *self.fail.read().await {
            return Err(NotifyError::Http("mock notifier failure".to_string()));
        }
        Ok(())
    }
}
