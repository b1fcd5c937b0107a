//! HTTP mail relay notifier.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::{Notification, Notifier, NotifyError, RelayConfig};
use crate::metrics;

/// Hands notifications to an HTTP mail relay as JSON.
pub struct RelayNotifier {
    client: Client,
    url: String,
    api_key: String,
    from: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

impl RelayNotifier {
    pub fn new(config: &RelayConfig, from: &str) -> Result<Self, NotifyError> {
        if config.url.is_empty() {
            return Err(NotifyError::NotConfigured("relay url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(u64::from(config.timeout_secs)))
            .build()
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: config.url.clone(),
            api_key: config.api_key.clone(),
            from: from.to_string(),
        })
    }

    async fn post(&self, notification: &Notification) -> Result<(), NotifyError> {
        let mut request = self.client.post(&self.url).json(&RelayMessage {
            from: &self.from,
            to: &notification.to,
            subject: &notification.subject,
            html: &notification.html,
        });
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| NotifyError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Relay accepted notification '{}'", notification.subject);
        Ok(())
    }
}

#[async_trait]
impl Notifier for RelayNotifier {
    fn name(&self) -> &str {
        "relay"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.to.is_empty() {
            return Err(NotifyError::NotConfigured(
                "no recipient address configured".to_string(),
            ));
        }

        let started = Instant::now();
        let result = self.post(notification).await;
        metrics::observe_external_call("relay", "send", started, result.is_ok());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn notifier(url: String) -> RelayNotifier {
        let config = RelayConfig {
            url,
            api_key: "relay-key".to_string(),
            timeout_secs: 5,
        };
        RelayNotifier::new(&config, "bot@example.com").unwrap()
    }

    fn notification() -> Notification {
        Notification {
            to: "admin@example.com".to_string(),
            subject: "Blog Published: Hello".to_string(),
            html: "<p>hi</p>".to_string(),
        }
    }

    #[tokio::test]
    async fn test_send_posts_json() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/send")
                    .header("authorization", "Bearer relay-key")
                    .json_body(json!({
                        "from": "bot@example.com",
                        "to": "admin@example.com",
                        "subject": "Blog Published: Hello",
                        "html": "<p>hi</p>"
                    }));
                then.status(202);
            })
            .await;

        notifier(server.url("/send"))
            .send(&notification())
            .await
            .unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/send");
                then.status(500).body("smtp down");
            })
            .await;

        match notifier(server.url("/send")).send(&notification()).await {
            Err(NotifyError::Rejected { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "smtp down");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_without_recipient() {
        let mut message = notification();
        message.to.clear();
        let result = notifier("http://127.0.0.1:9/send".to_string())
            .send(&message)
            .await;
        assert!(matches!(result, Err(NotifyError::NotConfigured(_))));
    }
}
