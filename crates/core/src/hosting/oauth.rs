//! OAuth access tokens for the hosting API.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use super::HostingError;
use crate::metrics;

/// Supplies bearer tokens for hosting API calls.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    async fn access_token(&self) -> Result<String, HostingError>;
}

/// Exchanges a long-lived refresh token for a short-lived access token on
/// every call. Publishing happens a few times a day, so tokens are not cached.
pub struct RefreshTokenProvider {
    client: Client,
    token_url: String,
    client_id: String,
    client_secret: String,
    refresh_token: String,
}

impl RefreshTokenProvider {
    pub fn new(
        client: Client,
        token_url: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            refresh_token: refresh_token.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl TokenProvider for RefreshTokenProvider {
    async fn access_token(&self) -> Result<String, HostingError> {
        if self.client_id.is_empty() || self.client_secret.is_empty() || self.refresh_token.is_empty()
        {
            return Err(HostingError::NotConfigured(
                "OAuth client id, client secret and refresh token are required".to_string(),
            ));
        }

        let started = Instant::now();
        let result = self.exchange().await;
        metrics::observe_external_call("oauth", "refresh_token", started, result.is_ok());
        result
    }
}

impl RefreshTokenProvider {
    async fn exchange(&self) -> Result<String, HostingError> {
        debug!("Refreshing hosting access token");

        let response = self
            .client
            .post(&self.token_url)
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("client_secret", self.client_secret.as_str()),
                ("refresh_token", self.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .send()
            .await
            .map_err(|e| HostingError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("OAuth refresh rejected ({}): {}", status, body);
            return Err(HostingError::Auth(format!(
                "token refresh failed with status {}",
                status.as_u16()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| HostingError::Auth(format!("unexpected token response: {}", e)))?;

        if token.access_token.is_empty() {
            return Err(HostingError::Auth("empty access token".to_string()));
        }

        Ok(token.access_token)
    }
}
