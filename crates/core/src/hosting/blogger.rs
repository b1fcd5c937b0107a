//! Blogger v3 API client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::layout::render_post_html;
use super::oauth::{RefreshTokenProvider, TokenProvider};
use super::{HostedPost, HostingError, HostingService, PublishPost};
use crate::metrics;

/// Blogger client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BloggerConfig {
    pub blog_id: String,
    /// OAuth client credentials and the offline refresh token.
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub refresh_token: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u32,
}

fn default_token_url() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

fn default_api_base() -> String {
    "https://www.googleapis.com/blogger/v3".to_string()
}

fn default_timeout() -> u32 {
    30
}

impl BloggerConfig {
    pub fn new(blog_id: impl Into<String>) -> Self {
        Self {
            blog_id: blog_id.into(),
            client_id: String::new(),
            client_secret: String::new(),
            refresh_token: String::new(),
            token_url: default_token_url(),
            api_base: default_api_base(),
            timeout_secs: default_timeout(),
        }
    }
}

/// Publishes posts to a Blogger blog.
pub struct BloggerClient {
    client: Client,
    blog_id: String,
    api_base: String,
    timeout: Duration,
    tokens: Arc<dyn TokenProvider>,
}

impl BloggerClient {
    /// Create a client that authenticates with the configured refresh token.
    ///
    /// Missing OAuth credentials are reported on the first publish, not here,
    /// so the rest of the service can run without them.
    pub fn new(config: BloggerConfig) -> Result<Self, HostingError> {
        if config.blog_id.is_empty() {
            return Err(HostingError::NotConfigured(
                "Blogger blog id is required".to_string(),
            ));
        }

        let timeout = Duration::from_secs(u64::from(config.timeout_secs));
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HostingError::Http(e.to_string()))?;

        let tokens = Arc::new(RefreshTokenProvider::new(
            client.clone(),
            config.token_url,
            config.client_id,
            config.client_secret,
            config.refresh_token,
        ));

        Ok(Self {
            client,
            blog_id: config.blog_id,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            timeout,
            tokens,
        })
    }

    /// Replace the token source (tests, service accounts).
    pub fn with_token_provider(mut self, tokens: Arc<dyn TokenProvider>) -> Self {
        self.tokens = tokens;
        self
    }

    async fn insert_post(&self, post: &PublishPost) -> Result<HostedPost, HostingError> {
        let access_token = self.tokens.access_token().await?;

        let body = BloggerPostRequest {
            kind: "blogger#post",
            blog: BloggerBlogRef {
                id: &self.blog_id,
            },
            title: &post.title,
            content: render_post_html(&post.content, &post.images),
            published: post.publish_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        debug!(
            "Publishing to Blogger: blog={}, title='{}', images={}, published={}",
            self.blog_id,
            post.title,
            post.images.len(),
            body.published
        );

        let response = self
            .client
            .post(format!(
                "{}/blogs/{}/posts",
                self.api_base,
                urlencoding::encode(&self.blog_id)
            ))
            .bearer_auth(access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HostingError::Timeout(self.timeout)
                } else {
                    HostingError::Http(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<BloggerErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(HostingError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let created: BloggerPostResponse = response.json().await.map_err(|e| {
            HostingError::MalformedResponse(format!("Failed to parse post response: {}", e))
        })?;

        if created.id.is_empty() || created.url.is_empty() {
            return Err(HostingError::MalformedResponse(
                "post response is missing id or url".to_string(),
            ));
        }

        info!("Blogger accepted post {} ({})", created.id, created.url);

        Ok(HostedPost {
            id: created.id,
            url: created.url,
        })
    }
}

#[async_trait]
impl HostingService for BloggerClient {
    fn name(&self) -> &str {
        "blogger"
    }

    async fn publish(&self, post: &PublishPost) -> Result<HostedPost, HostingError> {
        let started = Instant::now();
        let result = self.insert_post(post).await;
        metrics::observe_external_call("blogger", "insert_post", started, result.is_ok());
        result
    }
}

#[derive(Debug, Serialize)]
struct BloggerPostRequest<'a> {
    kind: &'static str,
    blog: BloggerBlogRef<'a>,
    title: &'a str,
    content: String,
    published: String,
}

#[derive(Debug, Serialize)]
struct BloggerBlogRef<'a> {
    id: &'a str,
}

#[derive(Debug, Deserialize)]
struct BloggerPostResponse {
    id: String,
    url: String,
}

#[derive(Debug, Deserialize)]
struct BloggerErrorEnvelope {
    error: BloggerErrorDetail,
}

#[derive(Debug, Deserialize)]
struct BloggerErrorDetail {
    message: String,
}
