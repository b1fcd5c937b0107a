use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::PathBuf;

use crate::hosting::BloggerConfig;
use crate::notify::{NotifierBackend, NotifierConfig};
use crate::publisher::PublisherConfig;
use crate::rewriter::GeminiConfig;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Text rewrite service. The publish cycle is unavailable without it.
    #[serde(default)]
    pub rewriter: Option<GeminiConfig>,
    /// Hosting service. The publish cycle is unavailable without it.
    #[serde(default)]
    pub hosting: Option<BloggerConfig>,
    #[serde(default)]
    pub notifier: NotifierConfig,
    #[serde(default)]
    pub publisher: PublisherConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    8080
}

/// Authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    pub method: AuthMethod,
    /// Shared key for the `api_key` method (Bearer or X-API-Key header).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AuthMethod {
    None,
    ApiKey,
}

/// Database configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("autoblog.db")
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub auth: SanitizedAuthConfig,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rewriter: Option<SanitizedRewriterConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosting: Option<SanitizedHostingConfig>,
    pub notifier: SanitizedNotifierConfig,
    pub publisher: PublisherConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedAuthConfig {
    pub method: String,
}

/// Rewriter config with the API key hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedRewriterConfig {
    pub model: String,
    pub api_base: String,
    pub api_key_configured: bool,
    pub timeout_secs: u32,
}

/// Hosting config with OAuth secrets hidden
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedHostingConfig {
    pub blog_id: String,
    pub api_base: String,
    pub client_id_configured: bool,
    pub client_secret_configured: bool,
    pub refresh_token_configured: bool,
    pub timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct SanitizedNotifierConfig {
    pub backend: String,
    pub admin_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relay_url: Option<String>,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            auth: SanitizedAuthConfig {
                method: match config.auth.method {
                    AuthMethod::None => "none".to_string(),
                    AuthMethod::ApiKey => "api_key".to_string(),
                },
            },
            server: config.server.clone(),
            database: config.database.clone(),
            rewriter: config.rewriter.as_ref().map(|r| SanitizedRewriterConfig {
                model: r.model.clone(),
                api_base: r.api_base.clone(),
                api_key_configured: !r.api_key.is_empty(),
                timeout_secs: r.timeout_secs,
            }),
            hosting: config.hosting.as_ref().map(|h| SanitizedHostingConfig {
                blog_id: h.blog_id.clone(),
                api_base: h.api_base.clone(),
                client_id_configured: !h.client_id.is_empty(),
                client_secret_configured: !h.client_secret.is_empty(),
                refresh_token_configured: !h.refresh_token.is_empty(),
                timeout_secs: h.timeout_secs,
            }),
            notifier: SanitizedNotifierConfig {
                backend: match config.notifier.backend {
                    NotifierBackend::Log => "log".to_string(),
                    NotifierBackend::Relay => "relay".to_string(),
                },
                admin_email: config.notifier.admin_email.clone(),
                relay_url: config.notifier.relay.as_ref().map(|r| r.url.clone()),
            },
            publisher: config.publisher.clone(),
        }
    }
}
