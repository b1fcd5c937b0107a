//! Common test utilities for E2E testing with mocks.
//!
//! This module provides a test fixture that creates an in-process server
//! with mock collaborators injected, so the HTTP surface can be exercised
//! without the rewrite, hosting or mail services.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use autoblog_core::{
    testing::{MockHostingService, MockNotifier, MockRewriter},
    ApiKeyAuthenticator, ArticleStore, AuthConfig, AuthMethod, Authenticator, Config,
    DatabaseConfig, NoneAuthenticator, PublishOrchestrator, ServerConfig, SqliteArticleStore,
};

/// Re-export fixtures for test convenience
pub use autoblog_core::testing::fixtures;

pub const ADMIN_EMAIL: &str = "admin@example.com";

/// Test fixture for E2E testing with mock dependencies.
///
/// # Example
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_trigger() {
///     let fixture = TestFixture::new();
///     fixture.store.create(fixtures::article("Hello")).unwrap();
///
///     let response = fixture.post_empty("/api/v1/auto-publish").await;
///     assert_eq!(response.status, 200);
/// }
/// ```
pub struct TestFixture {
    /// The Axum router for testing
    pub router: Router,
    /// Article store backing the router
    pub store: Arc<SqliteArticleStore>,
    pub rewriter: Arc<MockRewriter>,
    pub hosting: Arc<MockHostingService>,
    pub notifier: Arc<MockNotifier>,
    /// Temporary directory for the test database
    pub temp_dir: TempDir,
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

/// Configuration for test fixture.
#[derive(Debug, Clone)]
pub struct TestConfig {
    /// Wire the rewriter into the router (needed by /rewrite and publishing)
    pub enable_rewriter: bool,
    /// Wire the orchestrator into the router
    pub enable_publishing: bool,
    /// Require this API key on protected routes
    pub api_key: Option<String>,
    /// Recipient for notifications; empty disables the test endpoint
    pub admin_email: String,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            enable_rewriter: true,
            enable_publishing: true,
            api_key: None,
            admin_email: ADMIN_EMAIL.to_string(),
        }
    }
}

impl TestConfig {
    /// No rewriter and no hosting: publishing endpoints answer 503.
    pub fn unconfigured() -> Self {
        Self {
            enable_rewriter: false,
            enable_publishing: false,
            api_key: None,
            admin_email: ADMIN_EMAIL.to_string(),
        }
    }

    pub fn without_admin_email() -> Self {
        Self {
            admin_email: String::new(),
            ..Self::default()
        }
    }

    pub fn with_api_key(key: &str) -> Self {
        Self {
            api_key: Some(key.to_string()),
            ..Self::default()
        }
    }
}

impl TestFixture {
    /// Create a new test fixture with default mocks.
    pub fn new() -> Self {
        Self::with_config(TestConfig::default())
    }

    /// Create a test fixture with custom configuration.
    pub fn with_config(test_config: TestConfig) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");

        let rewriter = Arc::new(MockRewriter::new());
        let hosting = Arc::new(MockHostingService::new());
        let notifier = Arc::new(MockNotifier::new());

        let mut config = Config {
            auth: AuthConfig {
                method: AuthMethod::None,
                api_key: None,
            },
            server: ServerConfig {
                host: std::net::IpAddr::V4(std::net::Ipv4Addr::LOCALHOST),
                port: 0, // Not used for in-process testing
            },
            database: DatabaseConfig {
                path: db_path.clone(),
            },
            rewriter: None,
            hosting: None,
            notifier: Default::default(),
            publisher: Default::default(),
        };
        config.notifier.admin_email = test_config.admin_email.clone();

        let authenticator: Arc<dyn Authenticator> = match &test_config.api_key {
            Some(key) => {
                config.auth = AuthConfig {
                    method: AuthMethod::ApiKey,
                    api_key: Some(key.clone()),
                };
                Arc::new(ApiKeyAuthenticator::new(key.clone()))
            }
            None => Arc::new(NoneAuthenticator),
        };

        let store = Arc::new(
            SqliteArticleStore::new(&db_path).expect("Failed to create article store"),
        );

        let rewriter_handle = test_config
            .enable_rewriter
            .then(|| Arc::clone(&rewriter) as Arc<dyn autoblog_core::Rewriter>);

        let orchestrator = test_config.enable_publishing.then(|| {
            Arc::new(PublishOrchestrator::new(
                Arc::clone(&store) as Arc<dyn ArticleStore>,
                Arc::clone(&rewriter) as Arc<dyn autoblog_core::Rewriter>,
                Arc::clone(&hosting) as Arc<dyn autoblog_core::HostingService>,
                Arc::clone(&notifier) as Arc<dyn autoblog_core::Notifier>,
                test_config.admin_email.clone(),
            ))
        });

        let state = Arc::new(autoblog_server::AppState::new(
            config,
            authenticator,
            Arc::clone(&store) as Arc<dyn ArticleStore>,
            Arc::clone(&notifier) as Arc<dyn autoblog_core::Notifier>,
            rewriter_handle,
            orchestrator,
        ));

        let router = autoblog_server::create_router(state);

        Self {
            router,
            store,
            rewriter,
            hosting,
            notifier,
            temp_dir,
        }
    }

    /// Send a GET request to the test server.
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request("GET", path, None, &[]).await
    }

    /// Send a POST request with JSON body.
    pub async fn post(&self, path: &str, body: Value) -> TestResponse {
        self.request("POST", path, Some(body), &[]).await
    }

    /// Send a POST request without a body.
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request("POST", path, None, &[]).await
    }

    /// Send a POST request without a body and with extra headers.
    pub async fn post_with_headers(&self, path: &str, headers: &[(&str, &str)]) -> TestResponse {
        self.request("POST", path, None, headers).await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, path: &str) -> TestResponse {
        self.request("DELETE", path, None, &[]).await
    }

    /// Send a POST request with raw string body (for testing malformed JSON).
    pub async fn post_raw(&self, path: &str, body: &str) -> TestResponse {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    /// Fetch a path and return the raw text body.
    pub async fn get_text(&self, path: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");
        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();
        (status, String::from_utf8_lossy(&bytes).to_string())
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        headers: &[(&str, &str)],
    ) -> TestResponse {
        let mut request_builder = Request::builder().method(method).uri(path);
        for (name, value) in headers {
            request_builder = request_builder.header(*name, *value);
        }

        let body = if let Some(json_body) = body {
            request_builder = request_builder.header("Content-Type", "application/json");
            Body::from(serde_json::to_vec(&json_body).unwrap())
        } else {
            Body::empty()
        };

        self.send(request_builder.body(body).unwrap()).await
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes();

        let body: Value = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }
}

/// Helper to assert a response has expected status.
#[macro_export]
macro_rules! assert_status {
    ($response:expr, $status:expr) => {
        assert_eq!(
            $response.status, $status,
            "Expected status {:?}, got {:?}. Body: {}",
            $status,
            $response.status,
            serde_json::to_string_pretty(&$response.body).unwrap_or_default()
        );
    };
}
