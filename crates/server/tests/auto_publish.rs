//! HTTP-level tests for the publish trigger and manual publish endpoints.

mod common;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use serde_json::json;

use autoblog_core::{ArticleStore, HostingError, RewriteError};
use common::{fixtures, TestConfig, TestFixture, ADMIN_EMAIL};

#[tokio::test]
async fn test_empty_body_publishes_oldest_now() {
    let fixture = TestFixture::new();
    let now = Utc::now();
    let older = fixture
        .store
        .create(fixtures::article_created_days_ago("Older", 2, now))
        .unwrap();
    fixture
        .store
        .create(fixtures::article_created_days_ago("Newer", 1, now))
        .unwrap();

    let response = fixture.post_empty("/api/v1/auto-publish").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        "Blog improved and published successfully"
    );
    assert_eq!(response.body["articleId"], older.id.as_str());
    assert_eq!(response.body["hostedPostId"], "mock-post-1");
    assert_eq!(response.body["scheduledFor"], "Now");

    let stored = fixture.store.get(&older.id).unwrap().unwrap();
    assert!(stored.published);
    assert_eq!(stored.hosted_post_id.as_deref(), Some("mock-post-1"));

    let sent = fixture.notifier.recorded().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, ADMIN_EMAIL);
    assert_eq!(sent[0].subject, "Blog Published: Older");
}

#[tokio::test]
async fn test_explicit_schedule_is_forwarded() {
    let fixture = TestFixture::new();
    fixture.store.create(fixtures::article("Scheduled")).unwrap();

    let response = fixture
        .post(
            "/api/v1/auto-publish",
            json!({"publishDate": "2030-01-15", "publishTime": "09:30"}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["scheduledFor"], "2030-01-15 09:30:00");

    let posts = fixture.hosting.recorded_posts().await;
    assert_eq!(posts.len(), 1);
    let expected: DateTime<Utc> = "2030-01-15T09:30:00Z".parse().unwrap();
    assert_eq!(posts[0].publish_at, expected);
}

#[tokio::test]
async fn test_date_without_time_is_rejected_before_selection() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Waiting")).unwrap();

    let response = fixture
        .post("/api/v1/auto-publish", json!({"publishDate": "2030-01-15"}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(
        response.body["error"],
        "Publish date and time are required in the body if not publishing instantly."
    );
    assert_eq!(fixture.rewriter.call_count().await, 0);
    assert_eq!(fixture.hosting.publish_count().await, 0);
    assert_eq!(fixture.notifier.send_count().await, 0);
    assert!(!fixture.store.get(&article.id).unwrap().unwrap().published);
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let fixture = TestFixture::new();
    fixture.store.create(fixtures::article("Waiting")).unwrap();

    let response = fixture.post_raw("/api/v1/auto-publish", "{not json").await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.hosting.publish_count().await, 0);
}

#[tokio::test]
async fn test_nothing_to_publish_notifies_and_succeeds() {
    let fixture = TestFixture::new();

    let response = fixture.post_empty("/api/v1/auto-publish").await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "No unpublished blogs found.");
    assert!(response.body.get("articleId").is_none());

    let sent = fixture.notifier.recorded().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Auto-Publish: No Unpublished Blogs Found");
    assert_eq!(fixture.rewriter.call_count().await, 0);
    assert_eq!(fixture.hosting.publish_count().await, 0);
}

#[tokio::test]
async fn test_rewrite_failure_is_server_error_and_leaves_article() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Fragile")).unwrap();
    fixture
        .rewriter
        .set_next_error(RewriteError::Api {
            status: 500,
            message: "overloaded".to_string(),
        })
        .await;

    let response = fixture.post_empty("/api/v1/auto-publish").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("overloaded"));
    assert_eq!(fixture.hosting.publish_count().await, 0);
    assert!(!fixture.store.get(&article.id).unwrap().unwrap().published);
}

#[tokio::test]
async fn test_hosting_failure_keeps_article_eligible() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Retry me")).unwrap();
    fixture
        .hosting
        .set_next_error(HostingError::Auth("token revoked".to_string()))
        .await;

    let failed = fixture.post_empty("/api/v1/auto-publish").await;
    assert_status!(failed, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!fixture.store.get(&article.id).unwrap().unwrap().published);

    let retried = fixture.post_empty("/api/v1/auto-publish").await;
    assert_status!(retried, StatusCode::OK);
    assert_eq!(retried.body["articleId"], article.id.as_str());
}

#[tokio::test]
async fn test_manual_publish_skips_rewrite() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Manual")).unwrap();

    let response = fixture
        .post_empty(&format!("/api/v1/articles/{}/publish", article.id))
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Blog published");
    assert_eq!(fixture.rewriter.call_count().await, 0);

    let posts = fixture.hosting.recorded_posts().await;
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Manual");
}

#[tokio::test]
async fn test_manual_publish_scheduled_message() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Later")).unwrap();

    let response = fixture
        .post(
            &format!("/api/v1/articles/{}/publish", article.id),
            json!({"publishDate": "2031-06-01", "publishTime": "12:00:00"}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Blog scheduled for publication");
    assert_eq!(response.body["scheduledFor"], "2031-06-01 12:00:00");
}

#[tokio::test]
async fn test_manual_publish_unknown_and_already_published() {
    let fixture = TestFixture::new();

    let missing = fixture
        .post_empty("/api/v1/articles/does-not-exist/publish")
        .await;
    assert_status!(missing, StatusCode::NOT_FOUND);

    let article = fixture.store.create(fixtures::article("Once")).unwrap();
    let path = format!("/api/v1/articles/{}/publish", article.id);
    assert_status!(fixture.post_empty(&path).await, StatusCode::OK);

    let again = fixture.post_empty(&path).await;
    assert_status!(again, StatusCode::CONFLICT);
    assert_eq!(fixture.hosting.publish_count().await, 1);
}

#[tokio::test]
async fn test_publishing_unconfigured_is_unavailable() {
    let fixture = TestFixture::with_config(TestConfig::unconfigured());
    fixture.store.create(fixtures::article("Stuck")).unwrap();

    let response = fixture.post_empty("/api/v1/auto-publish").await;

    assert_status!(response, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(fixture.notifier.send_count().await, 0);
}

#[tokio::test]
async fn test_api_key_required_on_trigger() {
    let fixture = TestFixture::with_config(TestConfig::with_api_key("s3cret"));
    fixture.store.create(fixtures::article("Guarded")).unwrap();

    let anonymous = fixture.post_empty("/api/v1/auto-publish").await;
    assert_status!(anonymous, StatusCode::UNAUTHORIZED);

    let wrong = fixture
        .post_with_headers("/api/v1/auto-publish", &[("X-API-Key", "nope")])
        .await;
    assert_status!(wrong, StatusCode::UNAUTHORIZED);
    assert_eq!(fixture.hosting.publish_count().await, 0);

    let authorized = fixture
        .post_with_headers(
            "/api/v1/auto-publish",
            &[("Authorization", "Bearer s3cret")],
        )
        .await;
    assert_status!(authorized, StatusCode::OK);

    // Health stays public
    let health = fixture.get("/api/v1/health").await;
    assert_status!(health, StatusCode::OK);
}

#[tokio::test]
async fn test_store_update_failure_after_publish_is_server_error() {
    let fixture = TestFixture::new();
    let article = fixture.store.create(fixtures::article("Gone")).unwrap();
    let store = std::sync::Arc::clone(&fixture.store);
    let id = article.id.clone();
    fixture
        .hosting
        .set_on_publish(move |_| {
            store.delete(&id).unwrap();
        })
        .await;

    let response = fixture.post_empty("/api/v1/auto-publish").await;

    assert_status!(response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.body["error"]
        .as_str()
        .unwrap()
        .contains("https://mock.blog.example.com/posts/1.html"));
    assert_eq!(fixture.hosting.publish_count().await, 1);

    let sent = fixture.notifier.recorded().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, "Auto-Publish Failed: Gone");
}

#[tokio::test]
async fn test_invalid_timing_with_empty_store_is_bad_request() {
    let fixture = TestFixture::new();

    let response = fixture
        .post("/api/v1/auto-publish", json!({"publishDate": "2030-01-15"}))
        .await;

    assert_status!(response, StatusCode::BAD_REQUEST);
    assert_eq!(fixture.notifier.send_count().await, 0);
}

#[tokio::test]
async fn test_explicit_null_timing_publishes_now() {
    let fixture = TestFixture::new();
    fixture.store.create(fixtures::article("Nulls")).unwrap();

    let response = fixture
        .post(
            "/api/v1/auto-publish",
            json!({"publishDate": null, "publishTime": null}),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["scheduledFor"], "Now");
}
