//! Testing utilities and mock implementations.
//!
//! Mocks for every external collaborator of the publish cycle, so the
//! orchestrator and the HTTP surface can be exercised without network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use autoblog_core::testing::{MockHostingService, MockNotifier, MockRewriter};
//!
//! let rewriter = Arc::new(MockRewriter::new());
//! let hosting = Arc::new(MockHostingService::new());
//! let notifier = Arc::new(MockNotifier::new());
//!
//! hosting.set_next_error(HostingError::Auth("expired".into())).await;
//! ```

mod mock_hosting;
mod mock_notifier;
mod mock_rewriter;

pub use mock_hosting::{MockHostingService, PublishHook};
pub use mock_notifier::MockNotifier;
pub use mock_rewriter::MockRewriter;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::article::{HostedPost, NewArticle};

    /// A three-paragraph article without images.
    pub fn article(title: &str) -> NewArticle {
        NewArticle::new(
            title,
            format!(
                "{} opens the story.\n\nThe middle carries the detail.\n\nThe ending wraps up.",
                title
            ),
        )
    }

    /// An article with `count` image URLs.
    pub fn article_with_images(title: &str, count: usize) -> NewArticle {
        article(title).with_images(
            (1..=count).map(|i| format!("https://img.example.com/{}/{}.jpg", slug(title), i)),
        )
    }

    /// An article created `days` days before `now`.
    pub fn article_created_days_ago(title: &str, days: i64, now: DateTime<Utc>) -> NewArticle {
        article(title).with_created_at(now - Duration::days(days))
    }

    pub fn hosted_post(id: &str) -> HostedPost {
        HostedPost {
            id: id.to_string(),
            url: format!("https://example.blogspot.com/{}.html", id),
        }
    }

    fn slug(title: &str) -> String {
        title
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-")
    }
}
