//! Mock hosting service for testing.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::article::HostedPost;
use crate::hosting::{HostingError, HostingService, PublishPost};

/// Callback run on every accepted post, before the ids are handed back.
pub type PublishHook = Arc<dyn Fn(&PublishPost) + Send + Sync>;

/// Mock implementation of the HostingService trait.
///
/// Accepts every post and hands out sequential ids
/// (`mock-post-1`, `mock-post-2`, ...) unless an error is queued.
pub struct MockHostingService {
    posts: Arc<RwLock<Vec<PublishPost>>>,
    next_error: Arc<RwLock<Option<HostingError>>>,
    on_publish: Arc<RwLock<Option<PublishHook>>>,
}

impl Default for MockHostingService {
    fn default() -> Self {
        Self::new()
    }
}

impl MockHostingService {
    pub fn new() -> Self {
        Self {
            posts: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            on_publish: Arc::new(RwLock::new(None)),
        }
    }

    /// Run `hook` whenever a post is accepted. Lets tests change the store
    /// while the post is "going live".
    pub async fn set_on_publish(&self, hook: impl Fn(&PublishPost) + Send + Sync + 'static) {
        *self.on_publish.write().await = Some(Arc::new(hook));
    }

    /// Configure the next publish to fail with the given error.
    pub async fn set_next_error(&self, error: HostingError) {
        *self.next_error.write().await = Some(error);
    }

    /// Posts accepted so far, in order. Failed attempts are not recorded.
    pub async fn recorded_posts(&self) -> Vec<PublishPost> {
        self.posts.read().await.clone()
    }

    /// Number of posts accepted.
    pub async fn publish_count(&self) -> usize {
        self.posts.read().await.len()
    }
}

#[async_trait]
impl HostingService for MockHostingService {
    fn name(&self) -> &str {
        "mock"
    }

    async fn publish(&self, post: &PublishPost) -> Result<HostedPost, HostingError> {
        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(hook) = self.on_publish.read().await.clone() {
            hook(post);
        }

        let mut posts = self.posts.write().await;
        posts.push(post.clone());
        let n = posts.len();

        Ok(HostedPost {
            id: format!("mock-post-{}", n),
            url: format!("https://mock.blog.example.com/posts/{}.html", n),
        })
    }
}
