pub mod article;
pub mod auth;
pub mod config;
pub mod hosting;
pub mod metrics;
pub mod notify;
pub mod publisher;
pub mod rewriter;
pub mod testing;

pub use article::{
    purge_expired, Article, ArticleError, ArticleFilter, ArticleStore, HostedPost, NewArticle,
    SqliteArticleStore,
};
pub use auth::{
    create_authenticator, ApiKeyAuthenticator, AuthError, AuthRequest, Authenticator, Identity,
    NoneAuthenticator,
};
pub use config::{
    load_config, load_config_from_str, validate_config, AuthConfig, AuthMethod, Config,
    ConfigError, DatabaseConfig, SanitizedConfig, ServerConfig,
};
pub use hosting::{
    promote_second_image, render_post_html, BloggerClient, BloggerConfig, HostingError,
    HostingService, PublishPost,
};
pub use notify::{
    create_notifier, LogNotifier, Notification, Notifier, NotifierBackend, NotifierConfig,
    NotifyError, RelayNotifier,
};
pub use publisher::{
    resolve_schedule, CycleError, CycleOutcome, CycleRequest, PublishOrchestrator,
    PublishReport, PublishScheduler, PublisherConfig, Schedule,
};
pub use rewriter::{GeminiConfig, GeminiRewriter, RewriteError, RewriteStyle, Rewriter};
