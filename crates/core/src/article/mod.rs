//! Articles queued for publication and their storage.

mod retention;
mod sqlite_store;
mod store;
mod types;

pub use retention::purge_expired;
pub use sqlite_store::SqliteArticleStore;
pub use store::{ArticleError, ArticleStore};
pub use types::{Article, ArticleFilter, HostedPost, NewArticle};
