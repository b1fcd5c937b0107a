//! Housekeeping for published articles.

use chrono::{DateTime, Datelike, Duration, Utc};
use tracing::info;

use super::{ArticleError, ArticleStore};
use crate::metrics;

/// Delete published articles older than `retention_days`, returning how many
/// rows were removed. Unpublished articles are never touched.
///
/// A window reaching before year 0 is rejected with
/// [`ArticleError::Invalid`].
pub fn purge_expired(
    store: &dyn ArticleStore,
    retention_days: u32,
    now: DateTime<Utc>,
) -> Result<usize, ArticleError> {
    let cutoff = now
        .checked_sub_signed(Duration::days(i64::from(retention_days)))
        .filter(|cutoff| cutoff.year() >= 0)
        .ok_or_else(|| {
            ArticleError::Invalid(format!(
                "retention of {} days reaches before year 0",
                retention_days
            ))
        })?;
    let deleted = store.delete_published_before(cutoff)?;

    metrics::ARTICLES_PURGED.inc_by(deleted as u64);
    info!(
        "Purged {} published article(s) older than {} day(s)",
        deleted, retention_days
    );

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::article::{HostedPost, NewArticle, SqliteArticleStore};

    #[test]
    fn test_purge_expired_respects_window() {
        let store = SqliteArticleStore::in_memory().unwrap();
        let now = Utc::now();
        let post = HostedPost {
            id: "1".to_string(),
            url: "https://blog.example.com/1".to_string(),
        };

        let stale = store.create(NewArticle::new("Stale", "x")).unwrap();
        store
            .mark_published(&stale.id, &post, now - Duration::days(8))
            .unwrap();
        let fresh = store.create(NewArticle::new("Fresh", "y")).unwrap();
        store
            .mark_published(&fresh.id, &post, now - Duration::days(6))
            .unwrap();

        assert_eq!(purge_expired(&store, 7, now).unwrap(), 1);
        assert!(store.get(&stale.id).unwrap().is_none());
        assert!(store.get(&fresh.id).unwrap().is_some());

        assert_eq!(purge_expired(&store, 7, now).unwrap(), 0);
    }

    #[test]
    fn test_purge_expired_rejects_window_past_representable_range() {
        let store = SqliteArticleStore::in_memory().unwrap();
        let now = Utc::now();
        let article = store.create(NewArticle::new("Kept", "x")).unwrap();
        let post = HostedPost {
            id: "1".to_string(),
            url: "https://blog.example.com/1".to_string(),
        };
        store
            .mark_published(&article.id, &post, now - Duration::days(30))
            .unwrap();

        for days in [200_000_000, u32::MAX, 800_000] {
            let result = purge_expired(&store, days, now);
            assert!(
                matches!(result, Err(ArticleError::Invalid(_))),
                "{} days should be rejected",
                days
            );
        }
        assert!(store.get(&article.id).unwrap().is_some());

        // The widest window validation allows still works
        assert_eq!(purge_expired(&store, 36_500, now).unwrap(), 0);
    }
}
