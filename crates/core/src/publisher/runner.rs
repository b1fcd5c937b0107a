//! Publish cycle implementation.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::article::{Article, ArticleError, ArticleStore};
use crate::hosting::{promote_second_image, HostingService, PublishPost};
use crate::metrics;
use crate::notify::{self, Notification, Notifier};
use crate::rewriter::{RewriteStyle, Rewriter};

use super::types::{
    resolve_schedule, CycleError, CycleOutcome, CycleRequest, PublishReport, Schedule,
};

/// Drives articles from the store to the hosting service.
pub struct PublishOrchestrator {
    store: Arc<dyn ArticleStore>,
    rewriter: Arc<dyn Rewriter>,
    hosting: Arc<dyn HostingService>,
    notifier: Arc<dyn Notifier>,
    admin_email: String,
    /// Held for the whole of a cycle so two triggers in this process never
    /// select the same article.
    cycle_lock: Mutex<()>,
}

impl PublishOrchestrator {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        rewriter: Arc<dyn Rewriter>,
        hosting: Arc<dyn HostingService>,
        notifier: Arc<dyn Notifier>,
        admin_email: impl Into<String>,
    ) -> Self {
        Self {
            store,
            rewriter,
            hosting,
            notifier,
            admin_email: admin_email.into(),
            cycle_lock: Mutex::new(()),
        }
    }

    /// Run one publish cycle.
    ///
    /// Timing is validated before anything else, so an invalid request never
    /// reaches the store or an external service. An immediate schedule is
    /// stamped once the cycle lock is held. Returns
    /// [`CycleOutcome::NothingToPublish`] when no article is eligible.
    pub async fn run_cycle(&self, request: &CycleRequest) -> Result<CycleOutcome, CycleError> {
        let started = Instant::now();
        let result = self.run_cycle_inner(request).await;
        record_cycle(&result, started);
        result
    }

    async fn run_cycle_inner(&self, request: &CycleRequest) -> Result<CycleOutcome, CycleError> {
        let schedule = resolve_schedule(request, Utc::now())?;

        let _guard = self.cycle_lock.lock().await;
        // "Now" means when this cycle runs, not when it queued.
        let schedule = schedule.refreshed(Utc::now());

        let Some(article) = self.store.next_unpublished()? else {
            info!("Publish cycle: no unpublished articles");
            self.notify(notify::nothing_to_publish(&self.admin_email))
                .await;
            return Ok(CycleOutcome::NothingToPublish);
        };

        info!(
            "Publish cycle: selected article {} '{}' (created {})",
            article.id, article.title, article.created_at
        );

        self.publish_and_notify(&article, &schedule, true)
            .await
            .map(CycleOutcome::Published)
    }

    /// Publish one specific article as written, without rewriting it.
    pub async fn publish_article(
        &self,
        id: &str,
        request: &CycleRequest,
    ) -> Result<PublishReport, CycleError> {
        let schedule = resolve_schedule(request, Utc::now())?;

        let _guard = self.cycle_lock.lock().await;
        let schedule = schedule.refreshed(Utc::now());

        let article = self
            .store
            .get(id)?
            .ok_or_else(|| ArticleError::NotFound(id.to_string()))?;
        if !article.is_eligible() {
            return Err(ArticleError::AlreadyPublished(id.to_string()).into());
        }

        info!("Manual publish of article {} '{}'", article.id, article.title);
        self.publish_and_notify(&article, &schedule, false).await
    }

    async fn publish_and_notify(
        &self,
        article: &Article,
        schedule: &Schedule,
        rewrite: bool,
    ) -> Result<PublishReport, CycleError> {
        match self.publish(article, schedule, rewrite).await {
            Ok(report) => {
                info!(
                    "Published article {} as {} ({}), scheduled for {}",
                    report.article_id,
                    report.hosted_post_id,
                    report.hosted_post_url,
                    report.scheduled_for
                );
                self.notify(notify::published(
                    &self.admin_email,
                    &report.title,
                    &report.hosted_post_id,
                    &report.hosted_post_url,
                    &report.scheduled_for,
                ))
                .await;
                Ok(report)
            }
            Err(e) => {
                error!("Failed to publish article {}: {}", article.id, e);
                self.notify(notify::cycle_failed(
                    &self.admin_email,
                    &article.title,
                    &e.to_string(),
                ))
                .await;
                Err(e)
            }
        }
    }

    async fn publish(
        &self,
        article: &Article,
        schedule: &Schedule,
        rewrite: bool,
    ) -> Result<PublishReport, CycleError> {
        let content = if rewrite {
            debug!(
                "Rewriting article {} with {}",
                article.id,
                self.rewriter.provider()
            );
            self.rewriter
                .rewrite(&article.content, RewriteStyle::Seo)
                .await?
        } else {
            article.content.clone()
        };

        let post = PublishPost {
            title: article.title.clone(),
            content,
            images: promote_second_image(&article.images),
            publish_at: schedule.publish_at,
        };

        let hosted = self.hosting.publish(&post).await?;

        let updated = self
            .store
            .mark_published(&article.id, &hosted, Utc::now())
            .map_err(|e| {
                error!(
                    "Post {} is live on {} but article {} was not updated: {}",
                    hosted.url,
                    self.hosting.name(),
                    article.id,
                    e
                );
                CycleError::Persistence {
                    post_url: hosted.url.clone(),
                    source: e,
                }
            })?;

        Ok(PublishReport {
            article_id: updated.id,
            title: updated.title,
            hosted_post_id: hosted.id,
            hosted_post_url: hosted.url,
            scheduled_for: schedule.describe(),
            publish_at: schedule.publish_at,
            publish_now: schedule.immediate,
        })
    }

    /// Best-effort send. Failures are logged and counted, never returned.
    async fn notify(&self, notification: Notification) {
        match self.notifier.send(&notification).await {
            Ok(()) => {
                metrics::NOTIFICATIONS.with_label_values(&["sent"]).inc();
            }
            Err(e) => {
                metrics::NOTIFICATIONS.with_label_values(&["failed"]).inc();
                warn!(
                    "Failed to send notification '{}' via {}: {}",
                    notification.subject,
                    self.notifier.name(),
                    e
                );
            }
        }
    }
}

fn record_cycle(result: &Result<CycleOutcome, CycleError>, started: Instant) {
    let outcome = match result {
        Ok(CycleOutcome::Published(_)) => "published",
        Ok(CycleOutcome::NothingToPublish) => "nothing_to_publish",
        Err(e) if e.is_client_error() => "invalid_request",
        Err(_) => "failed",
    };
    metrics::PUBLISH_CYCLES.with_label_values(&[outcome]).inc();
    metrics::CYCLE_DURATION
        .with_label_values(&[outcome])
        .observe(started.elapsed().as_secs_f64());
}
