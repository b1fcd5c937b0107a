//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Publish cycles (outcomes, duration)
//! - External services (rewriter, hosting, OAuth, mail relay)
//! - Notifications and retention

use std::time::Instant;

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts};

// =============================================================================
// Publish Cycle Metrics
// =============================================================================

/// Publish cycles by outcome.
pub static PUBLISH_CYCLES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autoblog_publish_cycles_total", "Total publish cycles"),
        &["outcome"], // "published", "nothing_to_publish", "invalid_request", "failed"
    )
    .unwrap()
});

/// Publish cycle duration in seconds.
pub static CYCLE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autoblog_publish_cycle_duration_seconds",
            "Duration of a publish cycle",
        )
        .buckets(vec![0.1, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0, 120.0]),
        &["outcome"],
    )
    .unwrap()
});

/// Notifications by delivery status.
pub static NOTIFICATIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("autoblog_notifications_total", "Total notifications sent"),
        &["status"], // "sent", "failed"
    )
    .unwrap()
});

/// Published articles removed by retention.
pub static ARTICLES_PURGED: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "autoblog_articles_purged_total",
        "Total published articles removed by retention",
    )
    .unwrap()
});

// =============================================================================
// External Service Metrics
// =============================================================================

/// External service request duration.
pub static EXTERNAL_SERVICE_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "autoblog_external_service_duration_seconds",
            "Duration of external service calls",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &["service", "operation"],
    )
    .unwrap()
});

/// External service requests total.
pub static EXTERNAL_SERVICE_REQUESTS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "autoblog_external_service_requests_total",
            "Total external service requests",
        ),
        &["service", "operation", "status"], // status: "success", "error"
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Record one external call that started at `started`.
pub fn observe_external_call(service: &str, operation: &str, started: Instant, ok: bool) {
    EXTERNAL_SERVICE_DURATION
        .with_label_values(&[service, operation])
        .observe(started.elapsed().as_secs_f64());
    EXTERNAL_SERVICE_REQUESTS
        .with_label_values(&[service, operation, if ok { "success" } else { "error" }])
        .inc();
}

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        // Cycles
        Box::new(PUBLISH_CYCLES.clone()),
        Box::new(CYCLE_DURATION.clone()),
        Box::new(NOTIFICATIONS.clone()),
        Box::new(ARTICLES_PURGED.clone()),
        // External services
        Box::new(EXTERNAL_SERVICE_DURATION.clone()),
        Box::new(EXTERNAL_SERVICE_REQUESTS.clone()),
    ]
}
