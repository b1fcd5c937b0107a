use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoblog_core::{
    create_authenticator, create_notifier, load_config, validate_config, ArticleStore,
    Authenticator, BloggerClient, GeminiRewriter, HostingService, Notifier, PublishOrchestrator,
    PublishScheduler, Rewriter, SqliteArticleStore,
};
use autoblog_server::{create_router, AppState};

/// Application version
const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine config path
    let config_path = std::env::var("AUTOBLOG_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("config.toml"));

    // Load configuration
    info!("Loading configuration from {:?}", config_path);
    let config = load_config(&config_path)
        .with_context(|| format!("Failed to load config from {:?}", config_path))?;

    validate_config(&config).context("Configuration validation failed")?;

    let config_json = serde_json::to_string(&config).unwrap_or_default();
    let config_hash = format!("{:x}", Sha256::digest(config_json.as_bytes()));
    info!(
        "autoblog {} starting (config {})",
        VERSION,
        &config_hash[..16]
    );
    info!("Auth method: {:?}", config.auth.method);
    info!("Database path: {:?}", config.database.path);

    let authenticator: Arc<dyn Authenticator> = Arc::from(
        create_authenticator(&config.auth).context("Failed to create authenticator")?,
    );
    info!("Using authenticator: {}", authenticator.method_name());

    let store: Arc<dyn ArticleStore> = Arc::new(
        SqliteArticleStore::new(&config.database.path)
            .context("Failed to create article store")?,
    );
    info!("Article store initialized");

    // Rewriter (optional)
    let rewriter: Option<Arc<dyn Rewriter>> = match &config.rewriter {
        Some(rewriter_config) => {
            info!("Initializing Gemini rewriter (model {})", rewriter_config.model);
            Some(Arc::new(
                GeminiRewriter::new(rewriter_config.clone())
                    .context("Failed to create rewriter")?,
            ))
        }
        None => {
            info!("No rewriter configured");
            None
        }
    };

    // Hosting (optional)
    let hosting: Option<Arc<dyn HostingService>> = match &config.hosting {
        Some(hosting_config) => {
            info!("Initializing Blogger client for blog {}", hosting_config.blog_id);
            Some(Arc::new(
                BloggerClient::new(hosting_config.clone())
                    .context("Failed to create Blogger client")?,
            ))
        }
        None => {
            info!("No hosting configured");
            None
        }
    };

    let notifier: Arc<dyn Notifier> =
        create_notifier(&config.notifier).context("Failed to create notifier")?;
    info!("Using notifier: {}", notifier.name());
    if config.notifier.admin_email.is_empty() {
        warn!("notifier.admin_email is empty; notifications have no recipient");
    }

    // The orchestrator needs both external services
    let orchestrator = match (&rewriter, &hosting) {
        (Some(r), Some(h)) => Some(Arc::new(PublishOrchestrator::new(
            Arc::clone(&store),
            Arc::clone(r),
            Arc::clone(h),
            Arc::clone(&notifier),
            config.notifier.admin_email.clone(),
        ))),
        _ => {
            warn!(
                "Publishing disabled (rewriter: {}, hosting: {})",
                rewriter.is_some(),
                hosting.is_some()
            );
            None
        }
    };

    let scheduler = match (&orchestrator, config.publisher.schedule_interval_secs) {
        (Some(orch), Some(secs)) => {
            let scheduler = PublishScheduler::new(Arc::clone(orch), Duration::from_secs(secs));
            scheduler.start();
            Some(scheduler)
        }
        (None, Some(_)) => {
            warn!("publisher.schedule_interval_secs is set but publishing is disabled");
            None
        }
        _ => None,
    };

    let state = Arc::new(AppState::new(
        config.clone(),
        authenticator,
        store,
        notifier,
        rewriter,
        orchestrator,
    ));

    let app = create_router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host, config.server.port);
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    if let Some(scheduler) = scheduler {
        info!("Stopping publish scheduler...");
        scheduler.stop();
    }

    info!("Server shut down");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
