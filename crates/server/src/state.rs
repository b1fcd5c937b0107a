use std::sync::Arc;

use autoblog_core::{
    ArticleStore, Authenticator, Config, Notifier, PublishOrchestrator, Rewriter, SanitizedConfig,
};

/// Shared application state
pub struct AppState {
    config: Config,
    authenticator: Arc<dyn Authenticator>,
    store: Arc<dyn ArticleStore>,
    notifier: Arc<dyn Notifier>,
    /// Unset when no `[rewriter]` section is configured.
    rewriter: Option<Arc<dyn Rewriter>>,
    /// Unset unless both the rewriter and hosting are configured.
    orchestrator: Option<Arc<PublishOrchestrator>>,
}

impl AppState {
    pub fn new(
        config: Config,
        authenticator: Arc<dyn Authenticator>,
        store: Arc<dyn ArticleStore>,
        notifier: Arc<dyn Notifier>,
        rewriter: Option<Arc<dyn Rewriter>>,
        orchestrator: Option<Arc<PublishOrchestrator>>,
    ) -> Self {
        Self {
            config,
            authenticator,
            store,
            notifier,
            rewriter,
            orchestrator,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn authenticator(&self) -> &dyn Authenticator {
        self.authenticator.as_ref()
    }

    pub fn store(&self) -> &dyn ArticleStore {
        self.store.as_ref()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub fn rewriter(&self) -> Option<&Arc<dyn Rewriter>> {
        self.rewriter.as_ref()
    }

    pub fn orchestrator(&self) -> Option<&Arc<PublishOrchestrator>> {
        self.orchestrator.as_ref()
    }
}
