use std::sync::Arc;

use pl_domain::config::Config;
use pl_i18n::I18n;
use pl_sessions::{IdentityProvider, SessionMirror, SessionSync};

/// Long-lived application context handed to every UI consumer.
///
/// Owns the single [`SessionMirror`] for the process.  Consumers get it by
/// clone from here instead of reaching for global state.
#[derive(Clone)]
pub struct AppContext {
    // ── Core ──────────────────────────────────────────────────────────
    pub config: Arc<Config>,
    pub i18n: Arc<I18n>,

    // ── Session ───────────────────────────────────────────────────────
    pub provider: Arc<dyn IdentityProvider>,
    pub mirror: SessionMirror,
    pub sync: Arc<SessionSync>,
}

impl AppContext {
    /// Stop following the provider.  The mirror keeps its last value.
    pub fn shutdown(&self) {
        self.sync.shutdown();
        tracing::info!("application context shut down");
    }
}

impl std::fmt::Debug for AppContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppContext")
            .field("provider", &self.provider.provider_id())
            .field("mirror", &self.mirror)
            .field("sync", &self.sync)
            .finish()
    }
}
