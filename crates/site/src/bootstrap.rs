//! AppContext construction shared by every CLI command that needs a live
//! session mirror.

use std::sync::Arc;

use anyhow::Context;

use pl_domain::config::{Config, ConfigSeverity};
use pl_i18n::I18n;
use pl_sessions::{IdentityProvider, SessionMirror, SessionSync, SyncOptions};

use crate::context::AppContext;

/// Validate config, build the i18n tables, and start mirroring `provider`.
///
/// Returns as soon as the sync is started; the startup session lookup
/// finishes in the background.  Must be called inside a Tokio runtime.
pub fn build_app_context(
    config: Arc<Config>,
    provider: Arc<dyn IdentityProvider>,
) -> anyhow::Result<AppContext> {
    // ── Config validation ────────────────────────────────────────────
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            ConfigSeverity::Warning => tracing::warn!("config: {issue}"),
            ConfigSeverity::Error => tracing::error!("config: {issue}"),
        }
    }
    if issues.iter().any(|i| i.severity == ConfigSeverity::Error) {
        anyhow::bail!(
            "config validation failed with {} error(s)",
            issues
                .iter()
                .filter(|i| i.severity == ConfigSeverity::Error)
                .count()
        );
    }

    // ── Localization ─────────────────────────────────────────────────
    let i18n = Arc::new(I18n::from_config(&config.i18n).context("building i18n tables")?);
    tracing::info!(
        locales = ?i18n.locales(),
        default = %i18n.default_locale(),
        "localization loaded"
    );

    // ── Session mirror ───────────────────────────────────────────────
    let mirror = SessionMirror::new();
    let sync = Arc::new(SessionSync::start(
        Arc::clone(&provider),
        mirror.clone(),
        SyncOptions::from_config(&config.auth),
    ));
    tracing::info!(provider = provider.provider_id(), "session mirror ready");

    Ok(AppContext {
        config,
        i18n,
        provider,
        mirror,
        sync,
    })
}
