use std::sync::Arc;

use pl_domain::config::Config;
use pl_domain::identity::{Identity, Session};
use pl_i18n::Locale;
use pl_sessions::LocalProvider;

use crate::bootstrap::build_app_context;
use crate::nav::{HeaderNav, NavBinding};

/// Build the header a visitor would see on `path`.
///
/// Runs a full context over an in-process provider, seeded with a session
/// when `signed_in_as` is given, and waits for the startup lookup to land.
pub async fn preview(
    config: Arc<Config>,
    path: &str,
    lang: Option<&str>,
    signed_in_as: Option<&str>,
) -> anyhow::Result<HeaderNav> {
    let mut provider = LocalProvider::new();
    if let Some(email) = signed_in_as {
        let user = Identity::new(uuid::Uuid::new_v4().to_string()).with_email(email);
        provider = provider.with_session(Session::new(user));
    }

    let ctx = build_app_context(config, Arc::new(provider))?;
    ctx.sync.settled().await;

    let locale = match lang {
        Some(code) => {
            let locale: Locale = code.parse()?;
            if !ctx.i18n.is_enabled(locale) {
                anyhow::bail!("locale {locale} is not enabled in i18n.locales");
            }
            locale
        }
        None => ctx.i18n.locale_from_path(path),
    };

    let binding = NavBinding::bind(&ctx.mirror, Arc::clone(&ctx.i18n), locale, path);
    let nav = binding.current();
    binding.unbind();
    ctx.shutdown();
    Ok(nav)
}
