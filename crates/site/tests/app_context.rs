//! Wires a full AppContext over a local provider and checks that header
//! consumers follow sign-in and sign-out, plus config file loading.

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use pl_domain::config::Config;
use pl_domain::identity::{Identity, Session};
use pl_i18n::Locale;
use pl_sessions::LocalProvider;
use pl_site::bootstrap::build_app_context;
use pl_site::cli::load_config_from;
use pl_site::nav::{AuthLinks, NavBinding};

#[tokio::test(start_paused = true)]
async fn header_follows_session_changes() {
    let provider = Arc::new(LocalProvider::new());
    let ctx = build_app_context(Arc::new(Config::default()), provider.clone()).unwrap();
    ctx.sync.settled().await;

    let binding = NavBinding::bind(&ctx.mirror, Arc::clone(&ctx.i18n), Locale::En, "/en/");
    assert!(!binding.current().is_authenticated());

    provider.sign_in(Identity::new("u1").with_email("ana@example.com"));
    match binding.current().auth {
        AuthLinks::Authenticated {
            display_name,
            logout,
            ..
        } => {
            assert_eq!(display_name, "ana@example.com");
            assert_eq!(logout.label, "Logout");
            assert_eq!(logout.href, "/en/logout");
        }
        other => panic!("expected authenticated header, got {other:?}"),
    }

    provider.sign_out();
    assert!(!binding.current().is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn unbound_header_stops_updating() {
    let provider = Arc::new(LocalProvider::new());
    let ctx = build_app_context(Arc::new(Config::default()), provider.clone()).unwrap();

    let binding = NavBinding::bind(&ctx.mirror, Arc::clone(&ctx.i18n), Locale::Es, "/");
    binding.unbind();

    provider.sign_in(Identity::new("u1"));
    assert!(ctx.mirror.is_authenticated());
    assert!(!binding.current().is_authenticated());
}

#[tokio::test(start_paused = true)]
async fn existing_session_is_picked_up_at_startup() {
    let provider = Arc::new(
        LocalProvider::new()
            .with_session(Session::new(Identity::new("u9")))
            .with_lookup_delay(Duration::from_millis(50)),
    );
    let ctx = build_app_context(Arc::new(Config::default()), provider).unwrap();
    assert!(!ctx.mirror.is_authenticated());

    ctx.sync.settled().await;
    assert_eq!(ctx.mirror.read().map(|i| i.id), Some("u9".into()));
}

#[tokio::test(start_paused = true)]
async fn shutdown_detaches_from_provider() {
    let provider = Arc::new(LocalProvider::new());
    let ctx = build_app_context(Arc::new(Config::default()), provider.clone()).unwrap();
    ctx.sync.settled().await;

    ctx.shutdown();
    assert_eq!(provider.listener_count(), 0);
    provider.sign_in(Identity::new("u1"));
    assert!(!ctx.mirror.is_authenticated());
}

#[tokio::test]
async fn invalid_config_is_rejected() {
    let mut config = Config::default();
    config.i18n.default_locale = "de".into();
    let err = build_app_context(Arc::new(config), Arc::new(LocalProvider::new())).unwrap_err();
    assert!(err.to_string().contains("config validation failed"));
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_config_from(&dir.path().join("parkline.toml")).unwrap();
    assert_eq!(config.i18n.default_locale, "es");
}

#[test]
fn config_file_is_parsed() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[site]
name = "Parking Alicante"

[auth]
lookup_policy = "last_write_wins"
"#
    )
    .unwrap();

    let config = load_config_from(file.path()).unwrap();
    assert_eq!(config.site.name, "Parking Alicante");
    assert_eq!(
        config.auth.lookup_policy,
        pl_domain::config::LookupPolicy::LastWriteWins
    );
}

#[test]
fn malformed_config_file_reports_path() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[i18n\nlocales = 3").unwrap();

    let err = load_config_from(file.path()).unwrap_err();
    assert!(err.to_string().starts_with("parsing "));
}
