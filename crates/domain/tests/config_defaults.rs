use pl_domain::config::{Config, LookupPolicy};

#[test]
fn default_locales_match_site() {
    let config = Config::default();
    assert_eq!(config.i18n.locales, vec!["en", "nl", "es"]);
    assert_eq!(config.i18n.default_locale, "es");
    assert!(!config.i18n.show_default_lang);
}

#[test]
fn default_lookup_policy_lets_events_win() {
    let config = Config::default();
    assert_eq!(config.auth.lookup_policy, LookupPolicy::EventsWin);
    assert_eq!(config.auth.lookup_timeout_ms, 10_000);
}

#[test]
fn empty_file_parses_to_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config.site.name, "Parkline");
    assert_eq!(config.observability.log_filter, "warn");
}

#[test]
fn i18n_section_parses() {
    let toml_str = r#"
[i18n]
locales = ["es", "en"]
default_locale = "en"
show_default_lang = true
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.i18n.locales, vec!["es", "en"]);
    assert_eq!(config.i18n.default_locale, "en");
    assert!(config.i18n.show_default_lang);
    assert!(config.validate().is_empty());
}

#[test]
fn lookup_policy_parses_snake_case() {
    let toml_str = r#"
[auth]
lookup_policy = "last_write_wins"
lookup_timeout_ms = 2500
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.auth.lookup_policy, LookupPolicy::LastWriteWins);
    assert_eq!(config.auth.lookup_timeout_ms, 2500);
}

#[test]
fn omitted_lookup_timeout_uses_default() {
    let toml_str = r#"
[auth]
lookup_policy = "events_win"
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.auth.lookup_timeout_ms, 10_000);
}

#[test]
fn zero_lookup_timeout_disables_it() {
    let toml_str = r#"
[auth]
lookup_timeout_ms = 0
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.auth.lookup_timeout_ms, 0);
    assert!(config.validate().is_empty());
}

#[test]
fn unknown_policy_is_a_parse_error() {
    let toml_str = r#"
[auth]
lookup_policy = "first_wins"
"#;
    assert!(toml::from_str::<Config>(toml_str).is_err());
}
