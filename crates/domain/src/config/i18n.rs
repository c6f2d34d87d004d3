use serde::{Deserialize, Serialize};

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Localization
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Which locales are served and how their URLs look.
///
/// Codes are kept as strings here so a bad value is reported by
/// [`Config::validate`](super::Config::validate) instead of failing the
/// whole parse.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default = "d_locales")]
    pub locales: Vec<String>,
    #[serde(default = "d_default_locale")]
    pub default_locale: String,
    /// When `false`, pages in the default locale are served without a
    /// `/{code}` prefix.
    #[serde(default)]
    pub show_default_lang: bool,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: d_locales(),
            default_locale: d_default_locale(),
            show_default_lang: false,
        }
    }
}

fn d_locales() -> Vec<String> {
    vec!["en".into(), "nl".into(), "es".into()]
}

fn d_default_locale() -> String {
    "es".into()
}
