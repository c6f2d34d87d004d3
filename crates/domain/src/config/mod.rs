mod auth;
mod i18n;
mod observability;
mod site;

pub use auth::*;
pub use i18n::*;
pub use observability::*;
pub use site::*;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::locale::Locale;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Top-level config
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Config validation
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Severity level for a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSeverity {
    Error,
    Warning,
}

/// A single configuration validation issue.
#[derive(Debug, Clone)]
pub struct ConfigError {
    pub severity: ConfigSeverity,
    pub field: String,
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            ConfigSeverity::Error => "ERROR",
            ConfigSeverity::Warning => "WARN",
        };
        write!(f, "[{tag}] {}: {}", self.field, self.message)
    }
}

impl Config {
    /// Validate the configuration and return a list of issues.
    ///
    /// Returns an empty vec when everything looks good.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        // Locales: every entry must be known, at least one enabled.
        if self.i18n.locales.is_empty() {
            errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "i18n.locales".into(),
                message: "at least one locale must be enabled".into(),
            });
        }

        let mut seen = HashSet::new();
        let mut enabled = Vec::new();
        for (i, code) in self.i18n.locales.iter().enumerate() {
            match code.parse::<Locale>() {
                Ok(locale) => {
                    if !seen.insert(locale) {
                        errors.push(ConfigError {
                            severity: ConfigSeverity::Warning,
                            field: format!("i18n.locales[{i}]"),
                            message: format!("locale '{code}' is listed more than once"),
                        });
                    }
                    enabled.push(locale);
                }
                Err(_) => errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: format!("i18n.locales[{i}]"),
                    message: format!(
                        "unknown locale '{code}' (expected one of: {})",
                        supported_codes()
                    ),
                }),
            }
        }

        // Default locale must be known and enabled.
        match self.i18n.default_locale.parse::<Locale>() {
            Ok(default) if !enabled.contains(&default) && !self.i18n.locales.is_empty() => {
                errors.push(ConfigError {
                    severity: ConfigSeverity::Error,
                    field: "i18n.default_locale".into(),
                    message: format!(
                        "default locale '{}' is not in i18n.locales",
                        self.i18n.default_locale
                    ),
                });
            }
            Ok(_) => {}
            Err(_) => errors.push(ConfigError {
                severity: ConfigSeverity::Error,
                field: "i18n.default_locale".into(),
                message: format!(
                    "unknown locale '{}' (expected one of: {})",
                    self.i18n.default_locale,
                    supported_codes()
                ),
            }),
        }

        if !self.site.base_url.starts_with("http://") && !self.site.base_url.starts_with("https://")
        {
            errors.push(ConfigError {
                severity: ConfigSeverity::Warning,
                field: "site.base_url".into(),
                message: format!(
                    "'{}' is not an http(s) URL; absolute links will be wrong",
                    self.site.base_url
                ),
            });
        }

        errors
    }
}

fn supported_codes() -> String {
    Locale::ALL
        .iter()
        .map(|l| l.code())
        .collect::<Vec<_>>()
        .join(", ")
}
