use std::collections::BTreeMap;

use serde::Serialize;

use pl_domain::config::I18nConfig;
use pl_domain::error::{Error, Result};
use pl_domain::locale::Locale;
use pl_domain::trace::TraceEvent;

use crate::dictionary::Dictionary;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// I18n
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// The enabled locales plus the dictionary they translate from.
#[derive(Debug, Clone)]
pub struct I18n {
    locales: Vec<Locale>,
    default_locale: Locale,
    show_default_lang: bool,
    dictionary: Dictionary,
}

impl I18n {
    /// Build from config with the built-in dictionary.
    pub fn from_config(config: &I18nConfig) -> Result<Self> {
        Self::with_dictionary(config, Dictionary::builtin())
    }

    pub fn with_dictionary(config: &I18nConfig, dictionary: Dictionary) -> Result<Self> {
        let mut locales = Vec::with_capacity(config.locales.len());
        for code in &config.locales {
            let locale: Locale = code.parse()?;
            if !locales.contains(&locale) {
                locales.push(locale);
            }
        }
        if locales.is_empty() {
            return Err(Error::Config("i18n.locales must not be empty".into()));
        }

        let default_locale: Locale = config.default_locale.parse()?;
        if !locales.contains(&default_locale) {
            return Err(Error::LocaleDisabled(default_locale));
        }

        tracing::debug!(
            locales = ?locales,
            default = %default_locale,
            "i18n ready"
        );

        Ok(Self {
            locales,
            default_locale,
            show_default_lang: config.show_default_lang,
            dictionary,
        })
    }

    pub fn locales(&self) -> &[Locale] {
        &self.locales
    }

    pub fn default_locale(&self) -> Locale {
        self.default_locale
    }

    pub fn show_default_lang(&self) -> bool {
        self.show_default_lang
    }

    pub fn is_enabled(&self, locale: Locale) -> bool {
        self.locales.contains(&locale)
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Translator bound to `locale`.
    pub fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator { i18n: self, locale }
    }

    /// Keys each enabled locale is missing relative to the default locale.
    pub fn coverage(&self) -> Coverage {
        let reference = self.dictionary.keys(self.default_locale).len();
        let missing = self
            .locales
            .iter()
            .filter(|l| **l != self.default_locale)
            .map(|l| {
                let keys = self
                    .dictionary
                    .missing(self.default_locale, *l)
                    .into_iter()
                    .map(str::to_owned)
                    .collect();
                (*l, keys)
            })
            .collect();
        Coverage {
            reference_locale: self.default_locale,
            reference_keys: reference,
            missing,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Translator
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Looks up keys for one locale.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    i18n: &'a I18n,
    locale: Locale,
}

impl<'a> Translator<'a> {
    pub fn locale(&self) -> Locale {
        self.locale
    }

    /// Translate `key`: the requested locale first, then the default
    /// locale, then the key itself.
    pub fn t<'k>(&self, key: &'k str) -> &'k str
    where
        'a: 'k,
    {
        if let Some(text) = self.i18n.dictionary.get(self.locale, key) {
            return text;
        }

        let fallback = self.i18n.dictionary.get(self.i18n.default_locale, key);
        tracing::debug!(
            locale = %self.locale,
            key,
            resolved = fallback.is_some(),
            "translation fallback"
        );
        TraceEvent::TranslationFallback {
            locale: self.locale.code().to_owned(),
            key: key.to_owned(),
            resolved: fallback.is_some(),
        }
        .emit();
        fallback.unwrap_or(key)
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Coverage report
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Clone, Serialize)]
pub struct Coverage {
    pub reference_locale: Locale,
    pub reference_keys: usize,
    /// Missing keys per non-default locale.  Complete locales map to an
    /// empty list.
    pub missing: BTreeMap<Locale, Vec<String>>,
}

impl Coverage {
    pub fn is_complete(&self) -> bool {
        self.missing.values().all(Vec::is_empty)
    }
}
