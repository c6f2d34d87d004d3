//! Localization for the Parkline site: the translated UI dictionary,
//! per-locale lookups with fallback to the default locale, and locale-aware
//! URL routing.

pub mod dictionary;
pub mod routing;
pub mod translator;

pub use dictionary::Dictionary;
pub use pl_domain::locale::Locale;
pub use translator::{Coverage, I18n, Translator};
