//! Site locales.
//!
//! The site ships Spanish, English and Dutch.  Spanish is the house default
//! and is served without a path prefix unless configured otherwise.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A locale the site has translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Es,
    En,
    Nl,
}

impl Locale {
    /// Every supported locale, default first.
    pub const ALL: [Locale; 3] = [Locale::Es, Locale::En, Locale::Nl];

    /// The house default.
    pub const DEFAULT: Locale = Locale::Es;

    /// BCP 47 language code used in URLs and config (`"es"`, `"en"`, `"nl"`).
    pub fn code(self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
            Self::Nl => "nl",
        }
    }

    /// The language name in its own language, as shown in the language picker.
    pub fn native_name(self) -> &'static str {
        match self {
            Self::Es => "Español",
            Self::En => "English",
            Self::Nl => "Nederlands",
        }
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Locale::ALL
            .into_iter()
            .find(|l| l.code().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| Error::UnknownLocale(s.to_owned()))
    }
}
