//! Locale-aware URL paths.
//!
//! Pages in a non-default locale live under `/{code}/…`.  The default
//! locale is served from the root unless `show_default_lang` is set.

use pl_domain::locale::Locale;

use crate::translator::I18n;

impl I18n {
    /// Locale a request path is in.  Falls back to the default locale when
    /// the first segment is not an enabled locale code.
    pub fn locale_from_path(&self, path: &str) -> Locale {
        path.trim_start_matches('/')
            .split('/')
            .next()
            .and_then(|segment| segment.parse::<Locale>().ok())
            .filter(|locale| self.is_enabled(*locale))
            .unwrap_or(self.default_locale())
    }

    /// Path of `path` (locale-free, e.g. `/prices`) in `locale`.
    pub fn localized_path(&self, path: &str, locale: Locale) -> String {
        let path = normalize(path);
        if locale == self.default_locale() && !self.show_default_lang() {
            return path;
        }
        if path == "/" {
            format!("/{}/", locale.code())
        } else {
            format!("/{}{}", locale.code(), path)
        }
    }

    /// Strip a leading enabled locale segment, returning the locale-free path.
    pub fn strip_locale<'p>(&self, path: &'p str) -> &'p str {
        let trimmed = path.trim_start_matches('/');
        let (segment, rest) = trimmed.split_once('/').unwrap_or((trimmed, ""));
        match segment.parse::<Locale>() {
            Ok(locale) if self.is_enabled(locale) => {
                // `rest` has lost its leading slash; step back one byte.
                let start = path.len() - rest.len() - 1;
                if rest.is_empty() {
                    "/"
                } else {
                    &path[start..]
                }
            }
            _ => path,
        }
    }

    /// The same page in every enabled locale, for a language picker.
    pub fn alternates(&self, path: &str) -> Vec<(Locale, String)> {
        let base = self.strip_locale(path);
        self.locales()
            .iter()
            .map(|l| (*l, self.localized_path(base, *l)))
            .collect()
    }
}

fn normalize(path: &str) -> String {
    if path.is_empty() {
        "/".into()
    } else if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    }
}
