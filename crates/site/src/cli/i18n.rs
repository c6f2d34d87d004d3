use pl_domain::config::Config;
use pl_i18n::{I18n, Locale};

/// Print the coverage report.  Returns `false` when `strict` and some
/// locale is missing keys.
pub fn check(config: &Config, strict: bool, json: bool) -> anyhow::Result<bool> {
    let i18n = I18n::from_config(&config.i18n)?;
    let coverage = i18n.coverage();

    if json {
        println!("{}", serde_json::to_string_pretty(&coverage)?);
    } else {
        println!(
            "reference: {} ({} keys)",
            coverage.reference_locale, coverage.reference_keys
        );
        for (locale, missing) in &coverage.missing {
            if missing.is_empty() {
                println!("  {locale}: complete");
            } else {
                println!("  {locale}: {} missing", missing.len());
                for key in missing {
                    println!("    - {key}");
                }
            }
        }
    }

    Ok(!strict || coverage.is_complete())
}

/// Translate `key` in `lang` (or the default locale).
pub fn get(config: &Config, key: &str, lang: Option<&str>) -> anyhow::Result<String> {
    let i18n = I18n::from_config(&config.i18n)?;
    let locale = match lang {
        Some(code) => {
            let locale: Locale = code.parse()?;
            if !i18n.is_enabled(locale) {
                anyhow::bail!("locale {locale} is not enabled in i18n.locales");
            }
            locale
        }
        None => i18n.default_locale(),
    };
    Ok(i18n.translator(locale).t(key).to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_uses_default_locale() {
        let text = get(&Config::default(), "header.booking", None).unwrap();
        assert_eq!(text, "Reservar");
    }

    #[test]
    fn get_in_requested_locale() {
        let text = get(&Config::default(), "header.booking", Some("nl")).unwrap();
        assert_eq!(text, "Reservering");
    }

    #[test]
    fn get_rejects_disabled_locale() {
        let mut config = Config::default();
        config.i18n.locales = vec!["es".into()];
        assert!(get(&config, "header.booking", Some("en")).is_err());
    }

    #[test]
    fn strict_check_fails_on_gaps() {
        let config = Config::default();
        assert!(check(&config, false, false).unwrap());
        assert!(!check(&config, true, true).unwrap());
    }
}
