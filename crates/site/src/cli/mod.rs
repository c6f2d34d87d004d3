pub mod config;
pub mod i18n;
pub mod nav;

use std::path::Path;

use clap::{Parser, Subcommand};

/// Parkline: site core for the parking reservation website.
#[derive(Debug, Parser)]
#[command(name = "parkline", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configuration utilities.
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Translation utilities.
    #[command(subcommand)]
    I18n(I18nCommand),
    /// Print the header navigation for a visitor as JSON.
    Nav {
        /// Request path the header is rendered for (e.g. "/en/prices").
        #[arg(long, default_value = "/")]
        path: String,
        /// Locale override.  Defaults to the locale of `--path`.
        #[arg(long)]
        lang: Option<String>,
        /// Preview as a signed-in visitor with this email.
        #[arg(long = "as")]
        signed_in_as: Option<String>,
    },
    /// Print version information.
    Version,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Parse the config file and report any errors.
    Validate,
    /// Dump the resolved configuration (with defaults) as TOML.
    Show,
}

#[derive(Debug, Subcommand)]
pub enum I18nCommand {
    /// Report keys each locale is missing relative to the default locale.
    Check {
        /// Exit non-zero when any locale is incomplete.
        #[arg(long)]
        strict: bool,
        /// Output the report as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Translate a single key.
    Get {
        /// Dictionary key, e.g. "header.prices".
        key: String,
        /// Locale code.  Defaults to the configured default locale.
        #[arg(long)]
        lang: Option<String>,
    },
}

/// Load the config from `$PARKLINE_CONFIG` (default `parkline.toml`).
/// A missing file yields the defaults.
pub fn load_config() -> anyhow::Result<(pl_domain::config::Config, String)> {
    let config_path =
        std::env::var("PARKLINE_CONFIG").unwrap_or_else(|_| "parkline.toml".into());
    let config = load_config_from(Path::new(&config_path))?;
    Ok((config, config_path))
}

pub fn load_config_from(path: &Path) -> anyhow::Result<pl_domain::config::Config> {
    if !path.exists() {
        return Ok(pl_domain::config::Config::default());
    }
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("reading {}: {e}", path.display()))?;
    toml::from_str(&raw).map_err(|e| anyhow::anyhow!("parsing {}: {e}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_flags_parse() {
        let cli = Cli::parse_from([
            "parkline", "nav", "--path", "/en/prices", "--as", "ana@example.com",
        ]);
        match cli.command {
            Command::Nav {
                path,
                lang,
                signed_in_as,
            } => {
                assert_eq!(path, "/en/prices");
                assert_eq!(lang, None);
                assert_eq!(signed_in_as.as_deref(), Some("ana@example.com"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn i18n_get_parses() {
        let cli = Cli::parse_from(["parkline", "i18n", "get", "auth.login", "--lang", "nl"]);
        assert!(matches!(
            cli.command,
            Command::I18n(I18nCommand::Get { ref key, ref lang })
                if key == "auth.login" && lang.as_deref() == Some("nl")
        ));
    }

    #[test]
    fn clap_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
