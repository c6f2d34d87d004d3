use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use pl_domain::config::ObservabilityConfig;
use pl_site::cli::{Cli, Command, ConfigCommand, I18nCommand};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let (config, config_path) = pl_site::cli::load_config()?;
    init_tracing(&config.observability);

    match cli.command {
        Command::Config(ConfigCommand::Validate) => {
            if !pl_site::cli::config::validate(&config, &config_path) {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Config(ConfigCommand::Show) => {
            print!("{}", pl_site::cli::config::show(&config)?);
            Ok(())
        }
        Command::I18n(I18nCommand::Check { strict, json }) => {
            if !pl_site::cli::i18n::check(&config, strict, json)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::I18n(I18nCommand::Get { key, lang }) => {
            println!("{}", pl_site::cli::i18n::get(&config, &key, lang.as_deref())?);
            Ok(())
        }
        Command::Nav {
            path,
            lang,
            signed_in_as,
        } => {
            let nav = pl_site::cli::nav::preview(
                Arc::new(config),
                &path,
                lang.as_deref(),
                signed_in_as.as_deref(),
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&nav)?);
            Ok(())
        }
        Command::Version => {
            println!("parkline {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_tracing(obs: &ObservabilityConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&obs.log_filter));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    if obs.json_logs {
        builder.json().init();
    } else {
        builder.compact().init();
    }
}
