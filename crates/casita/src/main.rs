mod cli;
mod commands;
mod error;
mod output;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use casita_api::{ClientConfig, DeviceClient};
use casita_core::Hub;

use crate::cli::{Cli, OutputFormat};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_tracing(cli.global.verbose);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = casita_config::load_config_or_default();
    let client_config = build_client_config(&cli.global, &config)?;
    let format = resolve_output(&cli.global, &config);

    let hub = Hub::new(DeviceClient::new(client_config)?);
    hub.load().await?;

    tracing::debug!(command = ?cli.command, "dispatching command");
    commands::dispatch(cli.command, &hub, &cli.global, format).await
}

/// Layer CLI flags over the loaded config file.
fn build_client_config(
    global: &cli::GlobalOpts,
    config: &casita_config::Config,
) -> Result<ClientConfig, CliError> {
    let mut base = casita_config::to_client_config(config)?;

    if let Some(raw) = &global.api_url {
        let url = raw.parse().map_err(|_| CliError::Validation {
            field: "api-url".into(),
            reason: format!("invalid URL: {raw}"),
        })?;
        base.base_url = Some(url);
        base.use_mock_data = false;
    }
    if global.mock {
        base.use_mock_data = true;
    }
    if let Some(secs) = global.timeout {
        base.timeout = std::time::Duration::from_secs(secs);
    }

    Ok(base)
}

/// The `--output` flag wins; otherwise the config file's default.
fn resolve_output(global: &cli::GlobalOpts, config: &casita_config::Config) -> OutputFormat {
    if let Some(format) = global.output {
        return format;
    }
    match config.output.as_str() {
        "json" => OutputFormat::Json,
        "json-compact" => OutputFormat::JsonCompact,
        "plain" => OutputFormat::Plain,
        _ => OutputFormat::Table,
    }
}
