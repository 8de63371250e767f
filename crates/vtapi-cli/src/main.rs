//! `vtapi` binary.

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use vtapi_cli::{builtin_registry, execute, Cli};
use vtapi_provider::ProviderConfig;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli).await {
        error!("{:#}", e);
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let registry = builtin_registry()?.install()?;
    let config = ProviderConfig::from_env();
    let provider = registry
        .resolve(&cli.provider, &config)
        .with_context(|| format!("cannot use provider '{}'", cli.provider))?;

    info!(provider = %cli.provider, command = ?cli.command, "Running command");
    let output = execute(provider.as_ref(), cli.command).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Plain output by default, JSON when `LOG_FORMAT=json`. Logs go to stderr.
fn init_tracing() {
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("vtapi=warn,warn"));

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .with(env_filter)
            .init();
    }
}
