//! CLI entry point - the composition root.

use anyhow::Context;
use clap::Parser;

use arcrelay_axum::{ServerConfig, start_server};
use arcrelay_cli::{Cli, init_tracing};
use arcrelay_core::RelaySettings;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    let settings = cli.apply(RelaySettings::from_env().context("Invalid configuration")?);
    tracing::debug!(?settings, "Effective settings");

    let config = ServerConfig::from_settings(&settings);
    start_server(config, &settings).await
}
