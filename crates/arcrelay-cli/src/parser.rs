//! Main CLI parser and top-level argument handling.

use arcrelay_core::RelaySettings;
use clap::Parser;

/// Relay chat prompts to a hosted Bytez model, one request at a time.
///
/// Settings come from the environment (`HOST`, `PORT`, `BYTEZ_KEY`,
/// `BYTEZ_MODEL_URL`, `BYTEZ_MAX_NEW_TOKENS`, `CORS_ORIGINS`); flags only
/// override them.
#[derive(Debug, Parser)]
#[command(name = "arcrelay")]
#[command(version)]
pub struct Cli {
    /// Address to bind the HTTP listener to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Apply flag overrides on top of environment settings.
    pub fn apply(&self, mut settings: RelaySettings) -> RelaySettings {
        if let Some(host) = &self.host {
            settings.host.clone_from(host);
        }
        if let Some(port) = self.port {
            settings.port = port;
        }
        settings
    }
}
