//! # Command Line Interface
//!
//! Operator preflight commands: `check` loads, expands, and validates a
//! configuration file; `prefixes` shows which secret resolvers its `secrets`
//! section registers.

use clap::{Parser, Subcommand};

use crate::config::{build_registry, load_config, ConfigDocument};
use crate::errors::{Result, UnveilError};

#[derive(Parser)]
#[command(name = "unveil")]
#[command(about = "Configuration loader with pluggable secret resolution")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "config.yml", global = true)]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load the configuration, resolve every secret reference, and validate
    Check,

    /// Show the resolver prefixes the configuration registers
    Prefixes,
}

/// Run CLI commands.
///
/// Any error propagates to `main`, which prints a secret-free diagnostic and
/// exits non-zero: an unresolved placeholder must abort startup, never limp
/// into a partially-configured process.
pub async fn run_cli(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check => {
            let (config, registry) = load_config(&cli.config).await?;
            tracing::info!(
                server = %config.server.bind_address(),
                auth_enabled = config.auth.enabled,
                prefixes = ?registry.prefixes(),
                "configuration is valid, all secret references resolved"
            );
            println!("{}: configuration OK", cli.config);
            Ok(())
        }
        Commands::Prefixes => {
            let raw = std::fs::read_to_string(&cli.config).map_err(|e| {
                UnveilError::io(e, format!("reading configuration file {}", cli.config))
            })?;
            let document: ConfigDocument = serde_yaml::from_str(&raw)?;
            let registry = build_registry(&document.secrets).await?;

            for prefix in registry.prefixes() {
                println!("{}", prefix);
            }
            Ok(())
        }
    }
}
