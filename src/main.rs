use clap::Parser;
use unveil::cli::{run_cli, Cli};
use unveil::observability::{init_logging, ObservabilityConfig};

#[tokio::main]
async fn main() {
    // Load .env file if it exists (optional - won't fail if missing).
    // This must happen before any config is read from the environment.
    if let Err(e) = dotenvy::dotenv() {
        if !e.to_string().contains("not found") {
            eprintln!("Warning: Error loading .env file: {}", e);
        }
    }

    let cli = Cli::parse();

    let mut observability_config = ObservabilityConfig::from_env();
    if cli.verbose {
        observability_config.log_level = "debug".to_string();
    }

    if let Err(e) = init_logging(&observability_config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Startup aborts on the first unresolved secret reference. The error
    // chain carries only prefixes, resolver names, and property strings.
    if let Err(e) = run_cli(cli).await {
        tracing::error!(error = %e, "configuration loading failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
