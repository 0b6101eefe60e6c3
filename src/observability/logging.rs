//! # Structured Logging
//!
//! Logging setup using the tracing ecosystem: an env-filter driven
//! subscriber with plain or JSON output.

use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use crate::errors::{Result, UnveilError};

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level filter (overridden by `RUST_LOG` when set)
    pub log_level: String,

    /// Emit logs as JSON lines instead of human-readable text
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logs: false }
    }
}

impl ObservabilityConfig {
    /// Load logging configuration from environment variables.
    ///
    /// Uses `UNVEIL_LOG_LEVEL` (default "info") and `UNVEIL_LOG_FORMAT`
    /// ("json" enables JSON output).
    pub fn from_env() -> Self {
        let log_level = std::env::var("UNVEIL_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let json_logs = std::env::var("UNVEIL_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Self { log_level, json_logs }
    }
}

/// Initialize the global tracing subscriber.
///
/// Must be called once, before any configuration loading, so resolver
/// registration and expansion diagnostics are captured.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| UnveilError::config(format!("Invalid log level filter: {}", e)))?;

    let builder = fmt().with_env_filter(filter).with_target(false);

    let result = if config.json_logs {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| UnveilError::config(format!("Failed to initialize logging: {}", e)))
}
