//! # Configuration Settings
//!
//! Typed application configuration. Any string field may carry `${...}`
//! secret placeholders; the loader expands them before validation runs, so
//! validators always see final values.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use crate::errors::Result;
use crate::secrets::VaultConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Database configuration
    #[serde(default)]
    #[validate(nested)]
    pub database: DatabaseConfig,

    /// Authentication configuration
    #[serde(default)]
    #[validate(nested)]
    pub auth: AuthConfig,
}

impl AppConfig {
    /// Validate the entire configuration.
    ///
    /// Must run only after secret expansion: placeholders such as
    /// `${file:db_password}` would otherwise fail length checks written for
    /// the resolved value.
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self)?;
        self.validate_custom()?;
        Ok(())
    }

    /// Custom validation logic that goes beyond what the validator crate can do
    fn validate_custom(&self) -> Result<()> {
        if !self.database.url.is_empty()
            && !self.database.url.starts_with("postgresql://")
            && !self.database.url.starts_with("sqlite://")
        {
            return Err(crate::errors::UnveilError::validation(
                "Database URL must start with 'postgresql://' or 'sqlite://'",
            ));
        }

        if self.auth.enabled && self.auth.client_secret.is_empty() {
            return Err(crate::errors::UnveilError::validation_field(
                "Client secret must be set when auth is enabled",
                "auth.client_secret",
            ));
        }

        Ok(())
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServerConfig {
    /// Server bind address
    #[validate(length(min = 1, message = "Host cannot be empty"))]
    pub host: String,

    /// Server port
    #[validate(range(min = 1, message = "Port must be between 1 and 65535"))]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8080 }
    }
}

impl ServerConfig {
    /// Get the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct DatabaseConfig {
    /// Database connection URL (may embed a `${...}` password reference)
    #[serde(default)]
    pub url: String,

    /// Database password, typically `${file:db_password}` or `${vault:db_password}`
    #[serde(default)]
    pub password: String,
}

/// Authentication configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct AuthConfig {
    /// Whether authentication is enabled
    #[serde(default)]
    pub enabled: bool,

    /// OAuth client identifier
    #[serde(default)]
    pub client_id: String,

    /// OAuth client secret, typically a `${...}` reference
    #[serde(default)]
    pub client_secret: String,
}

/// Secret backend bootstrap configuration.
///
/// Declares which resolvers to register before expansion runs. This section
/// is read straight from the parsed document and is never itself expanded,
/// which breaks the chicken-and-egg between resolver credentials and the
/// registry (backend credentials come from the environment or from literal
/// document values).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SecretsConfig {
    /// Directory for the `file` resolver (one file per secret)
    pub file_dir: Option<PathBuf>,

    /// Vault resolver configuration
    pub vault: Option<VaultConfig>,

    /// Secret name for the `aws` resolver
    pub aws_secret_name: Option<String>,
}

impl SecretsConfig {
    /// Fill unset fields from environment variables.
    ///
    /// Uses `UNVEIL_SECRETS_DIR`, the Vault variables understood by
    /// [`VaultConfig::from_env`], and `UNVEIL_AWS_SECRET_NAME`.
    pub fn merged_with_env(mut self) -> Self {
        if self.file_dir.is_none() {
            self.file_dir = std::env::var("UNVEIL_SECRETS_DIR").ok().map(PathBuf::from);
        }
        if self.vault.is_none() {
            self.vault = VaultConfig::from_env();
        }
        if self.aws_secret_name.is_none() {
            self.aws_secret_name = std::env::var("UNVEIL_AWS_SECRET_NAME").ok();
        }
        self
    }
}
