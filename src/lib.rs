//! # Unveil
//!
//! Unveil loads application configuration and substitutes secret references
//! (`${prefix:key}`) embedded anywhere inside the configuration object graph
//! before the application starts.
//!
//! ## Architecture
//!
//! ```text
//! Config Loader → Expansion Engine → Property Parser → Registry → Resolver
//!                                                                    ↓
//!                                                  env / file / Vault / AWS
//! ```
//!
//! ## Core Components
//!
//! - **Resolver backends**: environment, file, HashiCorp Vault, and AWS
//!   Secrets Manager implementations of [`secrets::SecretResolver`]
//! - **Resolver registry**: thread-safe prefix → resolver dispatch
//! - **Expansion engine**: generic recursive traversal over any
//!   `Serialize + DeserializeOwned` configuration shape
//! - **Config loader**: YAML parsing with expand-then-validate ordering
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use unveil::{config::load_config, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let (config, _registry) = load_config("config.yml").await?;
//!     println!("listening on {}", config.server.bind_address());
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod secrets;

// Re-export commonly used types and traits
pub use config::{load_config, AppConfig};
pub use errors::{Result, UnveilError};
pub use observability::init_logging;
pub use secrets::{expand_variables, ResolverRegistry, SecretResolver, SecretString};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
