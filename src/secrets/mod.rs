//! Pluggable secret resolution for configuration loading.
//!
//! Configuration documents reference secrets with `${prefix:key}`
//! placeholders embedded in any string-valued field. At startup, before
//! validation, the expansion engine walks the whole configuration graph and
//! replaces each placeholder with the value from the backend registered for
//! its prefix.
//!
//! # Architecture
//!
//! - [`SecretResolver`]: the backend capability, one per prefix —
//!   environment, file, HashiCorp Vault, AWS Secrets Manager.
//! - [`ResolverRegistry`]: prefix → resolver directory; register/unregister
//!   at startup, thread-safe read-heavy resolution afterwards.
//! - [`Property`]: a parsed `(prefix, key)` pair; bare tokens default to the
//!   `env` prefix.
//! - [`expand_variables`]: the generic recursive traversal, fail-fast on the
//!   first unresolved placeholder.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use unveil::secrets::{expand_variables, EnvResolver, FileResolver, ResolverRegistry};
//!
//! let registry = ResolverRegistry::new();
//! registry.register("env", Arc::new(EnvResolver::new()));
//! registry.register("file", Arc::new(FileResolver::new("/run/secrets")?));
//!
//! let mut config = load_typed_config()?; // any Serialize + DeserializeOwned type
//! expand_variables(&registry, &mut config).await?;
//! ```
//!
//! # Security
//!
//! Resolved values travel as [`SecretString`] and never appear in logs or
//! error messages; diagnostics carry only prefixes, resolver names, property
//! strings, and key names. There is no caching: re-expansion re-resolves.

pub mod error;
pub mod expand;
pub mod property;
pub mod registry;
pub mod resolvers;
pub mod types;

pub use error::{Result, SecretsError};
pub use expand::{expand_string, expand_variables};
pub use property::{Property, DEFAULT_PREFIX};
pub use registry::{ResolverRegistry, DEFAULT_REGISTRY};
pub use resolvers::{
    AwsResolver, EnvResolver, FileResolver, SecretResolver, VaultConfig, VaultResolver,
};
pub use types::SecretString;
