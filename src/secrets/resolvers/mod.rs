//! Secret resolver trait and backend implementations.

pub mod aws;
pub mod env;
pub mod file;
pub mod vault;

pub use aws::AwsResolver;
pub use env::EnvResolver;
pub use file::FileResolver;
pub use vault::{VaultConfig, VaultResolver};

use super::error::Result;
use super::types::SecretString;
use async_trait::async_trait;

/// Trait for secret resolver backends.
///
/// A resolver answers "what is the value for key K" for one backend.
/// Implementations must be Send + Sync for use behind the registry.
#[async_trait]
pub trait SecretResolver: Send + Sync + std::fmt::Debug {
    /// Resolve a backend-specific key to its secret value.
    ///
    /// Backends may block on network or filesystem I/O. Timeout and retry
    /// policy, if any, belongs to the backend's own client; the expansion
    /// engine treats this as an ordinary blocking call.
    async fn resolve(&self, key: &str) -> Result<SecretString>;

    /// Stable name of this resolver, used in diagnostics and error wrapping.
    fn name(&self) -> &'static str;
}
