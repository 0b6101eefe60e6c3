//! Secret resolver registry.
//!
//! Maps a property prefix to a resolver and dispatches resolution requests.
//! The registry is populated at startup (resolvers registered before any
//! expansion call) and read-heavy afterward, so the map sits behind a
//! reader/writer lock; a register never blocks concurrent resolution for
//! longer than the map insert itself.

use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

use super::error::{Result, SecretsError};
use super::property::Property;
use super::resolvers::SecretResolver;
use super::types::SecretString;

/// Process-wide default registry for ergonomic top-level use.
///
/// Library consumers that need isolated registries (tests, multiple
/// configurations in one process) construct their own [`ResolverRegistry`]
/// and pass it explicitly; everything in this crate takes the registry by
/// reference.
pub static DEFAULT_REGISTRY: Lazy<ResolverRegistry> = Lazy::new(ResolverRegistry::new);

/// Registry of secret resolvers keyed by property prefix.
pub struct ResolverRegistry {
    resolvers: RwLock<HashMap<String, Arc<dyn SecretResolver>>>,
}

impl std::fmt::Debug for ResolverRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolverRegistry").field("prefixes", &self.prefixes()).finish()
    }
}

impl Default for ResolverRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverRegistry {
    /// Create a new registry with no resolvers.
    pub fn new() -> Self {
        Self { resolvers: RwLock::new(HashMap::new()) }
    }

    /// Register a resolver under a prefix.
    ///
    /// Prefixes are unique at any instant; re-registering a prefix replaces
    /// the previous resolver (last-write-wins) with a warning, never an
    /// error.
    pub fn register(&self, prefix: impl Into<String>, resolver: Arc<dyn SecretResolver>) {
        let prefix = prefix.into();
        let mut resolvers = self.resolvers.write().unwrap_or_else(PoisonError::into_inner);

        if resolvers.insert(prefix.clone(), resolver).is_some() {
            warn!(prefix = %prefix, "replacing previously registered secret resolver");
        } else {
            info!(prefix = %prefix, "registered secret resolver");
        }
    }

    /// Remove the resolver registered under a prefix, if any.
    pub fn unregister(&self, prefix: &str) {
        let mut resolvers = self.resolvers.write().unwrap_or_else(PoisonError::into_inner);
        if resolvers.remove(prefix).is_some() {
            info!(prefix = %prefix, "unregistered secret resolver");
        }
    }

    /// Resolve a property string (`prefix:key`, or a bare key for the
    /// environment backend).
    ///
    /// Fails with [`SecretsError::UnknownPrefix`] naming only the prefix when
    /// nothing is registered for it. A resolver-level failure is wrapped with
    /// the resolver's name and the original property string; resolved values
    /// never appear in errors.
    pub async fn resolve(&self, property: &str) -> Result<SecretString> {
        let parsed = Property::parse(property);

        // Clone the Arc out and drop the guard before awaiting so a slow
        // backend never holds the lock.
        let resolver = {
            let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
            resolvers.get(parsed.prefix()).cloned()
        }
        .ok_or_else(|| SecretsError::unknown_prefix(parsed.prefix()))?;

        debug!(prefix = %parsed.prefix(), resolver = %resolver.name(), "resolving secret property");

        resolver
            .resolve(parsed.key())
            .await
            .map_err(|e| SecretsError::resolution(resolver.name(), property, e))
    }

    /// List the registered prefixes, sorted for stable diagnostics.
    pub fn prefixes(&self) -> Vec<String> {
        let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
        let mut prefixes: Vec<String> = resolvers.keys().cloned().collect();
        prefixes.sort();
        prefixes
    }

    /// Fetch the resolver registered under a prefix, if any.
    pub fn get(&self, prefix: &str) -> Option<Arc<dyn SecretResolver>> {
        let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
        resolvers.get(prefix).cloned()
    }

    /// Check whether a prefix is registered.
    pub fn has(&self, prefix: &str) -> bool {
        let resolvers = self.resolvers.read().unwrap_or_else(PoisonError::into_inner);
        resolvers.contains_key(prefix)
    }
}
