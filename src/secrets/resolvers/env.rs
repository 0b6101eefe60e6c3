//! Environment variable resolver.
//!
//! Reads keys directly from the process environment. This backend never
//! fails: a missing or empty variable resolves to the empty string with a
//! warning, which keeps bare `${VAR}` references usable as optional
//! overrides. This is deliberately distinct from an unknown-prefix failure.

use async_trait::async_trait;
use std::env;
use tracing::warn;

use super::SecretResolver;
use crate::secrets::error::Result;
use crate::secrets::types::SecretString;

/// Resolver backed by the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvResolver {
    // No internal state needed - reads directly from env
}

impl EnvResolver {
    /// Creates a new environment variable resolver.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SecretResolver for EnvResolver {
    async fn resolve(&self, key: &str) -> Result<SecretString> {
        match env::var(key) {
            Ok(value) if !value.is_empty() => Ok(SecretString::new(value)),
            _ => {
                warn!(
                    variable = %key,
                    "environment variable is unset or empty, substituting empty value"
                );
                Ok(SecretString::default())
            }
        }
    }

    fn name(&self) -> &'static str {
        "env"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_resolve_set_variable() {
        env::set_var("UNVEIL_TEST_ENV_RESOLVER_SET", "plaintext-value");

        let resolver = EnvResolver::new();
        let value = resolver.resolve("UNVEIL_TEST_ENV_RESOLVER_SET").await.unwrap();
        assert_eq!(value.expose_secret(), "plaintext-value");

        env::remove_var("UNVEIL_TEST_ENV_RESOLVER_SET");
    }

    #[tokio::test]
    async fn test_missing_variable_is_empty_not_error() {
        let resolver = EnvResolver::new();
        let value = resolver.resolve("UNVEIL_TEST_ENV_RESOLVER_DEFINITELY_UNSET").await.unwrap();
        assert!(value.is_empty());
    }

    #[tokio::test]
    async fn test_empty_variable_is_empty_not_error() {
        env::set_var("UNVEIL_TEST_ENV_RESOLVER_EMPTY", "");

        let resolver = EnvResolver::new();
        let value = resolver.resolve("UNVEIL_TEST_ENV_RESOLVER_EMPTY").await.unwrap();
        assert!(value.is_empty());

        env::remove_var("UNVEIL_TEST_ENV_RESOLVER_EMPTY");
    }

    #[test]
    fn test_name() {
        assert_eq!(EnvResolver::new().name(), "env");
    }
}
