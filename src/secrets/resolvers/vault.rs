//! HashiCorp Vault resolver.
//!
//! Reads one base secret path per resolver instance and looks keys up inside
//! it. Each `resolve` call issues exactly one read of the path and accepts
//! both KV response envelopes: KV v2 nests the secret map under
//! `data.data`, KV v1 keeps it flat under `data`. A missing path and a
//! missing key inside an existing path are reported as distinct not-found
//! errors. Only non-secret metadata (path, key names) ever reaches the logs.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::SecretResolver;
use crate::secrets::error::{Result, SecretsError};
use crate::secrets::types::SecretString;

/// Configuration for the Vault resolver.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultConfig {
    /// Vault server address (e.g., "https://vault.example.com:8200")
    pub address: String,

    /// Vault authentication token (if using token auth)
    pub token: Option<SecretString>,

    /// Vault namespace (for Enterprise)
    pub namespace: Option<String>,

    /// Secret path within the KV engine, including the mount
    /// (e.g., "secret/data/myapp" for KV v2, "secret/myapp" for KV v1)
    pub secret_path: String,
}

impl VaultConfig {
    /// Load configuration from environment variables.
    ///
    /// Uses:
    /// - `UNVEIL_VAULT_ADDR` or `VAULT_ADDR` (required; `None` when unset)
    /// - `UNVEIL_VAULT_TOKEN` or `VAULT_TOKEN`
    /// - `UNVEIL_VAULT_NAMESPACE` or `VAULT_NAMESPACE`
    /// - `UNVEIL_VAULT_SECRET_PATH` (default: "secret/data/application")
    pub fn from_env() -> Option<Self> {
        let address =
            std::env::var("UNVEIL_VAULT_ADDR").or_else(|_| std::env::var("VAULT_ADDR")).ok()?;

        let token = std::env::var("UNVEIL_VAULT_TOKEN")
            .or_else(|_| std::env::var("VAULT_TOKEN"))
            .ok()
            .map(SecretString::new);

        let namespace = std::env::var("UNVEIL_VAULT_NAMESPACE")
            .or_else(|_| std::env::var("VAULT_NAMESPACE"))
            .ok();

        let secret_path = std::env::var("UNVEIL_VAULT_SECRET_PATH")
            .unwrap_or_else(|_| "secret/data/application".to_string());

        Some(Self { address, token, namespace, secret_path })
    }
}

/// Resolver backed by a HashiCorp Vault KV engine.
pub struct VaultResolver {
    http: reqwest::Client,
    config: VaultConfig,
}

impl std::fmt::Debug for VaultResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultResolver")
            .field("address", &self.config.address)
            .field("secret_path", &self.config.secret_path)
            .field("namespace", &self.config.namespace)
            .finish()
    }
}

impl VaultResolver {
    /// Create a resolver from an authenticated configuration.
    pub fn new(config: VaultConfig) -> Result<Self> {
        if config.address.is_empty() {
            return Err(SecretsError::config_error("Vault address must not be empty"));
        }
        if config.secret_path.is_empty() {
            return Err(SecretsError::config_error("Vault secret path must not be empty"));
        }

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| SecretsError::config_error(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, config })
    }

    /// Create a resolver from environment configuration, if present.
    pub fn from_env() -> Result<Option<Self>> {
        match VaultConfig::from_env() {
            Some(config) => Ok(Some(Self::new(config)?)),
            None => Ok(None),
        }
    }

    fn read_url(&self) -> String {
        format!(
            "{}/v1/{}",
            self.config.address.trim_end_matches('/'),
            self.config.secret_path.trim_start_matches('/')
        )
    }

    /// Extract `key` from a raw Vault read response, accepting both the
    /// KV v2 (`data.data.<key>`) and KV v1 (`data.<key>`) envelopes.
    ///
    /// KV v2 reads always carry a `metadata` sibling next to the inner
    /// `data` map. Requiring it keeps a KV v1 secret that stores an object
    /// under a key literally named "data" readable as KV v1.
    fn lookup_key(body: &Value, key: &str, path: &str) -> Result<SecretString> {
        let envelope = body.get("data").and_then(Value::as_object);
        let kv2 = envelope
            .filter(|d| d.contains_key("metadata"))
            .and_then(|d| d.get("data"))
            .and_then(Value::as_object);

        let secrets = kv2.or(envelope).ok_or_else(|| {
            SecretsError::backend_error("unexpected Vault response shape (no data envelope)")
        })?;

        let value = secrets.get(key).ok_or_else(|| {
            SecretsError::not_found(format!("key '{}' not found at Vault path '{}'", key, path))
        })?;

        match value {
            Value::String(s) => Ok(SecretString::new(s.clone())),
            Value::Bool(_) | Value::Number(_) => Ok(SecretString::new(value.to_string())),
            _ => Err(SecretsError::backend_error(format!(
                "value for key '{}' at Vault path '{}' is not a scalar",
                key, path
            ))),
        }
    }
}

#[async_trait]
impl SecretResolver for VaultResolver {
    async fn resolve(&self, key: &str) -> Result<SecretString> {
        debug!(
            path = %self.config.secret_path,
            key = %key,
            "reading secret from Vault"
        );

        let mut request = self.http.get(self.read_url());
        if let Some(ref token) = self.config.token {
            request = request.header("X-Vault-Token", token.expose_secret());
        }
        if let Some(ref namespace) = self.config.namespace {
            request = request.header("X-Vault-Namespace", namespace);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SecretsError::backend_error(format!("Vault request failed: {}", e)))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                return Err(SecretsError::not_found(format!(
                    "secret path '{}' not found in Vault",
                    self.config.secret_path
                )));
            }
            status if !status.is_success() => {
                return Err(SecretsError::backend_error(format!(
                    "Vault returned status {} for path '{}'",
                    status, self.config.secret_path
                )));
            }
            _ => {}
        }

        let body: Value = response
            .json()
            .await
            .map_err(|_| SecretsError::backend_error("Vault response is not valid JSON"))?;

        Self::lookup_key(&body, key, &self.config.secret_path)
    }

    fn name(&self) -> &'static str {
        "vault"
    }
}
