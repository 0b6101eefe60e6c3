//! File-based resolver rooted at one secrets directory.
//!
//! Keys are relative paths under the configured directory, in the style of
//! container secret mounts (one file per secret, value is the trimmed file
//! content). The resolver must never read outside its root: absolute keys
//! and `..` components are rejected before any filesystem access, and the
//! fully resolved path is re-checked against the canonical root afterwards
//! so symlinks cannot escape it either.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use tracing::debug;

use super::SecretResolver;
use crate::secrets::error::{Result, SecretsError};
use crate::secrets::types::SecretString;

/// Resolver that reads one file per secret under a fixed directory.
#[derive(Debug, Clone)]
pub struct FileResolver {
    secrets_dir: PathBuf,
}

impl FileResolver {
    /// Create a resolver rooted at `secrets_dir`.
    ///
    /// The directory is canonicalized once here so the per-key containment
    /// check compares against a stable absolute path.
    pub fn new(secrets_dir: impl AsRef<Path>) -> Result<Self> {
        let secrets_dir = secrets_dir.as_ref().canonicalize().map_err(|_| {
            SecretsError::config_error("secrets directory does not exist or is not accessible")
        })?;
        Ok(Self { secrets_dir })
    }

    /// The canonical secrets directory.
    pub fn secrets_dir(&self) -> &Path {
        &self.secrets_dir
    }

    /// Validate a key without touching the filesystem.
    fn validate_key(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(SecretsError::invalid_key(key, "key must not be empty"));
        }

        let path = Path::new(key);
        if path.is_absolute() {
            return Err(SecretsError::invalid_key(key, "absolute paths are not allowed"));
        }

        if path.components().any(|c| matches!(c, Component::ParentDir)) {
            return Err(SecretsError::invalid_key(key, "path traversal is not allowed"));
        }

        Ok(())
    }
}

#[async_trait]
impl SecretResolver for FileResolver {
    async fn resolve(&self, key: &str) -> Result<SecretString> {
        Self::validate_key(key)?;

        let candidate = self.secrets_dir.join(key);

        // Canonicalization resolves symlinks; the result must still live
        // strictly under the secrets directory.
        let resolved = candidate.canonicalize().map_err(|e| match e.kind() {
            ErrorKind::NotFound => SecretsError::not_found(format!("no secret file for '{}'", key)),
            _ => SecretsError::backend_error("failed to resolve secret file"),
        })?;

        if !resolved.starts_with(&self.secrets_dir) {
            return Err(SecretsError::invalid_key(key, "resolved path escapes secrets directory"));
        }

        debug!(key = %key, "reading file-backed secret");

        let contents = tokio::fs::read_to_string(&resolved).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SecretsError::not_found(format!("no secret file for '{}'", key)),
            _ => SecretsError::backend_error("failed to read secret file"),
        })?;

        Ok(SecretString::new(contents.trim()))
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
