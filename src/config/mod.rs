//! # Configuration Management
//!
//! Loads a YAML configuration document, bootstraps the secret resolver
//! registry from its `secrets` section, expands every `${...}` placeholder
//! in the typed configuration, and only then validates it. The
//! expand-then-validate ordering is load-bearing: validators must see
//! resolved values, never placeholder syntax.

pub mod settings;

pub use settings::{AppConfig, AuthConfig, DatabaseConfig, SecretsConfig, ServerConfig};

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::errors::{Result, UnveilError};
use crate::secrets::{
    expand_variables, AwsResolver, EnvResolver, FileResolver, ResolverRegistry, VaultResolver,
};

/// On-disk configuration document: the secrets bootstrap section plus the
/// application configuration proper.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigDocument {
    /// Secret backend declarations; read before expansion, never expanded.
    #[serde(default)]
    pub secrets: SecretsConfig,

    /// Application configuration; every string field may carry placeholders.
    #[serde(flatten)]
    pub app: AppConfig,
}

/// Build a resolver registry from the secrets bootstrap section.
///
/// The environment resolver is always registered (bare `${VAR}` references
/// must work out of the box); file, Vault, and AWS resolvers are registered
/// when configured, either in the document or through environment fallbacks.
pub async fn build_registry(secrets: &SecretsConfig) -> Result<ResolverRegistry> {
    let secrets = secrets.clone().merged_with_env();
    let registry = ResolverRegistry::new();

    registry.register("env", Arc::new(EnvResolver::new()));

    if let Some(ref dir) = secrets.file_dir {
        registry.register("file", Arc::new(FileResolver::new(dir)?));
    }

    if let Some(ref vault_config) = secrets.vault {
        registry.register("vault", Arc::new(VaultResolver::new(vault_config.clone())?));
    }

    if let Some(ref secret_name) = secrets.aws_secret_name {
        registry.register("aws", Arc::new(AwsResolver::from_default_chain(secret_name).await?));
    }

    Ok(registry)
}

/// Load, expand, and validate a configuration file.
///
/// Fails fast: the first unresolved placeholder aborts the load, and the
/// returned error carries only non-secret context.
pub async fn load_config(path: impl AsRef<Path>) -> Result<(AppConfig, ResolverRegistry)> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .map_err(|e| UnveilError::io(e, format!("reading configuration file {}", path.display())))?;

    let document: ConfigDocument = serde_yaml::from_str(&raw)?;
    let registry = build_registry(&document.secrets).await?;

    let app = expand_and_validate(&registry, document.app).await?;

    info!(
        path = %path.display(),
        prefixes = ?registry.prefixes(),
        "configuration loaded"
    );

    Ok((app, registry))
}

/// Expand placeholders in an already-parsed configuration against a caller
/// supplied registry, then validate it.
///
/// This is the dependency-injected entry point used by tests and by
/// processes that host several isolated configurations.
pub async fn expand_and_validate(
    registry: &ResolverRegistry,
    mut app: AppConfig,
) -> Result<AppConfig> {
    expand_variables(registry, &mut app).await?;
    app.validate()?;
    Ok(app)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_registry_always_has_env() {
        // Other tests in this binary may set backend env fallbacks, so only
        // the unconditional env resolver is asserted here.
        let registry = build_registry(&SecretsConfig::default()).await.unwrap();
        assert!(registry.has("env"));
    }

    #[tokio::test]
    async fn test_build_registry_with_file_dir() {
        let dir = tempfile::tempdir().unwrap();
        let secrets =
            SecretsConfig { file_dir: Some(dir.path().to_path_buf()), ..Default::default() };

        let registry = build_registry(&secrets).await.unwrap();
        assert!(registry.has("file"));
    }

    #[tokio::test]
    async fn test_document_parses_flattened_app_sections() {
        let yaml = r#"
secrets:
  file_dir: /run/secrets
server:
  host: 0.0.0.0
  port: 9090
database:
  url: sqlite://app.db
"#;
        let document: ConfigDocument = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(document.secrets.file_dir.as_deref().unwrap().to_str(), Some("/run/secrets"));
        assert_eq!(document.app.server.port, 9090);
        assert_eq!(document.app.database.url, "sqlite://app.db");
    }

    #[tokio::test]
    async fn test_expand_runs_before_validate() {
        // The placeholder value satisfies a validator that the raw
        // placeholder text would also satisfy; what matters is that the
        // expanded value lands in the config before validate() sees it.
        std::env::set_var("UNVEIL_TEST_CONFIG_ORDERING", "resolved-secret");

        let registry = ResolverRegistry::new();
        registry.register("env", Arc::new(EnvResolver::new()));

        let mut app = AppConfig::default();
        app.auth.enabled = true;
        app.auth.client_secret = "${env:UNVEIL_TEST_CONFIG_ORDERING}".to_string();

        let app = expand_and_validate(&registry, app).await.unwrap();
        assert_eq!(app.auth.client_secret, "resolved-secret");

        std::env::remove_var("UNVEIL_TEST_CONFIG_ORDERING");
    }

    #[tokio::test]
    async fn test_unknown_prefix_aborts_load() {
        let registry = ResolverRegistry::new();
        registry.register("env", Arc::new(EnvResolver::new()));

        let mut app = AppConfig::default();
        app.database.password = "${vault:db_password}".to_string();

        let err = expand_and_validate(&registry, app).await.unwrap_err();
        assert!(err.to_string().contains("vault"));
        assert!(!err.to_string().contains("db_password_value"));
    }
}
