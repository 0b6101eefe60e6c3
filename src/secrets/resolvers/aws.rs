//! AWS Secrets Manager resolver.
//!
//! Reads one named secret per resolver instance. Secrets Manager stores a
//! single string per secret; many deployments pack several values into one
//! JSON object. The resolver supports both layouts:
//!
//! - JSON object: the field named by the requested key is returned, and a
//!   missing field is a not-found error.
//! - Anything else: the whole string is one opaque value and is returned
//!   **regardless of the requested key**. This asymmetry is intentional and
//!   load-bearing; callers reference plain-text secrets with whatever key
//!   reads best in their configuration.

use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use serde_json::Value;
use tracing::debug;

use super::SecretResolver;
use crate::secrets::error::{Result, SecretsError};
use crate::secrets::types::SecretString;

/// Resolver backed by one AWS Secrets Manager secret.
pub struct AwsResolver {
    client: Client,
    secret_name: String,
}

impl std::fmt::Debug for AwsResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsResolver")
            .field("secret_name", &self.secret_name)
            .field("client", &"[SecretsManagerClient]")
            .finish()
    }
}

impl AwsResolver {
    /// Create a resolver from an existing client and secret name.
    pub fn new(client: Client, secret_name: impl Into<String>) -> Result<Self> {
        let secret_name = secret_name.into();
        if secret_name.is_empty() {
            return Err(SecretsError::config_error("AWS secret name must not be empty"));
        }
        Ok(Self { client, secret_name })
    }

    /// Create a resolver using the default AWS credential/region chain.
    pub async fn from_default_chain(secret_name: impl Into<String>) -> Result<Self> {
        let sdk_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        Self::new(Client::new(&sdk_config), secret_name)
    }

    /// Extract the value for `key` from a fetched secret string.
    ///
    /// Mirrors the dual storage layouts: a JSON object is consulted by field
    /// name (scalar fields are rendered to text); everything else is
    /// returned whole.
    fn extract(secret_string: &str, key: &str, secret_name: &str) -> Result<SecretString> {
        let parsed: Value = match serde_json::from_str(secret_string) {
            Ok(value) => value,
            Err(_) => return Ok(SecretString::new(secret_string)),
        };

        let fields = match parsed.as_object() {
            Some(fields) => fields,
            // Valid JSON but not an object: still one opaque value.
            None => return Ok(SecretString::new(secret_string)),
        };

        let value = fields.get(key).ok_or_else(|| {
            SecretsError::not_found(format!(
                "key '{}' not found in AWS secret '{}'",
                key, secret_name
            ))
        })?;

        match value {
            Value::String(s) => Ok(SecretString::new(s.clone())),
            Value::Bool(_) | Value::Number(_) => Ok(SecretString::new(value.to_string())),
            _ => Err(SecretsError::backend_error(format!(
                "value for key '{}' in AWS secret '{}' is not a scalar",
                key, secret_name
            ))),
        }
    }
}

#[async_trait]
impl SecretResolver for AwsResolver {
    async fn resolve(&self, key: &str) -> Result<SecretString> {
        debug!(secret_name = %self.secret_name, key = %key, "fetching secret from AWS Secrets Manager");

        let output = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
            .map_err(|e| {
                let service_error = e.into_service_error();
                if service_error.is_resource_not_found_exception() {
                    SecretsError::not_found(format!(
                        "AWS secret '{}' not found",
                        self.secret_name
                    ))
                } else {
                    SecretsError::backend_error(format!(
                        "AWS Secrets Manager request failed for '{}'",
                        self.secret_name
                    ))
                }
            })?;

        let secret_string = output.secret_string().ok_or_else(|| {
            SecretsError::backend_error(format!(
                "AWS secret '{}' has no string payload (binary secrets are not supported)",
                self.secret_name
            ))
        })?;

        Self::extract(secret_string, key, &self.secret_name)
    }

    fn name(&self) -> &'static str {
        "aws"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_object_field() {
        let value = AwsResolver::extract(r#"{"K":"V","other":"x"}"#, "K", "app/secrets").unwrap();
        assert_eq!(value.expose_secret(), "V");
    }

    #[test]
    fn test_extract_json_object_missing_field() {
        let err = AwsResolver::extract(r#"{"other":"x"}"#, "K", "app/secrets").unwrap_err();
        assert!(matches!(err, SecretsError::NotFound { .. }));
        assert!(err.to_string().contains("'K'"));
    }

    #[test]
    fn test_extract_plaintext_ignores_key() {
        let value = AwsResolver::extract("hello", "any-key", "app/secrets").unwrap();
        assert_eq!(value.expose_secret(), "hello");

        let value = AwsResolver::extract("hello", "different-key", "app/secrets").unwrap();
        assert_eq!(value.expose_secret(), "hello");
    }

    #[test]
    fn test_extract_non_object_json_is_opaque() {
        // Valid JSON, but not an object: still treated as one opaque value.
        for payload in [r#""hello""#, "123", r#"["a","b"]"#] {
            let value = AwsResolver::extract(payload, "K", "app/secrets").unwrap();
            assert_eq!(value.expose_secret(), payload);
        }
    }

    #[test]
    fn test_extract_object_with_mixed_value_types() {
        // A non-string sibling must not knock the whole object back to the
        // opaque path; string fields stay addressable by name.
        let payload = r#"{"a":"x","n":5}"#;

        let value = AwsResolver::extract(payload, "a", "app/secrets").unwrap();
        assert_eq!(value.expose_secret(), "x");

        let value = AwsResolver::extract(payload, "n", "app/secrets").unwrap();
        assert_eq!(value.expose_secret(), "5");

        let err = AwsResolver::extract(payload, "missing", "app/secrets").unwrap_err();
        assert!(matches!(err, SecretsError::NotFound { .. }));
    }

    #[test]
    fn test_extract_nested_field_is_rejected() {
        let err =
            AwsResolver::extract(r#"{"blob":{"inner":"v"}}"#, "blob", "app/secrets").unwrap_err();
        assert!(matches!(err, SecretsError::BackendError { .. }));
        assert!(!err.to_string().contains("inner"));
    }

    #[test]
    fn test_extract_never_leaks_value_in_error() {
        let err = AwsResolver::extract(r#"{"other":"hunter2"}"#, "K", "app/secrets").unwrap_err();
        assert!(!err.to_string().contains("hunter2"));
    }
}
