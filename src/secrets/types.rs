//! Redacting wrapper types for resolved secret values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A string wrapper that redacts its contents in Debug, Display, and
/// serialization.
///
/// Resolved secret values travel through the engine as `SecretString` so that
/// tracing output, error formatting, and structured serialization can never
/// expose them by accident. The actual value is only reachable through
/// [`SecretString::expose_secret`].
///
/// Debug, Display, and Serialize all emit `[REDACTED]`; Deserialize accepts
/// real values, so backend tokens can be read from configuration documents.
/// The backing memory is zeroed on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretString(String);

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str("[REDACTED]")
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(SecretString(value))
    }
}

impl SecretString {
    /// Creates a new SecretString from a string value.
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exposes the underlying secret value.
    ///
    /// Only call this at the point where the value is actually needed (for
    /// substitution into a configuration string). Never log the result.
    pub fn expose_secret(&self) -> &str {
        &self.0
    }

    /// Returns the length of the secret without exposing the value.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the secret is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretString([REDACTED])")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for SecretString {}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl Default for SecretString {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_and_display_redact_resolved_values() {
        let resolved = SecretString::new("hunter2");
        assert_eq!(format!("{:?}", resolved), "SecretString([REDACTED])");
        assert_eq!(resolved.to_string(), "[REDACTED]");
    }

    #[test]
    fn test_serialized_backend_config_redacts_its_token() {
        // Backend configurations carry credentials as SecretString. Dumping
        // one (structured logs, diagnostics) must echo everything but the
        // token.
        #[derive(serde::Serialize)]
        struct BackendConfig {
            address: String,
            token: SecretString,
        }

        let config = BackendConfig {
            address: "http://127.0.0.1:8200".to_string(),
            token: SecretString::new("s.XyZ123"),
        };

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("http://127.0.0.1:8200"));
        assert!(json.contains("[REDACTED]"));
        assert!(!json.contains("s.XyZ123"));
    }

    #[test]
    fn test_yaml_deserialization_keeps_the_raw_value() {
        // Tokens arrive through the same document parsing as everything
        // else; only the outbound direction redacts.
        let secret: SecretString = serde_yaml::from_str("s.XyZ123").unwrap();
        assert_eq!(secret.expose_secret(), "s.XyZ123");
    }

    #[test]
    fn test_conversions_and_emptiness() {
        let from_owned = SecretString::from("pw".to_string());
        let from_ref = SecretString::from("pw");
        assert_eq!(from_owned, from_ref);
        assert_eq!(from_owned.len(), 2);
        assert!(!from_owned.is_empty());
        assert!(SecretString::default().is_empty());
    }
}
