//! Error types for secret resolution.
//!
//! Every variant carries only non-secret context: prefixes, resolver names,
//! property strings, key names, and generic backend descriptions. Resolved
//! values must never appear in an error message.

use thiserror::Error;

/// Result type for secret resolution operations.
pub type Result<T> = std::result::Result<T, SecretsError>;

/// Errors that can occur while resolving secret references.
#[derive(Error, Debug)]
pub enum SecretsError {
    /// No resolver is registered for the requested prefix.
    #[error("no secret resolver registered for prefix '{prefix}'")]
    UnknownPrefix { prefix: String },

    /// The backend does not hold the requested secret.
    #[error("secret not found: {message}")]
    NotFound { message: String },

    /// The key is not acceptable to the resolver (empty, absolute path,
    /// traversal attempt).
    #[error("invalid secret key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Backend-specific failure (network error, malformed response, read
    /// failure). The message stays generic and never echoes backend payloads.
    #[error("backend error: {message}")]
    BackendError { message: String },

    /// A resolver failed while handling a property. Added by the registry so
    /// callers see which resolver and which property string failed.
    #[error("resolver '{resolver}' failed to resolve '{property}': {source}")]
    Resolution {
        resolver: String,
        property: String,
        #[source]
        source: Box<SecretsError>,
    },

    /// The expansion target contains a shape the traversal cannot represent.
    /// The traversal is total over all supported shapes, so hitting this is
    /// a defect in the caller's type, not user error.
    #[error("unsupported configuration shape: {detail}")]
    UnsupportedShape { detail: String },

    /// The expanded tree no longer deserializes into the target type. Only
    /// the type name is reported; serde's own message could echo a
    /// substituted value.
    #[error("expanded configuration did not round-trip into '{type_name}'")]
    RoundTrip { type_name: String },

    /// Configuration error while constructing a resolver.
    #[error("resolver configuration error: {message}")]
    ConfigError { message: String },
}

impl SecretsError {
    /// Create an unknown prefix error.
    pub fn unknown_prefix(prefix: impl Into<String>) -> Self {
        Self::UnknownPrefix { prefix: prefix.into() }
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound { message: message.into() }
    }

    /// Create an invalid key error.
    pub fn invalid_key(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKey { key: key.into(), reason: reason.into() }
    }

    /// Create a backend error.
    pub fn backend_error(message: impl Into<String>) -> Self {
        Self::BackendError { message: message.into() }
    }

    /// Create a config error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::ConfigError { message: message.into() }
    }

    /// Create an unsupported shape error.
    pub fn unsupported_shape(detail: impl Into<String>) -> Self {
        Self::UnsupportedShape { detail: detail.into() }
    }

    /// Wrap a resolver-level failure with the resolver name and the original
    /// property string.
    pub fn resolution(
        resolver: impl Into<String>,
        property: impl Into<String>,
        source: SecretsError,
    ) -> Self {
        Self::Resolution {
            resolver: resolver.into(),
            property: property.into(),
            source: Box::new(source),
        }
    }
}
