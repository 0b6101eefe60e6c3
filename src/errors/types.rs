//! # Error Types

use crate::secrets::SecretsError;

/// Custom result type for unveil operations.
pub type Result<T> = std::result::Result<T, UnveilError>;

/// Main error type for the unveil configuration loader.
#[derive(thiserror::Error, Debug)]
pub enum UnveilError {
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors
    #[error("Validation error: {message}")]
    Validation { message: String, field: Option<String> },

    /// Secret resolution errors
    #[error("Secret resolution error: {0}")]
    Secrets(#[from] SecretsError),

    /// I/O errors with additional context
    #[error("I/O error: {context}")]
    Io {
        #[source]
        source: std::io::Error,
        context: String,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {context}")]
    Serialization { context: String },

    /// Internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl UnveilError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config { message: message.into(), source: None }
    }

    /// Create a configuration error with source
    pub fn config_with_source<S: Into<String>>(
        message: S,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Config { message: message.into(), source: Some(source) }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation { message: message.into(), field: None }
    }

    /// Create a validation error for a specific field
    pub fn validation_field<S: Into<String>, F: Into<String>>(message: S, field: F) -> Self {
        Self::Validation { message: message.into(), field: Some(field.into()) }
    }

    /// Create an I/O error with context
    pub fn io<S: Into<String>>(source: std::io::Error, context: S) -> Self {
        Self::Io { source, context: context.into() }
    }

    /// Create a new internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal { message: message.into() }
    }
}

impl From<validator::ValidationErrors> for UnveilError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation { message: errors.to_string(), field: None }
    }
}

impl From<serde_yaml::Error> for UnveilError {
    fn from(error: serde_yaml::Error) -> Self {
        Self::Serialization { context: error.to_string() }
    }
}
