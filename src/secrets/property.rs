//! Property parsing for secret references.
//!
//! A property is the inner token of a `${...}` placeholder: a backend prefix
//! and a backend-specific key, separated by the first colon. Bare tokens
//! without a colon default to the environment backend.

/// Prefix used when a property carries no explicit backend prefix.
pub const DEFAULT_PREFIX: &str = "env";

/// An ephemeral parsed `(prefix, key)` pair. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    prefix: String,
    key: String,
}

impl Property {
    /// Parse a property token.
    ///
    /// Splits on the **first** colon only, so any further colons stay part of
    /// the key (supports backends whose own key space is colon-delimited,
    /// e.g. `"custom:db:password"` has prefix `"custom"` and key
    /// `"db:password"`). A token without a colon resolves via the `"env"`
    /// prefix.
    pub fn parse(token: &str) -> Self {
        match token.split_once(':') {
            Some((prefix, key)) => Self { prefix: prefix.to_string(), key: key.to_string() },
            None => Self { prefix: DEFAULT_PREFIX.to_string(), key: token.to_string() },
        }
    }

    /// The backend prefix.
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The backend-specific key.
    pub fn key(&self) -> &str {
        &self.key
    }
}
