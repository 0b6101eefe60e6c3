//! # Observability Infrastructure
//!
//! Structured logging for the configuration loader. Resolution and
//! registration events carry only non-secret fields (prefixes, resolver
//! names, key names); values never reach a log line.

pub mod logging;

pub use logging::{init_logging, ObservabilityConfig};
