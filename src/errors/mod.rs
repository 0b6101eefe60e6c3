//! # Error Handling
//!
//! Crate-level error types using `thiserror`. Resolver-level errors live in
//! [`crate::secrets::error`]; this module wraps them together with
//! configuration, validation, and I/O failures so the binary entry point can
//! propagate a single `Result` up to `main`.

pub mod types;

pub use types::{Result, UnveilError};
