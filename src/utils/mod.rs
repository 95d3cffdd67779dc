//! Configuration and process-level utilities.

/// Layered configuration (defaults, `ragbot.toml`, environment).
pub mod config;
/// Tracing subscriber setup.
pub mod logging;
