//! Error types for slidegraph.
//!
//! Graph and queue operations report misuse through `bool`/`Option` and
//! never produce these; errors only come from configuration and input.

use thiserror::Error;

/// Error type for configuration and event ingestion.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration value.
    #[error("configuration error: {0}")]
    Config(String),

    /// An input line could not be parsed as an event.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for slidegraph operations.
pub type Result<T> = std::result::Result<T, Error>;
