//! Error types for ragbot-vector.

use thiserror::Error;

/// Result type for ragbot-vector operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in ragbot-vector operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Dimension mismatch between vector and index.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions.
        expected: usize,
        /// Actual dimensions provided.
        actual: usize,
    },

    /// Invalid vector (e.g., contains NaN).
    #[error("Invalid vector: {0}")]
    InvalidVector(String),

    /// Configuration error (e.g., zero dimensions).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Snapshot on disk does not satisfy the index invariants.
    #[error("Corrupt snapshot: {0}")]
    Corrupt(String),

    /// Persistence error (serialization, etc.).
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
