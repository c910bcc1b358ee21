//! Error types for the store layer.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying SQLite error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A bind parameter could not be mapped to a SQL value.
    #[error("unsupported parameter at index {index}: {detail}")]
    UnsupportedParam { index: usize, detail: String },

    /// The store is not ready to serve queries.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
