//! Error types for the sandbox side.

use thiserror::Error;

/// Result type for sandbox operations.
pub type SandboxResult<T> = Result<T, SandboxError>;

/// Errors that can occur inside the isolated context.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The diff engine could not be fetched or initialized.
    #[error("diff engine load failed: {0}")]
    DiffLoad(String),
}
