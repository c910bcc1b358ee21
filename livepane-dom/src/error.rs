//! Error types for the DOM layer.

use thiserror::Error;

/// Result type for DOM operations.
pub type DomResult<T> = Result<T, DomError>;

/// Errors that can occur while parsing or patching markup.
#[derive(Debug, Error)]
pub enum DomError {
    /// The parser could not consume the input.
    #[error("markup parse failed: {0}")]
    Parse(#[from] std::io::Error),

    /// The parsed document carries no body element to patch against.
    #[error("parsed document has no body")]
    MissingBody,
}
