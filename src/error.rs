//! Error types for huddle.

use thiserror::Error;

/// Common error type for huddle.
///
/// The chat core itself has no fatal conditions; this type covers the outer
/// surface (configuration loading, socket binding).
#[derive(Error, Debug)]
pub enum HuddleError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for huddle operations.
pub type Result<T> = std::result::Result<T, HuddleError>;
