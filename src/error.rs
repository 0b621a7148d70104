//! Error types for blogpress.

use thiserror::Error;

/// Common error type for blogpress.
#[derive(Error, Debug)]
pub enum BlogError {
    /// Database error.
    ///
    /// Wraps any sqlx failure that is not mapped to a more specific variant.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (missing, invalid or expired credentials).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Unique constraint violated.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Template error.
    #[error("template error: {0}")]
    Template(#[from] crate::template::TemplateError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected failure in hashing or token signing.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<sqlx::Error> for BlogError {
    fn from(e: sqlx::Error) -> Self {
        BlogError::Database(e.to_string())
    }
}

/// Result type alias for blogpress operations.
pub type Result<T> = std::result::Result<T, BlogError>;
