//! Common error types for the ofício generator

use thiserror::Error;

/// Common result type for ofício operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the ofício services
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error (wraps serde_json::Error)
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}
