//! Common error types for lexiscan

use thiserror::Error;

/// Common result type for lexiscan operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the lexiscan services
///
/// Request handlers map these onto HTTP statuses; nothing here crashes the
/// process on a per-request basis. Only startup failures (Config, Io,
/// Database while connecting) are treated as fatal by `main`.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Write refused because it would duplicate existing state
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Login failure. Unknown email and wrong password share this single
    /// message so callers cannot enumerate accounts.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Missing or unverifiable bearer token
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Verified token does not grant access to the requested identity
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}
