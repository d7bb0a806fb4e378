//! Error types for File Drawer.

use thiserror::Error;

/// Common error type for File Drawer.
#[derive(Error, Debug)]
pub enum DrawerError {
    /// Database error.
    ///
    /// Wraps any sqlx failure that is not a constraint violation the caller
    /// can act on.
    #[error("database error: {0}")]
    Database(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error (missing or invalid session).
    #[error("authentication error: {0}")]
    Auth(String),

    /// Malformed identifier or missing/blank required field.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Resource missing, or owned by someone else.
    #[error("{0} not found")]
    NotFound(String),

    /// Duplicate name under the same owner.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Blob store rejected an upload.
    #[error("upload failed: {0}")]
    UploadFailed(String),

    /// Blob store error outside of uploads.
    #[error("blob storage error: {0}")]
    Blob(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Unexpected failure inside the server.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DrawerError {
    /// Map a write error, turning unique-constraint violations into `Conflict`.
    pub fn from_write(e: sqlx::Error, conflict_message: impl Into<String>) -> Self {
        match &e {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DrawerError::Conflict(conflict_message.into())
            }
            _ => DrawerError::Database(e.to_string()),
        }
    }
}

impl From<sqlx::Error> for DrawerError {
    fn from(e: sqlx::Error) -> Self {
        DrawerError::Database(e.to_string())
    }
}

/// Result type alias for File Drawer operations.
pub type Result<T> = std::result::Result<T, DrawerError>;
