//! Storage error types.

use std::path::PathBuf;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Failed to initialize the storage backend.
    #[error("storage initialization failed: {0}")]
    Init(String),

    /// Object not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Permission denied by the storage service.
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The storage service throttled the request.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// The page token is malformed or belongs to another listing.
    #[error("invalid page token: {0}")]
    InvalidPageToken(String),

    /// Reading or writing a local file failed.
    #[error("local i/o failed on {}: {source}", path.display())]
    LocalIo {
        /// Local path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Backend-specific error.
    #[error("backend error: {0}")]
    Backend(opendal::Error),
}

impl StorageError {
    /// Creates a new initialization error.
    pub fn init(msg: impl Into<String>) -> Self {
        Self::Init(msg.into())
    }

    /// Creates a new not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound(path.into())
    }

    /// Creates a new invalid page token error.
    pub fn invalid_page_token(msg: impl Into<String>) -> Self {
        Self::InvalidPageToken(msg.into())
    }

    /// Creates a new local I/O error for the given path.
    pub fn local_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::LocalIo {
            path: path.into(),
            source,
        }
    }

    /// Returns whether this error reports a missing object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<opendal::Error> for StorageError {
    fn from(err: opendal::Error) -> Self {
        use opendal::ErrorKind;

        match err.kind() {
            ErrorKind::NotFound => Self::NotFound(err.to_string()),
            ErrorKind::PermissionDenied => Self::PermissionDenied(err.to_string()),
            ErrorKind::RateLimited => Self::RateLimited(err.to_string()),
            _ => Self::Backend(err),
        }
    }
}
