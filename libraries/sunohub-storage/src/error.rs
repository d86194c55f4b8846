/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// The state file exists but is not a JSON object of strings
    #[error("Corrupt state file {path}: {message}")]
    Corrupt { path: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A previous writer panicked while holding the lock
    #[error("Store lock poisoned")]
    Poisoned,

    /// I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for sunohub_core::SunoHubError {
    fn from(err: StorageError) -> Self {
        sunohub_core::SunoHubError::storage(err.to_string())
    }
}
