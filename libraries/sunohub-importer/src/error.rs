//! Error types for song import

use thiserror::Error;

/// Import errors
#[derive(Debug, Error)]
pub enum ImportError {
    /// No song id anywhere in the URL or the page
    #[error("Could not locate a song id; try the full song page link")]
    SongIdNotFound,

    /// The link is not a usable URL
    #[error("Invalid song link: {0}")]
    InvalidUrl(String),

    /// Page fetch failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Page fetch took too long
    #[error("Timed out fetching song page")]
    Timeout,

    /// Song page answered with an error status
    #[error("Song page returned HTTP {0}")]
    Http(u16),
}

/// Result type for import operations
pub type Result<T> = std::result::Result<T, ImportError>;

impl From<ImportError> for sunohub_core::SunoHubError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::InvalidUrl(msg) => sunohub_core::SunoHubError::invalid_input(msg),
            ImportError::SongIdNotFound => {
                sunohub_core::SunoHubError::not_found("song id", "imported page")
            }
            other => sunohub_core::SunoHubError::Other(other.to_string()),
        }
    }
}
