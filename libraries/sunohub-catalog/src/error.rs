//! Error types for the backend client.

use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Authentication required but no (valid) token available
    #[error("Authentication required")]
    AuthRequired,

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request rejected before sending
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backend is offline or unreachable
    #[error("Backend unreachable: {0}")]
    Unreachable(String),
}

/// Result type for backend client operations.
pub type Result<T> = std::result::Result<T, CatalogError>;

impl From<CatalogError> for sunohub_core::SunoHubError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(msg) => sunohub_core::SunoHubError::invalid_input(msg),
            other => sunohub_core::SunoHubError::catalog(other.to_string()),
        }
    }
}
