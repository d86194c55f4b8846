//! Error types for playback management

use sunohub_core::SunoHubError;
use thiserror::Error;

/// Playback errors
///
/// Invalid indices and empty queues are not errors; those operations are
/// silent no-ops. Only failures of the store or the catalog surface here.
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// The key/value store or the catalog failed
    #[error(transparent)]
    Port(#[from] SunoHubError),

    /// Queue could not be encoded for persistence
    #[error("Failed to encode queue: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
