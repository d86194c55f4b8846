/// CLI error types
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Song not found: {0}")]
    SongNotFound(String),

    #[error("Sign-in required: {0}")]
    SignInRequired(&'static str),

    #[error(transparent)]
    Core(#[from] sunohub_core::SunoHubError),

    #[error(transparent)]
    Storage(#[from] sunohub_storage::StorageError),

    #[error(transparent)]
    Catalog(#[from] sunohub_catalog::CatalogError),

    #[error(transparent)]
    Playback(#[from] sunohub_playback::PlaybackError),

    #[error(transparent)]
    Import(#[from] sunohub_importer::ImportError),
}

pub type Result<T> = std::result::Result<T, CliError>;
