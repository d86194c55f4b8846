//! SunoHub Importer
//!
//! Best-effort import of songs from third-party song pages.
//!
//! Pages are scraped with plain pattern matching. Nothing here is a formal
//! grammar: every source may be missing, and the result falls back to
//! defaults (title "Suno Song", artist "Suno AI", CDN artwork and audio
//! derived from the song id). Only a missing song id is an error.
//!
//! # Example
//!
//! ```rust,no_run
//! use sunohub_importer::Importer;
//!
//! # async fn example() -> sunohub_importer::Result<()> {
//! let importer = Importer::new()?;
//! let song = importer
//!     .fetch_song("https://suno.com/song/0f9e8d7c-1111-2222-3333-444455556666")
//!     .await?;
//! println!("{} by {}", song.title, song.artist);
//! # Ok(())
//! # }
//! ```

mod error;
mod fetch;
mod parse;
pub mod text;

pub use error::{ImportError, Result};
pub use fetch::{Importer, FETCH_TIMEOUT};
pub use parse::{
    cdn_audio_url, cdn_image_url, parse_song_page, ImportedSong, DEFAULT_CATEGORY, DEFAULT_TITLE,
};
pub use text::{clean_artist_name, decode_html_entities, extract_uuid, normalize_lyrics};
