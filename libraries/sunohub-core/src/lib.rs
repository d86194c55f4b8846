//! SunoHub Core
//!
//! Platform-agnostic core types, ports, and error handling for SunoHub.
//!
//! This crate provides the building blocks shared by the playback
//! controller, the backend client, the importer, and the CLI.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Song`, `Review`, `SortFilter`, `AdjacentSongIds`
//! - **Ports**: `KeyValueStore` (persisted player state) and `Catalog`
//!   (random and time-adjacent song lookups)
//! - **Error Handling**: Unified `SunoHubError` and `Result` types
//! - **Sharing**: social share page rendering
//!
//! # Example
//!
//! ```rust
//! use sunohub_core::{Song, SongId};
//!
//! let song = Song::new("0f9e8d7c-1111-2222-3333-444455556666", "Night Drive", "Luna")
//!     .with_id(SongId::new("row-1"));
//!
//! assert_eq!(song.queue_key(), "row-1");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod share;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{Result, SunoHubError};
pub use traits::{Catalog, KeyValueStore};
pub use types::{AdjacentSongIds, Review, Song, SongId, SortFilter};
