//! SunoHub Backend Client
//!
//! HTTP client for the hosted backend that stores the shared song feed.
//! The backend exposes a PostgREST-style REST surface under `/rest/v1`.
//!
//! # Features
//!
//! - **Feed**: latest / trending / top rated / mine, artist search
//! - **Songs**: fetch, publish, delete, lyrics and artist edits, play counts
//! - **Reviews**: list, upsert, delete
//! - **Catalog navigation**: implements [`sunohub_core::Catalog`] (random
//!   song, time-adjacent songs) for queue roaming
//!
//! # Example
//!
//! ```ignore
//! use sunohub_catalog::{BackendConfig, SupabaseClient};
//! use sunohub_core::SortFilter;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::new("https://project.supabase.co", "anon-key");
//!     let client = SupabaseClient::new(config)?;
//!
//!     let feed = client.get_song_feed(SortFilter::Trending, None, None).await?;
//!     println!("{} songs", feed.len());
//!     Ok(())
//! }
//! ```

mod catalog;
mod client;
mod error;
mod reviews;
mod songs;
mod types;

// Re-export main types
pub use client::SupabaseClient;
pub use error::{CatalogError, Result};
pub use types::BackendConfig;

/// Number of candidate ids fetched when picking a random song
pub const RANDOM_CANDIDATES: usize = 50;

/// Maximum number of songs returned by a feed query
pub const FEED_LIMIT: usize = 100;
