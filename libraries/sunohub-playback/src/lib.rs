//! SunoHub - Playback Queue Controller
//!
//! Platform-agnostic queue and navigation logic for SunoHub.
//!
//! This crate provides:
//! - A de-duplicated play queue with a cursor
//! - Repeat modes (Off, All, One, OneCustom) as a four-state cycle
//! - Shuffle picking that avoids immediate repeats
//! - Catalog roaming when the queue is empty
//! - Lyric timelines and tap-to-sync LRC recording
//!
//! # Architecture
//!
//! The controller depends only on two ports from `sunohub-core`:
//! - `KeyValueStore` for the queue, shuffle flag, and repeat mode
//! - `Catalog` for random and time-adjacent song lookups
//!
//! It never loads audio. Where playback should go is reported through a
//! caller-supplied callback receiving a [`Navigation`].
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use sunohub_core::{Catalog, KeyValueStore, Song, SongId};
//! use sunohub_playback::PlaybackController;
//!
//! # async fn example(
//! #     store: Box<dyn KeyValueStore>,
//! #     catalog: Arc<dyn Catalog>,
//! # ) -> sunohub_playback::Result<()> {
//! let mut controller = PlaybackController::restore(store, catalog)?;
//!
//! controller.add_to_queue(Song::new("suno-1", "Night Drive", "Luna").with_id(SongId::new("a")))?;
//! controller.add_to_queue(Song::new("suno-2", "Daybreak", "Luna").with_id(SongId::new("b")))?;
//!
//! controller
//!     .play_next(|nav| println!("load {}", nav.song_id), None)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod controller;
mod error;
pub mod lyrics;
mod queue;
pub mod shuffle;
pub mod state;
pub mod types;

// Public exports
pub use controller::PlaybackController;
pub use error::{PlaybackError, Result};
pub use queue::Queue;
pub use types::{Navigation, RepeatMode};
