//! SunoHub Storage
//!
//! Implementations of the `KeyValueStore` port used to persist player state
//! (queue, shuffle flag, repeat mode) across restarts.
//!
//! - [`MemoryStore`]: process-local map, for tests and ephemeral sessions
//! - [`FileStore`]: a single JSON object on disk, rewritten atomically on
//!   every mutation
//!
//! # Example
//!
//! ```rust,no_run
//! use sunohub_core::KeyValueStore;
//! use sunohub_storage::FileStore;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = FileStore::open("./data/player_state.json")?;
//! store.set("player_shuffle", "true")?;
//! assert_eq!(store.get("player_shuffle")?.as_deref(), Some("true"));
//! # Ok(())
//! # }
//! ```

mod error;
mod file;
mod memory;

pub use error::{Result, StorageError};
pub use file::FileStore;
pub use memory::MemoryStore;
