/// Ports consumed by the playback controller
use crate::error::Result;
use crate::types::{AdjacentSongIds, SongId};
use async_trait::async_trait;

/// Persistent string key/value store
///
/// Holds player state that must survive a restart (queue, shuffle flag,
/// repeat mode). Writes are synchronous: when `set` returns `Ok`, the value
/// has been handed to durable storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    ///
    /// Returns `Ok(None)` if the key has never been written.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value (no-op if absent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Catalog queries used for roaming when the queue is empty
///
/// Implementations query the hosted backend. Absence of a result is not an
/// error; failures of the backend itself are.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Pick a pseudo-random existing song id, optionally excluding one
    ///
    /// Returns `Ok(None)` if nothing is left after exclusion.
    async fn random_song_id(&self, exclude: Option<&SongId>) -> Result<Option<SongId>>;

    /// Look up the songs around `id` by creation time
    ///
    /// Returns all-`None` if the reference song does not exist.
    async fn adjacent_song_ids(&self, id: &SongId) -> Result<AdjacentSongIds>;
}

/// Shared handles delegate to the store they point at
impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}
