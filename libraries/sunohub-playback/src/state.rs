//! Persisted player state
//!
//! The queue, shuffle flag, and repeat mode survive restarts. The
//! position and the custom-repeat counter do not.

use crate::error::Result;
use crate::queue::Queue;
use crate::types::RepeatMode;
use sunohub_core::{KeyValueStore, Song};
use tracing::{debug, warn};

/// Queue, as a JSON array of songs
pub const KEY_QUEUE: &str = "player_queue";

/// Shuffle flag, `"true"` or `"false"`
pub const KEY_SHUFFLE: &str = "player_shuffle";

/// Repeat mode, one of `off`, `all`, `one`, `one_custom`
pub const KEY_REPEAT: &str = "player_repeat";

/// State rehydrated at startup
#[derive(Debug)]
pub(crate) struct Restored {
    pub queue: Queue,
    pub shuffle: bool,
    pub repeat: RepeatMode,
}

/// Read everything back, falling back to defaults for missing or bad values
pub(crate) fn restore(store: &dyn KeyValueStore) -> Result<Restored> {
    let queue = match store.get(KEY_QUEUE)? {
        Some(raw) => match serde_json::from_str::<Vec<Song>>(&raw) {
            Ok(songs) => {
                let (queue, dropped) = Queue::from_songs(songs);
                if dropped > 0 {
                    warn!(dropped, "Dropped duplicate songs from persisted queue");
                }
                queue
            }
            Err(e) => {
                warn!(error = %e, "Persisted queue is malformed, starting empty");
                Queue::new()
            }
        },
        None => Queue::new(),
    };

    let shuffle = store.get(KEY_SHUFFLE)?.as_deref() == Some("true");

    let repeat = match store.get(KEY_REPEAT)? {
        Some(raw) => raw.parse::<RepeatMode>().unwrap_or_else(|e| {
            warn!(error = %e, "Unknown persisted repeat mode, using off");
            RepeatMode::Off
        }),
        None => RepeatMode::Off,
    };

    debug!(songs = queue.len(), shuffle, repeat = %repeat, "Player state restored");
    Ok(Restored {
        queue,
        shuffle,
        repeat,
    })
}

pub(crate) fn save_queue(store: &dyn KeyValueStore, songs: &[Song]) -> Result<()> {
    let encoded = serde_json::to_string(songs)?;
    store.set(KEY_QUEUE, &encoded)?;
    Ok(())
}

pub(crate) fn save_shuffle(store: &dyn KeyValueStore, shuffle: bool) -> Result<()> {
    store.set(KEY_SHUFFLE, if shuffle { "true" } else { "false" })?;
    Ok(())
}

pub(crate) fn save_repeat(store: &dyn KeyValueStore, repeat: RepeatMode) -> Result<()> {
    store.set(KEY_REPEAT, repeat.as_str())?;
    Ok(())
}
