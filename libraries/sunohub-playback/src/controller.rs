//! Playback queue controller
//!
//! Owns the queue, the position, and the shuffle and repeat modes, and
//! decides where playback goes on "next" and "previous". With an empty
//! queue it roams the whole catalog instead.

use crate::error::Result;
use crate::queue::Queue;
use crate::shuffle::pick_next_index;
use crate::state;
use crate::types::{Navigation, RepeatMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use sunohub_core::{Catalog, KeyValueStore, Song, SongId};
use tracing::{debug, info};

/// Queue and navigation state for one listening session
///
/// Every change to the queue, shuffle flag, or repeat mode is written to
/// the store before the method returns. Navigation is reported through a
/// callback; the controller never loads audio itself.
pub struct PlaybackController {
    store: Box<dyn KeyValueStore>,
    catalog: Arc<dyn Catalog>,
    queue: Queue,
    shuffle: bool,
    repeat: RepeatMode,
    /// Completed replays in `OneCustom` mode
    play_count: u32,
    rng: StdRng,
}

impl PlaybackController {
    /// Create a controller, rehydrating persisted state from `store`
    pub fn restore(store: Box<dyn KeyValueStore>, catalog: Arc<dyn Catalog>) -> Result<Self> {
        let restored = state::restore(store.as_ref())?;

        info!(
            songs = restored.queue.len(),
            shuffle = restored.shuffle,
            repeat = %restored.repeat,
            "Playback controller ready"
        );

        Ok(Self {
            store,
            catalog,
            queue: restored.queue,
            shuffle: restored.shuffle,
            repeat: restored.repeat,
            play_count: 0,
            rng: StdRng::from_entropy(),
        })
    }

    /// Use a deterministic shuffle sequence
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Resume a `OneCustom` replay count kept by the caller
    ///
    /// The counter itself is never persisted; callers that outlive a
    /// single controller hand back what [`play_count`](Self::play_count)
    /// reported last time.
    #[must_use]
    pub fn with_play_count(mut self, play_count: u32) -> Self {
        self.play_count = play_count;
        self
    }

    // ===== Queue Management =====

    /// Append a song unless it is already queued
    ///
    /// Returns whether the song was added.
    pub fn add_to_queue(&mut self, song: Song) -> Result<bool> {
        let key = song.queue_key().to_string();
        if !self.queue.add(song) {
            debug!(song = %key, "Already queued");
            return Ok(false);
        }

        state::save_queue(self.store.as_ref(), self.queue.songs())?;
        debug!(song = %key, len = self.queue.len(), "Queued");
        Ok(true)
    }

    /// Remove every entry with this id
    ///
    /// Returns whether anything was removed.
    pub fn remove_from_queue(&mut self, id: &str) -> Result<bool> {
        if !self.queue.remove(id) {
            return Ok(false);
        }

        state::save_queue(self.store.as_ref(), self.queue.songs())?;
        debug!(song = %id, len = self.queue.len(), position = ?self.queue.position(), "Unqueued");
        Ok(true)
    }

    /// Empty the queue
    pub fn clear_queue(&mut self) -> Result<()> {
        self.queue.clear();
        state::save_queue(self.store.as_ref(), self.queue.songs())?;
        debug!("Queue cleared");
        Ok(())
    }

    /// Jump to a queue entry; out-of-range indices are ignored
    ///
    /// Only moves the cursor. The caller starts playback of the selected
    /// song.
    pub fn play_from_queue(&mut self, index: usize) -> bool {
        self.queue.select(index)
    }

    // ===== Modes =====

    /// Flip shuffle; returns the new value
    pub fn toggle_shuffle(&mut self) -> Result<bool> {
        self.shuffle = !self.shuffle;
        state::save_shuffle(self.store.as_ref(), self.shuffle)?;
        info!(shuffle = self.shuffle, "Shuffle toggled");
        Ok(self.shuffle)
    }

    /// Move to the next repeat mode; returns it
    ///
    /// Always resets the play counter.
    pub fn toggle_repeat(&mut self) -> Result<RepeatMode> {
        self.repeat = self.repeat.next();
        self.play_count = 0;
        state::save_repeat(self.store.as_ref(), self.repeat)?;
        info!(repeat = %self.repeat, "Repeat toggled");
        Ok(self.repeat)
    }

    pub fn increment_play_count(&mut self) {
        self.play_count = self.play_count.saturating_add(1);
    }

    pub fn reset_play_count(&mut self) {
        self.play_count = 0;
    }

    // ===== Accessors =====

    pub fn queue(&self) -> &[Song] {
        self.queue.songs()
    }

    pub fn position(&self) -> Option<usize> {
        self.queue.position()
    }

    pub fn current_song(&self) -> Option<&Song> {
        self.queue.current()
    }

    pub fn is_shuffle(&self) -> bool {
        self.shuffle
    }

    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat
    }

    pub fn play_count(&self) -> u32 {
        self.play_count
    }

    // ===== Navigation =====

    /// Advance playback.
    ///
    /// `current` is the song playing right now; it anchors catalog roaming
    /// when the queue is empty. `navigate` is called at most once, and not
    /// at all when there is nowhere to go (end of queue with repeat off,
    /// empty catalog, no anchor).
    pub async fn play_next<F>(&mut self, navigate: F, current: Option<&SongId>) -> Result<()>
    where
        F: FnOnce(Navigation),
    {
        if self.queue.is_empty() {
            return self.roam_older(navigate, current).await;
        }

        let position = self.queue.position();

        match self.repeat {
            RepeatMode::One => {
                if let Some(index) = position {
                    debug!(index, "Repeat one");
                    self.navigate_to(navigate, index, true);
                    return Ok(());
                }
            }
            RepeatMode::OneCustom => {
                if self.play_count < 1 {
                    self.increment_play_count();
                    debug!(index = ?position, "Repeat once more");
                    if let Some(index) = position {
                        self.navigate_to(navigate, index, true);
                    }
                    return Ok(());
                }
                self.play_count = 0;
            }
            RepeatMode::Off | RepeatMode::All => {}
        }

        let len = self.queue.len();
        let next = if self.shuffle {
            pick_next_index(&mut self.rng, len, position)
        } else {
            match position {
                Some(index) if index + 1 < len => Some(index + 1),
                None => Some(0),
                Some(_) if self.repeat == RepeatMode::All => Some(0),
                Some(_) => None,
            }
        };

        let Some(index) = next else {
            debug!("End of queue");
            return Ok(());
        };

        self.queue.select(index);
        debug!(index, shuffle = self.shuffle, "Next in queue");
        self.navigate_to(navigate, index, position == Some(index));
        Ok(())
    }

    /// Go back.
    ///
    /// Repeat modes do not apply. With an empty queue this roams toward
    /// newer songs in the catalog.
    pub async fn play_prev<F>(&mut self, navigate: F, current: Option<&SongId>) -> Result<()>
    where
        F: FnOnce(Navigation),
    {
        if self.queue.is_empty() {
            return self.roam_newer(navigate, current).await;
        }

        let position = self.queue.position();
        let index = match position {
            Some(index) if index > 0 => index - 1,
            _ => self.queue.len() - 1,
        };

        self.queue.select(index);
        debug!(index, "Previous in queue");
        self.navigate_to(navigate, index, position == Some(index));
        Ok(())
    }

    /// Forward roam: a random song under shuffle, else the next older song,
    /// wrapping to the newest.
    async fn roam_older<F>(&self, navigate: F, current: Option<&SongId>) -> Result<()>
    where
        F: FnOnce(Navigation),
    {
        let Some(current) = current else {
            debug!("Nothing to roam from");
            return Ok(());
        };

        let target = if self.shuffle {
            self.catalog.random_song_id(Some(current)).await?
        } else {
            let adjacent = self.catalog.adjacent_song_ids(current).await?;
            adjacent.older_id.or(adjacent.newest_id)
        };

        Self::roam_to(navigate, current, target);
        Ok(())
    }

    /// Backward roam: the next newer song, wrapping to the oldest.
    async fn roam_newer<F>(&self, navigate: F, current: Option<&SongId>) -> Result<()>
    where
        F: FnOnce(Navigation),
    {
        let Some(current) = current else {
            debug!("Nothing to roam from");
            return Ok(());
        };

        let adjacent = self.catalog.adjacent_song_ids(current).await?;
        Self::roam_to(navigate, current, adjacent.newer_id.or(adjacent.oldest_id));
        Ok(())
    }

    fn roam_to<F>(navigate: F, current: &SongId, target: Option<SongId>)
    where
        F: FnOnce(Navigation),
    {
        match target {
            Some(id) => {
                debug!(from = %current, to = %id, "Roaming");
                let restart = id == *current;
                navigate(Navigation { song_id: id, restart });
            }
            None => debug!(from = %current, "Catalog has nowhere to go"),
        }
    }

    /// Report a queue entry to the caller; unpublished songs have no id to
    /// navigate to and are skipped.
    fn navigate_to<F>(&self, navigate: F, index: usize, restart: bool)
    where
        F: FnOnce(Navigation),
    {
        match self.queue.get(index).and_then(|song| song.id.clone()) {
            Some(song_id) => navigate(Navigation { song_id, restart }),
            None => debug!(index, "Queue entry is unpublished, not navigating"),
        }
    }
}

impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("queue", &self.queue)
            .field("shuffle", &self.shuffle)
            .field("repeat", &self.repeat)
            .field("play_count", &self.play_count)
            .finish_non_exhaustive()
    }
}
