//! Play queue
//!
//! An ordered list of songs with a cursor. Songs are identified by
//! [`Song::queue_key`]; a key appears at most once.

use std::collections::HashSet;
use sunohub_core::Song;

/// User-curated queue with the current position
///
/// `position` is `None` when the queue is empty or nothing has been
/// selected yet, otherwise it is a valid index.
#[derive(Debug, Clone, Default)]
pub struct Queue {
    songs: Vec<Song>,
    position: Option<usize>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a queue from persisted songs, dropping repeated keys
    ///
    /// Returns the queue and the number of dropped entries.
    pub fn from_songs(songs: Vec<Song>) -> (Self, usize) {
        let total = songs.len();
        let mut seen = HashSet::new();
        let songs: Vec<Song> = songs
            .into_iter()
            .filter(|song| seen.insert(song.queue_key().to_string()))
            .collect();
        let dropped = total - songs.len();

        (
            Self {
                songs,
                position: None,
            },
            dropped,
        )
    }

    /// Whether a song with this key is queued
    pub fn contains(&self, key: &str) -> bool {
        self.songs.iter().any(|song| song.queue_key() == key)
    }

    /// Append a song; returns `false` if its key is already queued
    pub fn add(&mut self, song: Song) -> bool {
        if self.contains(song.queue_key()) {
            return false;
        }
        self.songs.push(song);
        true
    }

    /// Remove every song with this key
    ///
    /// The position is kept unless it fell off the end, in which case it
    /// moves to the last song (or `None` once empty). Returns whether
    /// anything was removed.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.songs.len();
        self.songs.retain(|song| song.queue_key() != key);

        if let Some(position) = self.position {
            if position >= self.songs.len() {
                self.position = self.songs.len().checked_sub(1);
            }
        }

        self.songs.len() != before
    }

    /// Remove everything
    pub fn clear(&mut self) {
        self.songs.clear();
        self.position = None;
    }

    /// Move the cursor; out-of-range indices are ignored
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.songs.len() {
            self.position = Some(index);
            true
        } else {
            false
        }
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn current(&self) -> Option<&Song> {
        self.position.and_then(|i| self.songs.get(i))
    }

    pub fn get(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}
