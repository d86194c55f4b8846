//! Shared fakes for controller tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use sunohub_core::{AdjacentSongIds, Catalog, KeyValueStore, Result, Song, SongId, SunoHubError};
use sunohub_playback::{Navigation, PlaybackController};
use sunohub_storage::MemoryStore;

/// Published song with id `id`
pub fn song(id: &str) -> Song {
    Song::new(format!("suno-{id}"), format!("Song {id}"), "Luna").with_id(SongId::new(id))
}

pub fn id(id: &str) -> SongId {
    SongId::new(id)
}

/// Catalog over a fixed list of ids, newest first
#[derive(Default)]
pub struct FakeCatalog {
    newest_first: Vec<SongId>,
    offline: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn new(newest_first: &[&str]) -> Self {
        Self {
            newest_first: newest_first.iter().map(|s| SongId::new(*s)).collect(),
            ..Self::default()
        }
    }

    pub fn offline() -> Self {
        Self {
            offline: true,
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn check(&self, call: String) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.offline {
            Err(SunoHubError::catalog("backend offline"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Catalog for FakeCatalog {
    async fn random_song_id(&self, exclude: Option<&SongId>) -> Result<Option<SongId>> {
        self.check(format!("random:{:?}", exclude))?;
        Ok(self
            .newest_first
            .iter()
            .find(|candidate| Some(*candidate) != exclude)
            .cloned())
    }

    async fn adjacent_song_ids(&self, id: &SongId) -> Result<AdjacentSongIds> {
        self.check(format!("adjacent:{}", id))?;
        let Some(index) = self.newest_first.iter().position(|s| s == id) else {
            return Ok(AdjacentSongIds::default());
        };

        Ok(AdjacentSongIds {
            older_id: self.newest_first.get(index + 1).cloned(),
            newer_id: index
                .checked_sub(1)
                .and_then(|i| self.newest_first.get(i))
                .cloned(),
            newest_id: self.newest_first.first().cloned(),
            oldest_id: self.newest_first.last().cloned(),
        })
    }
}

/// Store that reads fine but rejects every write
pub struct ReadOnlyStore;

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    fn set(&self, key: &str, _value: &str) -> Result<()> {
        Err(SunoHubError::storage(format!("read-only: {key}")))
    }

    fn remove(&self, key: &str) -> Result<()> {
        Err(SunoHubError::storage(format!("read-only: {key}")))
    }
}

/// Controller over an in-memory store and the given catalog
pub fn controller(catalog: FakeCatalog) -> PlaybackController {
    PlaybackController::restore(Box::new(MemoryStore::new()), Arc::new(catalog))
        .unwrap()
        .with_seed(7)
}

/// Controller with `ids` queued
pub fn controller_with_queue(ids: &[&str]) -> PlaybackController {
    let mut controller = controller(FakeCatalog::new(&[]));
    for id in ids {
        controller.add_to_queue(song(id)).unwrap();
    }
    controller
}

pub async fn next(
    controller: &mut PlaybackController,
    current: Option<&SongId>,
) -> Option<Navigation> {
    let mut navigation = None;
    controller
        .play_next(|nav| navigation = Some(nav), current)
        .await
        .unwrap();
    navigation
}

pub async fn prev(
    controller: &mut PlaybackController,
    current: Option<&SongId>,
) -> Option<Navigation> {
    let mut navigation = None;
    controller
        .play_prev(|nav| navigation = Some(nav), current)
        .await
        .unwrap();
    navigation
}
