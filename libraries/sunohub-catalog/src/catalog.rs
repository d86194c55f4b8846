//! Catalog navigation queries used for queue roaming.

use crate::client::SupabaseClient;
use crate::error::Result;
use crate::types::{CreatedAtRow, IdRow};
use crate::RANDOM_CANDIDATES;
use async_trait::async_trait;
use rand::seq::SliceRandom;
use reqwest::Method;
use sunohub_core::{AdjacentSongIds, Catalog, SongId};
use tracing::debug;

const SONGS: &str = "songs";

impl SupabaseClient {
    /// Pick a random song id among the first [`RANDOM_CANDIDATES`] rows.
    pub async fn random_song_id(&self, exclude: Option<&SongId>) -> Result<Option<SongId>> {
        let mut params = vec![
            ("select", "id".to_string()),
            ("limit", RANDOM_CANDIDATES.to_string()),
        ];
        if let Some(exclude) = exclude {
            params.push(("id", format!("neq.{}", exclude)));
        }

        let request = self.table(Method::GET, SONGS).await.query(&params);
        let rows: Vec<IdRow> = self.fetch(request, "song ids").await?;

        let picked = rows
            .choose(&mut rand::thread_rng())
            .map(|row| row.id.clone());

        debug!(candidates = rows.len(), picked = ?picked, "Random song");
        Ok(picked)
    }

    /// Songs around `id` by creation time.
    ///
    /// If the reference song is gone, every field is `None`.
    pub async fn adjacent_song_ids(&self, id: &SongId) -> Result<AdjacentSongIds> {
        let request = self.table(Method::GET, SONGS).await.query(&[
            ("select", "created_at".to_string()),
            ("id", format!("eq.{}", id)),
        ]);
        let rows: Vec<CreatedAtRow> = self.fetch(request, "song timestamp").await?;

        let Some(reference) = rows.first() else {
            debug!(song_id = %id, "Reference song missing");
            return Ok(AdjacentSongIds::default());
        };
        let created_at = reference.created_at.as_str();

        let (older_id, newer_id, newest_id, oldest_id) = tokio::try_join!(
            self.first_id(Some(format!("lt.{}", created_at)), "created_at.desc"),
            self.first_id(Some(format!("gt.{}", created_at)), "created_at.asc"),
            self.first_id(None, "created_at.desc"),
            self.first_id(None, "created_at.asc"),
        )?;

        let adjacent = AdjacentSongIds {
            older_id,
            newer_id,
            newest_id,
            oldest_id,
        };
        debug!(song_id = %id, adjacent = ?adjacent, "Adjacent songs");
        Ok(adjacent)
    }

    async fn first_id(&self, created_at: Option<String>, order: &str) -> Result<Option<SongId>> {
        let mut params = vec![("select", "id".to_string())];
        if let Some(filter) = created_at {
            params.push(("created_at", filter));
        }
        params.push(("order", order.to_string()));
        params.push(("limit", "1".to_string()));

        let request = self.table(Method::GET, SONGS).await.query(&params);
        let rows: Vec<IdRow> = self.fetch(request, "song id").await?;
        Ok(rows.into_iter().next().map(|row| row.id))
    }
}

#[async_trait]
impl Catalog for SupabaseClient {
    async fn random_song_id(&self, exclude: Option<&SongId>) -> sunohub_core::Result<Option<SongId>> {
        Ok(SupabaseClient::random_song_id(self, exclude).await?)
    }

    async fn adjacent_song_ids(&self, id: &SongId) -> sunohub_core::Result<AdjacentSongIds> {
        Ok(SupabaseClient::adjacent_song_ids(self, id).await?)
    }
}
