//! Song feed and song management operations.

use crate::client::SupabaseClient;
use crate::error::{CatalogError, Result};
use crate::types::{NewSongRow, PlaysRow};
use crate::FEED_LIMIT;
use reqwest::Method;
use sunohub_core::{Song, SongId, SortFilter};
use tracing::{debug, info};

const SONGS: &str = "songs";

impl SupabaseClient {
    /// Fetch the shared feed.
    ///
    /// `Mine` with a user id restricts to that user's songs; otherwise a
    /// non-empty `artist_query` does a case-insensitive substring match on
    /// the artist. At most [`FEED_LIMIT`] songs are returned.
    pub async fn get_song_feed(
        &self,
        filter: SortFilter,
        artist_query: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Vec<Song>> {
        let mut params: Vec<(&str, String)> = vec![("select", "*".to_string())];

        match (filter, user_id, artist_query) {
            (SortFilter::Mine, Some(user), _) => params.push(("user_id", format!("eq.{}", user))),
            (_, _, Some(query)) if !query.trim().is_empty() => {
                params.push(("artist", format!("ilike.*{}*", query.trim())));
            }
            _ => {}
        }

        let order = match filter {
            SortFilter::Latest | SortFilter::Mine => "created_at.desc",
            SortFilter::Trending => "plays_count.desc",
            SortFilter::TopRated => "average_rating.desc",
        };
        params.push(("order", order.to_string()));
        params.push(("limit", FEED_LIMIT.to_string()));

        let request = self.table(Method::GET, SONGS).await.query(&params);
        let songs: Vec<Song> = self.fetch(request, "song feed").await?;

        debug!(filter = %filter, songs = songs.len(), "Fetched feed");
        Ok(songs)
    }

    /// Fetch one song, `None` if it does not exist.
    pub async fn get_song_by_id(&self, id: &SongId) -> Result<Option<Song>> {
        let request = self
            .table(Method::GET, SONGS)
            .await
            .query(&[("select", "*".to_string()), ("id", format!("eq.{}", id))]);

        let mut songs: Vec<Song> = self.fetch(request, "song").await?;
        Ok(if songs.is_empty() {
            None
        } else {
            Some(songs.swap_remove(0))
        })
    }

    /// Fetch a song by its third-party id, `None` if not yet published.
    pub async fn get_song_by_suno_id(&self, suno_id: &str) -> Result<Option<Song>> {
        let request = self.table(Method::GET, SONGS).await.query(&[
            ("select", "*".to_string()),
            ("suno_id", format!("eq.{}", suno_id)),
            ("limit", "1".to_string()),
        ]);

        let mut songs: Vec<Song> = self.fetch(request, "song").await?;
        Ok(if songs.is_empty() {
            None
        } else {
            Some(songs.swap_remove(0))
        })
    }

    /// Bump a song's play counter by one.
    ///
    /// Read-then-write; concurrent plays may be lost. Missing songs are
    /// ignored.
    pub async fn increment_plays(&self, id: &SongId) -> Result<()> {
        let request = self.table(Method::GET, SONGS).await.query(&[
            ("select", "plays_count".to_string()),
            ("id", format!("eq.{}", id)),
        ]);
        let rows: Vec<PlaysRow> = self.fetch(request, "play count").await?;

        let Some(row) = rows.first() else {
            debug!(song_id = %id, "Play count target missing");
            return Ok(());
        };

        let next = row.plays_count.unwrap_or(0) + 1;
        let request = self
            .table(Method::PATCH, SONGS)
            .await
            .query(&[("id", format!("eq.{}", id))])
            .json(&serde_json::json!({ "plays_count": next }));
        self.send(request).await?;

        debug!(song_id = %id, plays = next, "Play counted");
        Ok(())
    }

    /// Publish a song to the shared feed.
    ///
    /// If a song with the same third-party id already exists, that row is
    /// returned unchanged and nothing is inserted.
    pub async fn publish_song(&self, song: &Song, user_id: &str) -> Result<Song> {
        if let Some(existing) = self.get_song_by_suno_id(&song.suno_id).await? {
            info!(suno_id = %song.suno_id, "Song already published");
            return Ok(existing);
        }

        let row = NewSongRow {
            suno_id: &song.suno_id,
            title: &song.title,
            artist: &song.artist,
            image_url: &song.image_url,
            audio_url: &song.audio_url,
            duration: song.duration,
            tags: &song.tags,
            category: song.category.as_deref(),
            lyrics: song.lyrics.as_deref(),
            user_id,
        };

        let request = self
            .table(Method::POST, SONGS)
            .await
            .header("Prefer", "return=representation")
            .json(&row);

        let mut inserted: Vec<Song> = self.fetch(request, "published song").await?;
        if inserted.is_empty() {
            return Err(CatalogError::ParseError(
                "insert returned no rows".to_string(),
            ));
        }

        let published = inserted.swap_remove(0);
        info!(
            song_id = ?published.id,
            suno_id = %published.suno_id,
            title = %published.title,
            "Song published"
        );
        Ok(published)
    }

    /// Delete one song.
    pub async fn delete_song(&self, id: &SongId) -> Result<()> {
        let request = self
            .table(Method::DELETE, SONGS)
            .await
            .query(&[("id", format!("eq.{}", id))]);
        self.send(request).await?;

        info!(song_id = %id, "Song deleted");
        Ok(())
    }

    /// Delete several songs at once; an empty list is a no-op.
    pub async fn delete_songs(&self, ids: &[SongId]) -> Result<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let list = ids
            .iter()
            .map(SongId::as_str)
            .collect::<Vec<_>>()
            .join(",");
        let request = self
            .table(Method::DELETE, SONGS)
            .await
            .query(&[("id", format!("in.({})", list))]);
        self.send(request).await?;

        info!(count = ids.len(), "Songs deleted");
        Ok(())
    }

    /// Replace a song's lyrics (plain or LRC).
    pub async fn update_song_lyrics(&self, id: &SongId, lyrics: &str) -> Result<()> {
        let request = self
            .table(Method::PATCH, SONGS)
            .await
            .query(&[("id", format!("eq.{}", id))])
            .json(&serde_json::json!({ "lyrics": lyrics }));
        self.send(request).await?;

        debug!(song_id = %id, "Lyrics updated");
        Ok(())
    }

    /// Rename an artist across every song; returns the number of rows changed.
    pub async fn bulk_update_artist_name(&self, target: &str, replacement: &str) -> Result<usize> {
        if target.is_empty() {
            return Err(CatalogError::InvalidInput(
                "target artist cannot be empty".to_string(),
            ));
        }

        let request = self
            .table(Method::PATCH, SONGS)
            .await
            .query(&[("artist", format!("eq.{}", target))])
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({ "artist": replacement }));

        let updated: Vec<Song> = self.fetch(request, "updated songs").await?;

        info!(from = %target, to = %replacement, count = updated.len(), "Artist renamed");
        Ok(updated.len())
    }
}
