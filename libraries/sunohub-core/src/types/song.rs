/// Song domain type
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A published (or about to be published) song
///
/// Mirrors a row of the backend `songs` table. The same JSON shape is
/// persisted for the playback queue, so every optional field is skipped
/// when absent and tolerated when missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    /// Backend identifier (absent until published)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<SongId>,

    /// Identifier on the third-party service the song was imported from
    pub suno_id: String,

    /// Song title
    pub title: String,

    /// Artist display name
    pub artist: String,

    /// Artwork URL
    #[serde(default)]
    pub image_url: String,

    /// Audio URL
    #[serde(default)]
    pub audio_url: String,

    /// Duration in seconds (0 when unknown)
    #[serde(default)]
    pub duration: u32,

    /// Free-form tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Main genre category (e.g. Pop, Rock, Electronic)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    /// Plain or LRC-timestamped lyrics
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lyrics: Option<String>,

    /// Play counter
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plays_count: Option<u64>,

    /// Mean review rating (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,

    /// Number of reviews
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_reviews: Option<u64>,

    /// Creation time on the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// Owner (backend auth user id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl Song {
    /// Create an unpublished song with minimal metadata
    pub fn new(
        suno_id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            suno_id: suno_id.into(),
            title: title.into(),
            artist: artist.into(),
            image_url: String::new(),
            audio_url: String::new(),
            duration: 0,
            tags: Vec::new(),
            category: None,
            lyrics: None,
            plays_count: None,
            average_rating: None,
            total_reviews: None,
            created_at: None,
            user_id: None,
        }
    }

    /// Set the backend id
    #[must_use]
    pub fn with_id(mut self, id: SongId) -> Self {
        self.id = Some(id);
        self
    }

    /// Identity used for queue de-duplication
    ///
    /// The backend id when published, the third-party id otherwise.
    pub fn queue_key(&self) -> &str {
        self.id.as_ref().map_or(self.suno_id.as_str(), SongId::as_str)
    }

    /// Whether the song has been published to the backend
    pub fn is_published(&self) -> bool {
        self.id.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_key_prefers_backend_id() {
        let song = Song::new("suno-1", "Title", "Artist");
        assert_eq!(song.queue_key(), "suno-1");
        assert!(!song.is_published());

        let song = song.with_id(SongId::new("row-9"));
        assert_eq!(song.queue_key(), "row-9");
        assert!(song.is_published());
    }

    #[test]
    fn deserializes_backend_row() {
        let json = serde_json::json!({
            "id": "abc",
            "suno_id": "suno-1",
            "title": "Night Drive",
            "artist": "Luna",
            "image_url": "https://cdn.example/img.png",
            "audio_url": "https://cdn.example/a.mp3",
            "duration": 181,
            "tags": ["synthwave"],
            "category": "Electronic",
            "plays_count": 12,
            "average_rating": 4.5,
            "total_reviews": 2,
            "created_at": "2024-05-01T10:00:00.123456+00:00",
            "user_id": "user-1"
        });

        let song: Song = serde_json::from_value(json).unwrap();
        assert_eq!(song.id, Some(SongId::new("abc")));
        assert_eq!(song.duration, 181);
        assert_eq!(song.plays_count, Some(12));
        assert!(song.created_at.is_some());
        assert!(song.lyrics.is_none());
    }

    #[test]
    fn unpublished_song_omits_optional_fields() {
        let song = Song::new("suno-1", "Title", "Artist");
        let value = serde_json::to_value(&song).unwrap();
        let object = value.as_object().unwrap();

        assert!(!object.contains_key("id"));
        assert!(!object.contains_key("created_at"));
        assert!(!object.contains_key("tags"));
        assert_eq!(object["suno_id"], "suno-1");
    }
}
