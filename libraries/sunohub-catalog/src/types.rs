//! Types for backend requests and responses.

use serde::{Deserialize, Serialize};
use sunohub_core::SongId;

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Project base URL (e.g., "https://project.supabase.co")
    pub url: String,
    /// Public (anon) API key, sent with every request
    pub anon_key: String,
    /// Signed-in user's access token (if authenticated)
    pub access_token: Option<String>,
}

impl BackendConfig {
    /// Create a new anonymous config.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            access_token: None,
        }
    }

    /// Create a config for a signed-in user.
    pub fn with_access_token(
        url: impl Into<String>,
        anon_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            access_token: Some(access_token.into()),
        }
    }
}

/// Row carrying only an id.
#[derive(Debug, Deserialize)]
pub(crate) struct IdRow {
    pub id: SongId,
}

/// Row carrying only a creation timestamp, kept verbatim for re-use in filters.
#[derive(Debug, Deserialize)]
pub(crate) struct CreatedAtRow {
    pub created_at: String,
}

/// Row carrying only a play counter.
#[derive(Debug, Deserialize)]
pub(crate) struct PlaysRow {
    #[serde(default)]
    pub plays_count: Option<u64>,
}

/// Insert payload for a new song row.
#[derive(Debug, Serialize)]
pub(crate) struct NewSongRow<'a> {
    pub suno_id: &'a str,
    pub title: &'a str,
    pub artist: &'a str,
    pub image_url: &'a str,
    pub audio_url: &'a str,
    pub duration: u32,
    pub tags: &'a [String],
    pub category: Option<&'a str>,
    pub lyrics: Option<&'a str>,
    pub user_id: &'a str,
}

/// Upsert payload for a review.
#[derive(Debug, Serialize)]
pub(crate) struct ReviewUpsert<'a> {
    pub song_id: &'a str,
    pub user_id: &'a str,
    pub user_email: Option<&'a str>,
    pub rating: u8,
    pub comment: Option<&'a str>,
}
