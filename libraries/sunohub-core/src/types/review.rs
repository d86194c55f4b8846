/// Review domain type
use crate::types::SongId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's rating of a song
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review identifier
    pub id: String,

    /// Reviewed song
    pub song_id: SongId,

    /// Author (backend auth user id)
    pub user_id: String,

    /// Author email, if shared
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_email: Option<String>,

    /// Rating from 1 to 5
    pub rating: u8,

    /// Optional comment
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    /// When the review was written
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Lowest accepted rating
    pub const MIN_RATING: u8 = 1;

    /// Highest accepted rating
    pub const MAX_RATING: u8 = 5;

    /// Check that a rating is within 1..=5
    pub fn is_valid_rating(rating: u8) -> bool {
        (Self::MIN_RATING..=Self::MAX_RATING).contains(&rating)
    }
}
