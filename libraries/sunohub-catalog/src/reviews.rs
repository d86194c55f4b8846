//! Song reviews.

use crate::client::SupabaseClient;
use crate::error::{CatalogError, Result};
use crate::types::ReviewUpsert;
use reqwest::Method;
use sunohub_core::{Review, SongId};
use tracing::debug;

const REVIEWS: &str = "reviews";

impl SupabaseClient {
    /// Reviews of a song, newest first.
    pub async fn get_reviews(&self, song_id: &SongId) -> Result<Vec<Review>> {
        let request = self.table(Method::GET, REVIEWS).await.query(&[
            ("select", "*".to_string()),
            ("song_id", format!("eq.{}", song_id)),
            ("order", "created_at.desc".to_string()),
        ]);

        let reviews: Vec<Review> = self.fetch(request, "reviews").await?;
        debug!(song_id = %song_id, reviews = reviews.len(), "Fetched reviews");
        Ok(reviews)
    }

    /// Create or replace the user's review of a song.
    ///
    /// One review per (song, user); a second submission overwrites the first.
    pub async fn submit_review(
        &self,
        song_id: &SongId,
        user_id: &str,
        user_email: Option<&str>,
        rating: u8,
        comment: Option<&str>,
    ) -> Result<()> {
        if !Review::is_valid_rating(rating) {
            return Err(CatalogError::InvalidInput(format!(
                "rating must be between {} and {}, got {}",
                Review::MIN_RATING,
                Review::MAX_RATING,
                rating
            )));
        }

        let body = ReviewUpsert {
            song_id: song_id.as_str(),
            user_id,
            user_email,
            rating,
            comment,
        };

        let request = self
            .table(Method::POST, REVIEWS)
            .await
            .query(&[("on_conflict", "song_id,user_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body);
        self.send(request).await?;

        debug!(song_id = %song_id, rating, "Review submitted");
        Ok(())
    }

    /// Delete a review.
    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        let request = self
            .table(Method::DELETE, REVIEWS)
            .await
            .query(&[("id", format!("eq.{}", review_id))]);
        self.send(request).await?;
        Ok(())
    }
}
