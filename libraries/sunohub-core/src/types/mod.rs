//! Domain types for SunoHub

mod feed;
mod ids;
mod review;
mod song;

pub use feed::{AdjacentSongIds, SortFilter};
pub use ids::SongId;
pub use review::Review;
pub use song::Song;
