/// Feed and catalog navigation types
use crate::types::SongId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering/filtering of the shared song feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortFilter {
    /// Newest first
    #[default]
    Latest,

    /// Most played first
    Trending,

    /// Highest average rating first
    TopRated,

    /// The current user's songs, newest first
    Mine,
}

impl SortFilter {
    /// Wire name of the filter
    pub fn as_str(self) -> &'static str {
        match self {
            SortFilter::Latest => "latest",
            SortFilter::Trending => "trending",
            SortFilter::TopRated => "top_rated",
            SortFilter::Mine => "mine",
        }
    }
}

impl fmt::Display for SortFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "latest" => Ok(SortFilter::Latest),
            "trending" => Ok(SortFilter::Trending),
            "top_rated" => Ok(SortFilter::TopRated),
            "mine" => Ok(SortFilter::Mine),
            other => Err(format!("unknown sort filter: {other}")),
        }
    }
}

/// Songs adjacent to a reference song by creation time
///
/// Any field may be absent: the reference may already be the oldest or
/// newest song, it may have been deleted, or the catalog may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjacentSongIds {
    /// Song created just before the reference
    pub older_id: Option<SongId>,

    /// Song created just after the reference
    pub newer_id: Option<SongId>,

    /// Most recently created song overall (top of the feed)
    pub newest_id: Option<SongId>,

    /// Least recently created song overall (bottom of the feed)
    pub oldest_id: Option<SongId>,
}
