//! Song page fetching

use crate::error::{ImportError, Result};
use crate::parse::{parse_song_page, ImportedSong};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

/// Page fetch timeout
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches and scrapes third-party song pages
#[derive(Clone)]
pub struct Importer {
    http: Client,
}

impl Importer {
    /// Create a new importer
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .timeout(FETCH_TIMEOUT)
            .user_agent(format!("SunoHub/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Fetch a song page and scrape it.
    ///
    /// A `t=<millis>` parameter is appended so caches between us and the
    /// page never serve stale metadata.
    pub async fn fetch_song(&self, link: &str) -> Result<ImportedSong> {
        let target = cache_busted(link)?;
        debug!(url = %target, "Fetching song page");

        let response = self.http.get(target).send().await.map_err(|e| {
            if e.is_timeout() {
                ImportError::Timeout
            } else {
                ImportError::Request(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::Http(status.as_u16()));
        }

        let html = response.text().await?;
        let song = parse_song_page(link, &html)?;

        info!(suno_id = %song.suno_id, title = %song.title, artist = %song.artist, "Song imported");
        Ok(song)
    }
}

fn cache_busted(link: &str) -> Result<url::Url> {
    let mut url = url::Url::parse(link.trim()).map_err(|e| ImportError::InvalidUrl(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ImportError::InvalidUrl(format!(
            "unsupported scheme: {}",
            url.scheme()
        )));
    }

    url.query_pairs_mut()
        .append_pair("t", &chrono::Utc::now().timestamp_millis().to_string());
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_buster_appended() {
        let url = cache_busted("https://suno.com/song/abc").unwrap();
        assert!(url.query().unwrap().starts_with("t="));

        let url = cache_busted("https://suno.com/song/abc?sh=xyz").unwrap();
        let keys: Vec<String> = url.query_pairs().map(|(k, _)| k.into_owned()).collect();
        assert_eq!(keys, vec!["sh", "t"]);
    }

    #[test]
    fn test_rejects_non_http_links() {
        assert!(matches!(
            cache_busted("ftp://suno.com/song/abc"),
            Err(ImportError::InvalidUrl(_))
        ));
        assert!(matches!(
            cache_busted("not a link"),
            Err(ImportError::InvalidUrl(_))
        ));
    }
}
