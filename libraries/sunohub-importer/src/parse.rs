//! Song page scraping
//!
//! Sources are tried in a fixed order, each one overriding what the
//! previous found: Open Graph tags, JSON-LD, an artist profile link,
//! streamed hydration chunks, and finally the legacy `__NEXT_DATA__`
//! blob. Every source is optional; a page with nothing but an id still
//! imports with default metadata.

use crate::error::{ImportError, Result};
use crate::text::{
    clean_artist_name, decode_html_entities, extract_uuid, normalize_lyrics, DEFAULT_ARTIST,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::LazyLock;
use sunohub_core::Song;
use tracing::{debug, warn};

/// Title used when none can be found
pub const DEFAULT_TITLE: &str = "Suno Song";

/// Category given to every import
pub const DEFAULT_CATEGORY: &str = "Pop";

static PAGE_URL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<link rel="canonical" href="([^"]+)"|<meta property="og:url" content="([^"]+)""#)
        .expect("page url pattern is valid")
});

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| og_pattern("title"));
static OG_IMAGE: LazyLock<Regex> = LazyLock::new(|| og_pattern("image"));
static OG_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| og_pattern("description"));

static JSON_LD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script type="application/ld\+json">(.*?)</script>"#)
        .expect("json-ld pattern is valid")
});

static HANDLE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<a[^>]+href="/@([^"]+)"[^>]*>(.*?)</a>"#).expect("handle pattern is valid")
});

static HYDRATION_CHUNK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)self\.__next_f\.push\(\[1,"(.*?)"\]\)"#).expect("hydration pattern is valid")
});

static CHUNK_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""title":"((?:[^"\\]|\\.)*)""#).expect("title pattern is valid")
});

static CHUNK_HANDLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""handle":"([^"]+)""#).expect("handle pattern is valid"));

static NEXT_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?s)<script id="__NEXT_DATA__" type="application/json">(.*?)</script>"#)
        .expect("next data pattern is valid")
});

static TITLE_SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\| Suno").expect("suffix pattern is valid"));

fn og_pattern(property: &str) -> Regex {
    Regex::new(&format!(
        r#"(?i)<meta property="og:{}" content="([^"]+)""#,
        property
    ))
    .expect("open graph pattern is valid")
}

/// Section tags that mark a chunk as lyrics
const LYRIC_TAGS: [&str; 5] = ["[Verse", "[Chorus", "[Intro", "[Outro", "[Instrumental"];

/// Metadata scraped from a song page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedSong {
    pub suno_id: String,
    pub title: String,
    pub artist: String,
    pub image_url: String,
    pub audio_url: String,
    pub lyrics: Option<String>,
    pub category: String,
}

impl ImportedSong {
    /// Unpublished song ready to queue or publish
    pub fn into_song(self) -> Song {
        let mut song = Song::new(self.suno_id, self.title, self.artist);
        song.image_url = self.image_url;
        song.audio_url = self.audio_url;
        song.lyrics = self.lyrics;
        song.category = Some(self.category);
        song
    }
}

/// Artwork URL on the public CDN
pub fn cdn_image_url(suno_id: &str) -> String {
    format!("https://cdn1.suno.ai/image_{}.png", suno_id)
}

/// Audio URL on the public CDN
pub fn cdn_audio_url(suno_id: &str) -> String {
    format!("https://cdn1.suno.ai/{}.mp3", suno_id)
}

/// Working values while sources are applied
struct Scraped {
    title: String,
    artist: String,
    image_url: String,
    lyrics: Option<String>,
}

/// Scrape a fetched song page.
///
/// `url` is the link the user pasted; its id wins over anything in the
/// page.
pub fn parse_song_page(url: &str, html: &str) -> Result<ImportedSong> {
    let html = decode_html_entities(html);

    let suno_id = find_song_id(url, &html).ok_or(ImportError::SongIdNotFound)?;

    let mut scraped = Scraped {
        title: DEFAULT_TITLE.to_string(),
        artist: DEFAULT_ARTIST.to_string(),
        image_url: cdn_image_url(&suno_id),
        lyrics: None,
    };

    apply_open_graph(&html, &mut scraped);
    apply_json_ld(&html, &mut scraped);
    apply_handle_link(&html, &mut scraped);
    apply_hydration_chunks(&html, &mut scraped);
    apply_next_data(&html, &mut scraped);

    let imported = ImportedSong {
        title: TITLE_SITE_SUFFIX
            .replace(&scraped.title, "")
            .trim()
            .to_string(),
        artist: clean_artist_name(&scraped.artist),
        image_url: scraped.image_url,
        audio_url: cdn_audio_url(&suno_id),
        lyrics: scraped.lyrics,
        category: DEFAULT_CATEGORY.to_string(),
        suno_id,
    };

    debug!(
        suno_id = %imported.suno_id,
        title = %imported.title,
        artist = %imported.artist,
        has_lyrics = imported.lyrics.is_some(),
        "Parsed song page"
    );
    Ok(imported)
}

/// The pasted URL, then the page's own URL tags, then the whole page
fn find_song_id(url: &str, html: &str) -> Option<String> {
    extract_uuid(url)
        .or_else(|| {
            PAGE_URL_TAG
                .find_iter(html)
                .find_map(|tag| extract_uuid(tag.as_str()))
        })
        .or_else(|| extract_uuid(html))
}

fn apply_open_graph(html: &str, scraped: &mut Scraped) {
    if let Some(caps) = OG_TITLE.captures(html) {
        let mut parts = caps[1].split(" by ");
        if let Some(title) = parts.next() {
            scraped.title = title.replace("歌名：", "").trim().to_string();
        }
        if let Some(artist) = parts.next() {
            scraped.artist = artist.trim().to_string();
        }
    }

    if let Some(caps) = OG_IMAGE.captures(html) {
        scraped.image_url = caps[1].to_string();
    }

    if scraped.lyrics.is_none() {
        if let Some(caps) = OG_DESCRIPTION.captures(html) {
            scraped.lyrics = normalize_lyrics(&caps[1]);
        }
    }
}

fn apply_json_ld(html: &str, scraped: &mut Scraped) {
    for caps in JSON_LD.captures_iter(html) {
        let json: Value = match serde_json::from_str(&caps[1]) {
            Ok(json) => json,
            Err(e) => {
                debug!(error = %e, "Skipping unparsable JSON-LD block");
                continue;
            }
        };

        if json["@type"] != "MusicRecording" {
            continue;
        }

        if let Some(name) = json["name"].as_str().filter(|s| !s.is_empty()) {
            scraped.title = name.to_string();
        }

        let by_artist = match &json["byArtist"] {
            Value::Array(artists) => artists.first().map(|a| &a["name"]),
            other => Some(&other["name"]),
        };
        if let Some(artist) = by_artist
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            scraped.artist = artist.to_string();
        }
    }
}

fn apply_handle_link(html: &str, scraped: &mut Scraped) {
    if !scraped.artist.is_empty() && scraped.artist != DEFAULT_ARTIST {
        return;
    }
    if let Some(caps) = HANDLE_LINK.captures(html) {
        scraped.artist = caps[2].trim().to_string();
    }
}

/// Streamed React Server Component payloads.
///
/// Title and handle come from the chunk that carries song metadata. Lyrics
/// are the highest-scoring free-text chunk: section tags and line breaks
/// count for, anything that looks like code counts heavily against.
fn apply_hydration_chunks(html: &str, scraped: &mut Scraped) {
    let chunks: Vec<String> = HYDRATION_CHUNK
        .captures_iter(html)
        .map(|caps| caps[1].replace("\\\"", "\"").replace("\\\\", "\\"))
        .collect();

    if chunks.is_empty() {
        return;
    }

    for chunk in &chunks {
        if !chunk.contains("\"is_public\":") {
            continue;
        }
        let Some(title) = CHUNK_TITLE.captures(chunk) else {
            continue;
        };

        let raw = &title[1];
        scraped.title = serde_json::from_str::<String>(&format!("\"{}\"", raw)).unwrap_or_else(|e| {
            warn!(error = %e, "Hydration title is not a valid JSON string");
            raw.to_string()
        });
        if let Some(handle) = CHUNK_HANDLE.captures(chunk) {
            scraped.artist = handle[1].to_string();
        }
    }

    let mut best: Option<(i32, String)> = None;
    for chunk in &chunks {
        if let Some(candidate) = score_lyric_chunk(chunk) {
            if best.as_ref().map_or(true, |(score, _)| candidate.0 > *score) {
                best = Some(candidate);
            }
        }
    }

    if let Some((score, lyrics)) = best {
        let lyrics = lyrics.trim();
        if !lyrics.is_empty() {
            debug!(score, "Lyrics found in hydration chunk");
            scraped.lyrics = Some(lyrics.to_string());
        }
    }
}

/// Score a chunk as lyrics; `None` when it should not be considered
fn score_lyric_chunk(chunk: &str) -> Option<(i32, String)> {
    if chunk.len() < 50 || (chunk.contains("{\"") && chunk.len() < 500) {
        return None;
    }

    let mut score: i32 = LYRIC_TAGS
        .iter()
        .filter(|tag| chunk.contains(*tag))
        .map(|_| 10)
        .sum();

    if chunk.matches("\\n").count() > 4 {
        score += 5;
    }

    let text = chunk
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(chunk)
        .replace("\\n", "\n");

    if text.contains("function") || text.contains("return") || text.contains("__next") {
        score -= 100;
    }

    (score > 0).then_some((score, text))
}

fn apply_next_data(html: &str, scraped: &mut Scraped) {
    let Some(caps) = NEXT_DATA.captures(html) else {
        return;
    };

    let data: Value = match serde_json::from_str(&caps[1]) {
        Ok(data) => data,
        Err(e) => {
            warn!(error = %e, "Unparsable __NEXT_DATA__ block");
            return;
        }
    };

    let props = &data["props"]["pageProps"];
    let clip = [
        &props["clip"],
        &props["song"],
        &props["initialState"]["songDetail"]["song"],
    ]
    .into_iter()
    .find(|clip| clip.is_object());

    let Some(clip) = clip else {
        return;
    };

    if let Some(title) = clip["title"].as_str().filter(|s| !s.is_empty()) {
        scraped.title = title.to_string();
    }

    if let Some(artist) = [&clip["display_name"], &clip["user"]["display_name"]]
        .into_iter()
        .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
    {
        scraped.artist = artist.to_string();
    }

    if let Some(lyrics) = clip["metadata"]["prompt"].as_str().and_then(normalize_lyrics) {
        scraped.lyrics = Some(lyrics);
    }
}
