//! Text cleanup helpers for scraped values

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Artist used when none can be found
pub const DEFAULT_ARTIST: &str = "Suno AI";

static NEAR_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:song|suno\.ai|image|audio)[^a-z0-9]*([a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12})",
    )
    .expect("uuid pattern is valid")
});

static ANY_UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}")
        .expect("uuid pattern is valid")
});

static DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[🦁🎸🎤🎹✨🔥🌟🌈💎]").expect("emoji pattern is valid"));

static ARTIST_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:@|by\s+)").expect("prefix pattern is valid"));

static SITE_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*\|\s*Suno$").expect("suffix pattern is valid"));

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("newline pattern is valid"));

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:#(\d+)|#[xX]([0-9a-fA-F]+)|([a-zA-Z]+));").expect("entity pattern is valid")
});

/// Markers where embedded JSON starts trailing the actual lyrics
const JSON_MARKERS: [&str; 2] = ["\",\"type\":\"gen\"", "\"]})self.__next_f.push"];

/// Find a song UUID in a URL or a page.
///
/// A UUID right after `song`, `suno.ai`, `image`, or `audio` wins over
/// one found anywhere else.
pub fn extract_uuid(text: &str) -> Option<String> {
    if let Some(caps) = NEAR_UUID.captures(text) {
        return Some(caps[1].to_string());
    }
    ANY_UUID.find(text).map(|m| m.as_str().to_string())
}

/// Normalize a scraped artist name.
///
/// Drops decorative emoji, a leading `@` or `by `, and a trailing
/// `| Suno`. Falls back to [`DEFAULT_ARTIST`].
pub fn clean_artist_name(name: &str) -> String {
    if name.is_empty() || name == "Suno" || name == DEFAULT_ARTIST {
        return DEFAULT_ARTIST.to_string();
    }

    let cleaned = DECORATION.replace_all(name, "");
    let cleaned = ARTIST_PREFIX.replace(&cleaned, "");
    let cleaned = SITE_SUFFIX.replace(&cleaned, "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        DEFAULT_ARTIST.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Tidy scraped lyrics; `None` when nothing is left
pub fn normalize_lyrics(raw: &str) -> Option<String> {
    let mut text = raw;
    for marker in JSON_MARKERS {
        if let Some(index) = text.find(marker) {
            text = &text[..index];
        }
    }

    let text = text.replace("\\n", "\n").replace("\r\n", "\n");
    let text = BLANK_RUN.replace_all(&text, "\n\n");
    let text = text.trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Decode named and numeric HTML character references.
///
/// Unknown names are left untouched.
pub fn decode_html_entities(text: &str) -> String {
    ENTITY
        .replace_all(text, |caps: &Captures<'_>| {
            let decoded = if let Some(dec) = caps.get(1) {
                dec.as_str().parse::<u32>().ok().and_then(char::from_u32)
            } else if let Some(hex) = caps.get(2) {
                u32::from_str_radix(hex.as_str(), 16)
                    .ok()
                    .and_then(char::from_u32)
            } else {
                caps.get(3).and_then(|name| named_entity(name.as_str()))
            };

            decoded.map_or_else(|| caps[0].to_string(), |c| c.to_string())
        })
        .into_owned()
}

fn named_entity(name: &str) -> Option<char> {
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "hellip" => '…',
        "mdash" => '—',
        "ndash" => '–',
        "rsquo" => '’',
        "lsquo" => '‘',
        "rdquo" => '”',
        "ldquo" => '“',
        _ => return None,
    })
}
