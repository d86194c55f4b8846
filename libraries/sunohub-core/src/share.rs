//! Social share pages
//!
//! Link-preview crawlers (chat apps, social networks) do not run the web
//! player, so shared links point at a small static page carrying Open Graph,
//! music and Twitter card metadata, which then redirects humans to the
//! player route `/song/<id>`.

use crate::error::{Result, SunoHubError};
use crate::types::Song;

/// Description used on every share card
pub const SHARE_DESCRIPTION: &str = "Listen to this AI-generated masterpiece on SunoHub.";

/// Fallback duration (seconds) advertised when a song has none recorded
const DEFAULT_SHARE_DURATION_SECS: u32 = 200;

/// Player URL for a published song
pub fn share_url(base_url: &str, song_id: &str) -> String {
    format!("{}/song/{}", base_url.trim_end_matches('/'), song_id)
}

/// Render the share page for a published song
///
/// Fails with `InvalidInput` for songs without a backend id, since there is
/// no player route to redirect to.
pub fn render_share_page(song: &Song, base_url: &str) -> Result<String> {
    let id = song
        .id
        .as_ref()
        .ok_or_else(|| SunoHubError::invalid_input("cannot share an unpublished song"))?;

    let app_url = escape_html(&share_url(base_url, id.as_str()));
    let title = escape_html(&format!("{} - {}", song.title, song.artist));
    let description = escape_html(SHARE_DESCRIPTION);
    let image = escape_html(&song.image_url);
    let audio = escape_html(&song.audio_url);
    let artist = escape_html(&song.artist);
    let duration = if song.duration == 0 {
        DEFAULT_SHARE_DURATION_SECS
    } else {
        song.duration
    };

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <meta property="og:type" content="music.song" />
  <meta property="og:url" content="{app_url}" />
  <meta property="og:title" content="{title}" />
  <meta property="og:description" content="{description}" />
  <meta property="og:image" content="{image}" />
  <meta property="og:audio" content="{audio}" />
  <meta property="og:audio:secure_url" content="{audio}" />
  <meta property="og:audio:type" content="audio/mpeg" />
  <meta property="music:musician" content="{artist}" />
  <meta property="music:duration" content="{duration}" />
  <meta property="twitter:card" content="summary_large_image" />
  <meta property="twitter:url" content="{app_url}" />
  <meta property="twitter:title" content="{title}" />
  <meta property="twitter:description" content="{description}" />
  <meta property="twitter:image" content="{image}" />
  <meta property="twitter:player" content="{app_url}?embed=true" />
  <meta property="twitter:player:width" content="500" />
  <meta property="twitter:player:height" content="500" />
  <meta http-equiv="refresh" content="0;url={app_url}" />
</head>
<body>
  <p>Redirecting to <a href="{app_url}">SunoHub Player</a>...</p>
</body>
</html>
"#
    ))
}

/// Escape text for use inside HTML attributes and bodies
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
