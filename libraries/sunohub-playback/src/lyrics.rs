//! Lyric timelines and tap-to-sync recording
//!
//! Lyrics are either plain text or LRC-style, with a `[mm:ss]` or
//! `[mm:ss.fff]` stamp at the start of a line. Plain lyrics are spread
//! evenly over the song so that something still scrolls.

use regex::Regex;
use std::sync::LazyLock;

/// Duration assumed for plain lyrics when the song length is unknown
pub const FALLBACK_DURATION_SECS: f64 = 240.0;

static TIMESTAMP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\d{2}:\d{2}(?:\.\d{1,3})?\]").expect("timestamp pattern is valid")
});

static STAMPED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[(\d{2}):(\d{2}(?:\.\d{1,3})?)\](.*)").expect("stamped line pattern is valid")
});

/// One displayed lyric line
#[derive(Debug, Clone, PartialEq)]
pub struct LyricLine {
    /// Seconds from the start of the song
    pub time: f64,
    pub text: String,
}

/// Whether any line carries a timestamp
pub fn has_timestamps(text: &str) -> bool {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .any(|line| TIMESTAMP.is_match(line))
}

/// Build the display timeline for a song's lyrics.
///
/// Timestamped lyrics keep only their stamped lines. Plain lyrics get
/// evenly spaced times over `duration_secs` ([`FALLBACK_DURATION_SECS`]
/// when that is zero or negative).
pub fn parse_lyrics(text: &str, duration_secs: f64) -> Vec<LyricLine> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    if lines.iter().any(|line| TIMESTAMP.is_match(line)) {
        return lines
            .iter()
            .filter_map(|line| {
                let caps = STAMPED_LINE.captures(line)?;
                let minutes: f64 = caps[1].parse().ok()?;
                let seconds: f64 = caps[2].parse().ok()?;
                Some(LyricLine {
                    time: minutes * 60.0 + seconds,
                    text: caps[3].trim().to_string(),
                })
            })
            .collect();
    }

    let total = lines.len() as f64;
    let duration = if duration_secs > 0.0 {
        duration_secs
    } else {
        FALLBACK_DURATION_SECS
    };

    lines
        .iter()
        .enumerate()
        .map(|(index, line)| LyricLine {
            time: index as f64 / total * duration,
            text: line.trim().to_string(),
        })
        .collect()
}

/// Index of the line to highlight at `position_secs`.
///
/// The last line whose time has been reached, or 0 before the first one.
pub fn active_line_index(lines: &[LyricLine], position_secs: f64) -> usize {
    lines
        .iter()
        .rposition(|line| position_secs >= line.time)
        .unwrap_or(0)
}

/// Drop every timestamp and return the remaining non-empty lines
pub fn strip_timestamps(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| TIMESTAMP.replace_all(line, "").trim().to_string())
        .filter(|line| !line.is_empty())
        .collect()
}

/// A line being recorded, with its stamp once tapped
#[derive(Debug, Clone, PartialEq)]
pub struct SyncLine {
    pub time: Option<f64>,
    pub text: String,
}

/// Tap-to-sync recorder
///
/// The user taps once per line while the song plays; each tap stamps the
/// active line with the playback position and moves to the next. Tapping
/// on the last line re-stamps it.
#[derive(Debug, Clone)]
pub struct LyricSyncSession {
    lines: Vec<SyncLine>,
    active: usize,
}

impl LyricSyncSession {
    /// Start recording over `lyrics`, discarding any existing stamps.
    ///
    /// Returns `None` if there is nothing to sync.
    pub fn start(lyrics: &str) -> Option<Self> {
        let lines: Vec<SyncLine> = strip_timestamps(lyrics)
            .into_iter()
            .map(|text| SyncLine { time: None, text })
            .collect();

        if lines.is_empty() {
            return None;
        }

        Some(Self { lines, active: 0 })
    }

    /// Stamp the active line at `now_secs` and advance
    pub fn mark(&mut self, now_secs: f64) {
        if let Some(line) = self.lines.get_mut(self.active) {
            line.time = Some(now_secs);
        }
        self.active = (self.active + 1).min(self.lines.len() - 1);
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn lines(&self) -> &[SyncLine] {
        &self.lines
    }

    /// Whether every line has a stamp
    pub fn is_complete(&self) -> bool {
        self.lines.iter().all(|line| line.time.is_some())
    }

    /// Render as LRC; unstamped lines are kept as bare text
    pub fn to_lrc(&self) -> String {
        self.lines
            .iter()
            .map(|line| match line.time {
                Some(time) => format!("{} {}", format_timestamp(time), line.text),
                None => line.text.clone(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// `[MM:SS.ss]`
fn format_timestamp(time: f64) -> String {
    let time = time.max(0.0);
    let minutes = (time / 60.0).floor() as u64;
    let seconds = time % 60.0;
    format!("[{:02}:{:05.2}]", minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const LRC: &str = "[00:01.50] First line\n[00:04] Second line\nno stamp\n\n[01:02.25]Third line";

    #[test]
    fn test_detects_timestamps() {
        assert!(has_timestamps(LRC));
        assert!(!has_timestamps("just\nplain\nwords"));
        assert!(!has_timestamps("[Chorus]\nla la"));
    }

    #[test]
    fn test_parse_timestamped_keeps_only_stamped_lines() {
        let lines = parse_lyrics(LRC, 200.0);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].time, 1.5);
        assert_eq!(lines[0].text, "First line");
        assert_eq!(lines[1].time, 4.0);
        assert_eq!(lines[2].time, 62.25);
        assert_eq!(lines[2].text, "Third line");
    }

    #[test]
    fn test_parse_plain_spreads_over_duration() {
        let lines = parse_lyrics("a\n\nb\nc\nd", 100.0);
        let times: Vec<f64> = lines.iter().map(|l| l.time).collect();
        assert_eq!(times, vec![0.0, 25.0, 50.0, 75.0]);
        assert_eq!(lines[1].text, "b");
    }

    #[test]
    fn test_parse_plain_unknown_duration_uses_fallback() {
        let lines = parse_lyrics("a\nb", 0.0);
        assert_eq!(lines[1].time, FALLBACK_DURATION_SECS / 2.0);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_lyrics("", 120.0).is_empty());
        assert!(parse_lyrics("\n  \n", 120.0).is_empty());
    }

    #[test]
    fn test_active_line_index() {
        let lines = parse_lyrics(LRC, 0.0);
        assert_eq!(active_line_index(&lines, 0.0), 0);
        assert_eq!(active_line_index(&lines, 1.5), 0);
        assert_eq!(active_line_index(&lines, 10.0), 1);
        assert_eq!(active_line_index(&lines, 500.0), 2);
        assert_eq!(active_line_index(&[], 10.0), 0);
    }

    #[test]
    fn test_strip_timestamps() {
        assert_eq!(
            strip_timestamps(LRC),
            vec!["First line", "Second line", "no stamp", "Third line"]
        );
    }

    #[test]
    fn test_sync_session_records_and_renders() {
        let mut session = LyricSyncSession::start("[00:09.00] one\ntwo\nthree").unwrap();
        assert_eq!(session.lines().len(), 3);
        assert!(session.lines().iter().all(|l| l.time.is_none()));

        session.mark(5.5);
        session.mark(65.123);
        assert_eq!(session.active_index(), 2);
        assert!(!session.is_complete());

        assert_eq!(session.to_lrc(), "[00:05.50] one\n[01:05.12] two\nthree");
    }

    #[test]
    fn test_sync_session_stops_at_last_line() {
        let mut session = LyricSyncSession::start("one\ntwo").unwrap();
        session.mark(1.0);
        session.mark(2.0);
        session.mark(3.0);

        assert_eq!(session.active_index(), 1);
        assert!(session.is_complete());
        assert_eq!(session.lines()[1].time, Some(3.0));
    }

    #[test]
    fn test_sync_session_needs_lines() {
        assert!(LyricSyncSession::start("").is_none());
        assert!(LyricSyncSession::start("[00:01.00]").is_none());
    }

    #[test]
    fn test_recorded_lrc_parses_back() {
        let mut session = LyricSyncSession::start("one\ntwo").unwrap();
        session.mark(3.25);
        session.mark(61.5);

        let lines = parse_lyrics(&session.to_lrc(), 0.0);
        assert_eq!(lines[0].time, 3.25);
        assert_eq!(lines[1].time, 61.5);
        assert_eq!(lines[1].text, "two");
    }
}
