//! Core types for playback management

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use sunohub_core::SongId;

/// Repeat mode
///
/// Cycles `Off -> All -> One -> OneCustom -> Off` on every toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Loop the entire queue
    All,

    /// Replay the current song forever
    One,

    /// Play the current song twice, then advance
    OneCustom,
}

impl RepeatMode {
    /// All modes in toggle order
    pub const CYCLE: [RepeatMode; 4] = [
        RepeatMode::Off,
        RepeatMode::All,
        RepeatMode::One,
        RepeatMode::OneCustom,
    ];

    /// The mode a toggle moves to
    pub fn next(self) -> Self {
        match self {
            RepeatMode::Off => RepeatMode::All,
            RepeatMode::All => RepeatMode::One,
            RepeatMode::One => RepeatMode::OneCustom,
            RepeatMode::OneCustom => RepeatMode::Off,
        }
    }

    /// Persisted name of the mode
    pub fn as_str(self) -> &'static str {
        match self {
            RepeatMode::Off => "off",
            RepeatMode::All => "all",
            RepeatMode::One => "one",
            RepeatMode::OneCustom => "one_custom",
        }
    }
}

impl fmt::Display for RepeatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RepeatMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(RepeatMode::Off),
            "all" => Ok(RepeatMode::All),
            "one" => Ok(RepeatMode::One),
            "one_custom" => Ok(RepeatMode::OneCustom),
            other => Err(format!("unknown repeat mode: {other}")),
        }
    }
}

/// Where playback should go next
///
/// Handed to the navigation callback. `restart` is set when a repeat mode
/// re-targets the song that is already playing; the caller should seek to
/// zero instead of treating the call as a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// Song to load
    pub song_id: SongId,

    /// Replay of the current song
    pub restart: bool,
}

impl Navigation {
    /// Move to a different song
    pub fn to(song_id: SongId) -> Self {
        Self {
            song_id,
            restart: false,
        }
    }

    /// Replay the current song from the start
    pub fn replay(song_id: SongId) -> Self {
        Self {
            song_id,
            restart: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_cycle() {
        assert_eq!(RepeatMode::Off.next(), RepeatMode::All);
        assert_eq!(RepeatMode::All.next(), RepeatMode::One);
        assert_eq!(RepeatMode::One.next(), RepeatMode::OneCustom);
        assert_eq!(RepeatMode::OneCustom.next(), RepeatMode::Off);
    }

    #[test]
    fn test_cycle_matches_next() {
        for (i, mode) in RepeatMode::CYCLE.iter().enumerate() {
            assert_eq!(mode.next(), RepeatMode::CYCLE[(i + 1) % 4]);
        }
    }

    #[test]
    fn test_repeat_names_round_trip() {
        for mode in RepeatMode::CYCLE {
            assert_eq!(mode.as_str().parse::<RepeatMode>(), Ok(mode));
        }
        assert!("forever".parse::<RepeatMode>().is_err());
    }

    #[test]
    fn test_serde_matches_persisted_names() {
        let json = serde_json::to_string(&RepeatMode::OneCustom).unwrap();
        assert_eq!(json, "\"one_custom\"");
    }
}
