//! Practice configuration: tempo, selection mode and display flags.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Slowest tempo the practice loop accepts.
pub const MIN_BPM: u32 = 40;
/// Fastest tempo the practice loop accepts.
pub const MAX_BPM: u32 = 200;
/// Tempo used when nothing else is configured.
pub const DEFAULT_BPM: u32 = 90;

/// A tempo in beats per minute, guaranteed to lie in `40..=200`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Bpm(u32);

impl Bpm {
    pub fn new(bpm: u32) -> Result<Self> {
        if (MIN_BPM..=MAX_BPM).contains(&bpm) {
            Ok(Self(bpm))
        } else {
            Err(Error::TempoOutOfRange(bpm))
        }
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Milliseconds between two beats.
    pub fn period_ms(self) -> f64 {
        60_000.0 / self.0 as f64
    }
}

impl Default for Bpm {
    fn default() -> Self {
        Self(DEFAULT_BPM)
    }
}

impl TryFrom<u32> for Bpm {
    type Error = Error;

    fn try_from(bpm: u32) -> Result<Self> {
        Bpm::new(bpm)
    }
}

impl From<Bpm> for u32 {
    fn from(bpm: Bpm) -> u32 {
        bpm.0
    }
}

/// Named tempos offered as one-tap shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempoPreset {
    Slow,
    Moderate,
    Allegro,
    Fast,
}

impl TempoPreset {
    pub const ALL: [TempoPreset; 4] = [
        TempoPreset::Slow,
        TempoPreset::Moderate,
        TempoPreset::Allegro,
        TempoPreset::Fast,
    ];

    pub fn bpm(self) -> Bpm {
        match self {
            TempoPreset::Slow => Bpm(60),
            TempoPreset::Moderate => Bpm(90),
            TempoPreset::Allegro => Bpm(120),
            TempoPreset::Fast => Bpm(144),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TempoPreset::Slow => "Slow",
            TempoPreset::Moderate => "Moderate",
            TempoPreset::Allegro => "Allegro",
            TempoPreset::Fast => "Fast",
        }
    }
}

/// How the next carousel note is picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Uniformly among the available notes
    #[default]
    Random,
    /// The note after the last one drawn, wrapping at the end
    Sequential,
}

/// What the practice view shows for each carousel note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFlags {
    pub show_letter: bool,
    pub show_staff: bool,
    pub show_fingering: bool,
}

impl Default for DisplayFlags {
    fn default() -> Self {
        Self { show_letter: true, show_staff: true, show_fingering: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PracticeConfig {
    pub tempo: Bpm,
    pub selection_mode: SelectionMode,
    pub display: DisplayFlags,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bpm_bounds_are_inclusive() {
        assert!(Bpm::new(40).is_ok());
        assert!(Bpm::new(200).is_ok());
        assert!(matches!(Bpm::new(39), Err(Error::TempoOutOfRange(39))));
        assert!(Bpm::new(201).is_err());
    }

    #[test]
    fn period_is_one_beat() {
        assert_eq!(Bpm::new(60).unwrap().period_ms(), 1000.0);
        assert_eq!(Bpm::new(120).unwrap().period_ms(), 500.0);
    }

    #[test]
    fn defaults_match_the_practice_screen() {
        let config = PracticeConfig::default();
        assert_eq!(config.tempo.get(), 90);
        assert_eq!(config.selection_mode, SelectionMode::Random);
        assert!(config.display.show_letter && config.display.show_staff && config.display.show_fingering);
    }

    #[test]
    fn config_rejects_out_of_range_tempo() {
        let ok: PracticeConfig = serde_json::from_str(r#"{"tempo":144,"selection_mode":"sequential"}"#).unwrap();
        assert_eq!(ok.tempo, TempoPreset::Fast.bpm());
        assert_eq!(ok.selection_mode, SelectionMode::Sequential);
        assert!(serde_json::from_str::<PracticeConfig>(r#"{"tempo":300}"#).is_err());
    }
}
