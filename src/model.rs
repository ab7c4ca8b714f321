//! Data model for scales, notes and note ranges.
//!
//! These structures are shared by the scale engine, the staff layout
//! calculator, the renderers and the practice scheduler. The serde
//! representation matches what the application shell persists, so a
//! saved scale reads as `{"key":"C#","type":"harmonic minor"}`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

// ═══════════════════════════════════════════════════════════════════════
// Pitch classes
// ═══════════════════════════════════════════════════════════════════════

/// One of the twelve semitone names. Black keys are always spelled as sharps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchClass {
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C#")]
    CSharp,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D#")]
    DSharp,
    #[serde(rename = "E")]
    E,
    #[serde(rename = "F")]
    F,
    #[serde(rename = "F#")]
    FSharp,
    #[serde(rename = "G")]
    G,
    #[serde(rename = "G#")]
    GSharp,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A#")]
    ASharp,
    #[serde(rename = "B")]
    B,
}

impl PitchClass {
    /// All pitch classes in semitone order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass::C,
        PitchClass::CSharp,
        PitchClass::D,
        PitchClass::DSharp,
        PitchClass::E,
        PitchClass::F,
        PitchClass::FSharp,
        PitchClass::G,
        PitchClass::GSharp,
        PitchClass::A,
        PitchClass::ASharp,
        PitchClass::B,
    ];

    /// Semitone index within the octave (C = 0 … B = 11).
    pub fn index(self) -> i32 {
        self as i32
    }

    /// Pitch class for any semitone index, wrapping around the octave.
    pub fn from_index(index: i32) -> PitchClass {
        Self::ALL[index.rem_euclid(12) as usize]
    }

    pub fn name(self) -> &'static str {
        match self {
            PitchClass::C => "C",
            PitchClass::CSharp => "C#",
            PitchClass::D => "D",
            PitchClass::DSharp => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::FSharp => "F#",
            PitchClass::G => "G",
            PitchClass::GSharp => "G#",
            PitchClass::A => "A",
            PitchClass::ASharp => "A#",
            PitchClass::B => "B",
        }
    }

    /// The natural letter this pitch class is written on (sharps share
    /// their natural's letter).
    pub fn letter(self) -> char {
        self.name().chars().next().unwrap_or('C')
    }

    pub fn is_sharp(self) -> bool {
        self.name().contains('#')
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PitchClass {
    type Err = Error;

    /// Accepts sharp spellings (`"F#"`) and flat spellings (`"Gb"`), the
    /// latter normalised to the enharmonic sharp.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let natural = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('C') => 0,
            Some('D') => 2,
            Some('E') => 4,
            Some('F') => 5,
            Some('G') => 7,
            Some('A') => 9,
            Some('B') => 11,
            _ => return Err(Error::UnknownPitchClass(s.to_string())),
        };
        let shift = match chars.as_str() {
            "" => 0,
            "#" | "♯" => 1,
            "b" | "♭" => -1,
            _ => return Err(Error::UnknownPitchClass(s.to_string())),
        };
        Ok(PitchClass::from_index(natural + shift))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Scale types
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ScaleType {
    #[default]
    #[serde(rename = "major")]
    Major,
    #[serde(rename = "minor")]
    NaturalMinor,
    #[serde(rename = "harmonic minor")]
    HarmonicMinor,
    #[serde(rename = "melodic minor")]
    MelodicMinor,
}

impl ScaleType {
    pub const ALL: [ScaleType; 4] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
        ScaleType::MelodicMinor,
    ];

    /// Name used in persisted state.
    pub fn wire_name(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "minor",
            ScaleType::HarmonicMinor => "harmonic minor",
            ScaleType::MelodicMinor => "melodic minor",
        }
    }

    /// Human-readable label for titles.
    pub fn label(self) -> &'static str {
        match self {
            ScaleType::Major => "Major",
            ScaleType::NaturalMinor => "Natural minor",
            ScaleType::HarmonicMinor => "Harmonic minor",
            ScaleType::MelodicMinor => "Melodic minor",
        }
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

impl FromStr for ScaleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "major" => Ok(ScaleType::Major),
            "minor" | "natural minor" => Ok(ScaleType::NaturalMinor),
            "harmonic minor" => Ok(ScaleType::HarmonicMinor),
            "melodic minor" => Ok(ScaleType::MelodicMinor),
            _ => Err(Error::UnknownScaleType(s.to_string())),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Notes
// ═══════════════════════════════════════════════════════════════════════

/// A pitched note produced by the scale engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Note {
    /// Semitone name
    pub pitch_class: PitchClass,
    /// Octave number in scientific pitch notation (middle C = C4)
    pub octave: i32,
    /// Semitone offset from the scale root (0 = root)
    pub scale_degree: i32,
}

impl Note {
    /// A note outside any scale context (scale degree 0).
    pub fn new(pitch_class: PitchClass, octave: i32) -> Self {
        Self { pitch_class, octave, scale_degree: 0 }
    }

    /// Note for an absolute pitch height (`octave * 12 + index`).
    pub fn from_absolute_pitch(pitch: i32) -> Self {
        Self::new(PitchClass::from_index(pitch), pitch.div_euclid(12))
    }

    /// Pitch height used for ordering and range comparison.
    pub fn absolute_pitch(&self) -> i32 {
        self.octave * 12 + self.pitch_class.index()
    }

    /// Whether two notes sound the same, ignoring their scale degree.
    pub fn same_pitch(&self, other: &Note) -> bool {
        self.pitch_class == other.pitch_class && self.octave == other.octave
    }

    /// Label such as `"C#4"`.
    pub fn label(&self) -> String {
        format!("{}{}", self.pitch_class, self.octave)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

impl FromStr for Note {
    type Err = Error;

    /// Parses labels like `"B3"`, `"F#5"` or `"Bb4"`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let split = trimmed
            .find(|c: char| c.is_ascii_digit() || c == '-')
            .ok_or_else(|| Error::InvalidNoteLabel(s.to_string()))?;
        let (name, octave) = trimmed.split_at(split);
        let pitch_class = name
            .parse::<PitchClass>()
            .map_err(|_| Error::InvalidNoteLabel(s.to_string()))?;
        let octave = octave
            .parse::<i32>()
            .map_err(|_| Error::InvalidNoteLabel(s.to_string()))?;
        Ok(Note::new(pitch_class, octave))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Scale selection
// ═══════════════════════════════════════════════════════════════════════

/// The user's (key, scale type) choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScaleSpec {
    pub key: PitchClass,
    #[serde(rename = "type")]
    pub scale_type: ScaleType,
}

impl ScaleSpec {
    pub fn new(key: PitchClass, scale_type: ScaleType) -> Self {
        Self { key, scale_type }
    }

    /// Title such as `"D Harmonic minor"`.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.key, self.scale_type.label())
    }
}

impl Default for ScaleSpec {
    fn default() -> Self {
        Self::new(PitchClass::C, ScaleType::Major)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Note ranges
// ═══════════════════════════════════════════════════════════════════════

/// Inclusive pitch window used to narrow a scale to the playable range.
///
/// Invariant: `start.absolute_pitch() < end.absolute_pitch()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RangeWire", into = "RangeWire")]
pub struct NoteRange {
    start: Note,
    end: Note,
}

impl NoteRange {
    pub fn new(start: Note, end: Note) -> Result<Self> {
        if start.absolute_pitch() >= end.absolute_pitch() {
            return Err(Error::InvalidRange { start: start.label(), end: end.label() });
        }
        Ok(Self {
            start: Note::new(start.pitch_class, start.octave),
            end: Note::new(end.pitch_class, end.octave),
        })
    }

    pub fn start(&self) -> Note {
        self.start
    }

    pub fn end(&self) -> Note {
        self.end
    }

    pub fn contains(&self, note: &Note) -> bool {
        let pitch = note.absolute_pitch();
        self.start.absolute_pitch() <= pitch && pitch <= self.end.absolute_pitch()
    }

    /// Move the lower bound, pulling it one semitone under the upper bound
    /// when it would otherwise meet or cross it.
    pub fn with_start(self, start: Note) -> Self {
        let limit = self.end.absolute_pitch() - 1;
        let pitch = start.absolute_pitch().min(limit);
        Self { start: Note::from_absolute_pitch(pitch), end: self.end }
    }

    /// Move the upper bound, pushing it one semitone over the lower bound
    /// when it would otherwise meet or cross it.
    pub fn with_end(self, end: Note) -> Self {
        let limit = self.start.absolute_pitch() + 1;
        let pitch = end.absolute_pitch().max(limit);
        Self { start: self.start, end: Note::from_absolute_pitch(pitch) }
    }
}

impl Default for NoteRange {
    /// B3 to C5.
    fn default() -> Self {
        Self {
            start: Note::new(PitchClass::B, 3),
            end: Note::new(PitchClass::C, 5),
        }
    }
}

/// Persisted shape of a range bound: `{"note":"B","octave":3,"label":"B3"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RangeBoundWire {
    note: PitchClass,
    octave: i32,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RangeWire {
    start: RangeBoundWire,
    end: RangeBoundWire,
}

impl From<Note> for RangeBoundWire {
    fn from(note: Note) -> Self {
        Self { note: note.pitch_class, octave: note.octave, label: Some(note.label()) }
    }
}

impl TryFrom<RangeWire> for NoteRange {
    type Error = Error;

    fn try_from(wire: RangeWire) -> Result<Self> {
        NoteRange::new(
            Note::new(wire.start.note, wire.start.octave),
            Note::new(wire.end.note, wire.end.octave),
        )
    }
}

impl From<NoteRange> for RangeWire {
    fn from(range: NoteRange) -> Self {
        Self { start: range.start.into(), end: range.end.into() }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Tabs
// ═══════════════════════════════════════════════════════════════════════

/// Top-level view of the application shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    Scales,
    Practice,
    Upload,
    About,
}

impl Tab {
    pub fn as_str(self) -> &'static str {
        match self {
            Tab::Scales => "scales",
            Tab::Practice => "practice",
            Tab::Upload => "upload",
            Tab::About => "about",
        }
    }

    /// Tabs that are restored from a previous session. The others depend on
    /// transient state and reopen on the scales view.
    pub fn is_restorable(self) -> bool {
        matches!(self, Tab::Scales | Tab::About)
    }
}

impl FromStr for Tab {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "scales" => Ok(Tab::Scales),
            "practice" => Ok(Tab::Practice),
            "upload" => Ok(Tab::Upload),
            "about" => Ok(Tab::About),
            other => Err(Error::UnknownTab(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pitch_class_parsing_normalises_flats() {
        assert_eq!("Bb".parse::<PitchClass>().unwrap(), PitchClass::ASharp);
        assert_eq!("Cb".parse::<PitchClass>().unwrap(), PitchClass::B);
        assert_eq!("F#".parse::<PitchClass>().unwrap(), PitchClass::FSharp);
        assert!("H".parse::<PitchClass>().is_err());
        assert!("C##".parse::<PitchClass>().is_err());
    }

    #[test]
    fn note_labels_round_trip_through_display() {
        let note: Note = "C#4".parse().unwrap();
        assert_eq!(note, Note::new(PitchClass::CSharp, 4));
        assert_eq!(note.to_string(), "C#4");
        assert_eq!(note.absolute_pitch(), 49);
        assert!("4C".parse::<Note>().is_err());
        assert!("C".parse::<Note>().is_err());
    }

    #[test]
    fn range_rejects_inverted_bounds() {
        let c5 = Note::new(PitchClass::C, 5);
        let b3 = Note::new(PitchClass::B, 3);
        assert!(NoteRange::new(c5, b3).is_err());
        assert!(NoteRange::new(c5, c5).is_err());
        assert!(NoteRange::new(b3, c5).is_ok());
    }

    #[test]
    fn range_clamping_keeps_start_below_end() {
        let range = NoteRange::default().with_start(Note::new(PitchClass::D, 6));
        assert_eq!(range.start(), Note::new(PitchClass::B, 4));
        assert_eq!(range.end(), Note::new(PitchClass::C, 5));

        let range = NoteRange::default().with_end(Note::new(PitchClass::C, 2));
        assert_eq!(range.end(), Note::new(PitchClass::C, 4));
    }

    #[test]
    fn range_serializes_in_persisted_shape() {
        let json = serde_json::to_string(&NoteRange::default()).unwrap();
        assert!(json.contains(r#""note":"B""#));
        assert!(json.contains(r#""label":"C5""#));
        let back: NoteRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, NoteRange::default());

        let inverted = r#"{"start":{"note":"C","octave":5},"end":{"note":"B","octave":3}}"#;
        assert!(serde_json::from_str::<NoteRange>(inverted).is_err());
    }

    #[test]
    fn scale_spec_uses_type_key_on_the_wire() {
        let spec = ScaleSpec::new(PitchClass::DSharp, ScaleType::HarmonicMinor);
        let json = serde_json::to_string(&spec).unwrap();
        assert_eq!(json, r#"{"key":"D#","type":"harmonic minor"}"#);
        assert_eq!(spec.full_name(), "D# Harmonic minor");
    }
}
