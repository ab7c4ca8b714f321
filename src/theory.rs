//! Scale engine and range filter.
//!
//! A scale is generated from a key and a scale type by walking a fixed
//! interval table upward from the key's root in the reference octave.
//! The result is a lazy, restartable iterator: generating the same
//! (key, type) pair always yields the same notes.

use crate::model::*;

/// Octave the generated scales start from.
pub const REFERENCE_OCTAVE: i32 = 3;

/// Octaves offered by the range selector.
pub const SELECTABLE_OCTAVES: std::ops::RangeInclusive<i32> = 2..=6;

// ── Interval tables (semitones above the root, two octaves) ─────────

const MAJOR: [i32; 15] = [0, 2, 4, 5, 7, 9, 11, 12, 14, 16, 17, 19, 21, 23, 24];
const NATURAL_MINOR: [i32; 15] = [0, 2, 3, 5, 7, 8, 10, 12, 14, 15, 17, 19, 20, 22, 24];
const HARMONIC_MINOR: [i32; 15] = [0, 2, 3, 5, 7, 8, 11, 12, 14, 15, 17, 19, 20, 23, 24];
const MELODIC_MINOR: [i32; 15] = [0, 2, 3, 5, 7, 9, 11, 12, 14, 15, 17, 19, 21, 23, 24];

/// Semitone offsets for a scale type. Strictly increasing, never above 24.
pub fn scale_intervals(scale_type: ScaleType) -> &'static [i32] {
    match scale_type {
        ScaleType::Major => &MAJOR,
        ScaleType::NaturalMinor => &NATURAL_MINOR,
        ScaleType::HarmonicMinor => &HARMONIC_MINOR,
        ScaleType::MelodicMinor => &MELODIC_MINOR,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Scale generation
// ═══════════════════════════════════════════════════════════════════════

/// Lazy iterator over the notes of a scale, lowest first.
#[derive(Debug, Clone)]
pub struct ScaleNotes {
    root: i32,
    reference_octave: i32,
    intervals: std::slice::Iter<'static, i32>,
}

impl ScaleNotes {
    fn empty() -> Self {
        Self { root: 0, reference_octave: REFERENCE_OCTAVE, intervals: [].iter() }
    }
}

impl Iterator for ScaleNotes {
    type Item = Note;

    fn next(&mut self) -> Option<Note> {
        let &offset = self.intervals.next()?;
        let semitone = self.root + offset;
        Some(Note {
            pitch_class: PitchClass::from_index(semitone),
            octave: self.reference_octave + semitone.div_euclid(12),
            scale_degree: offset,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.intervals.size_hint()
    }
}

impl ExactSizeIterator for ScaleNotes {}

/// Generate the notes of `key` `scale_type`, starting at [`REFERENCE_OCTAVE`].
pub fn generate_scale(key: PitchClass, scale_type: ScaleType) -> ScaleNotes {
    generate_scale_from(key, scale_type, REFERENCE_OCTAVE)
}

/// Generate a scale whose root sits in `reference_octave`.
pub fn generate_scale_from(key: PitchClass, scale_type: ScaleType, reference_octave: i32) -> ScaleNotes {
    ScaleNotes {
        root: key.index(),
        reference_octave,
        intervals: scale_intervals(scale_type).iter(),
    }
}

/// Generate a scale from untyped input, as received from a UI event.
///
/// An unrecognised key produces an empty sequence. An unrecognised scale
/// type falls back to major.
pub fn generate_scale_str(key: &str, scale_type: &str) -> ScaleNotes {
    let Ok(key) = key.parse::<PitchClass>() else {
        return ScaleNotes::empty();
    };
    let scale_type = scale_type.parse::<ScaleType>().unwrap_or_default();
    generate_scale(key, scale_type)
}

// ═══════════════════════════════════════════════════════════════════════
// Range filter
// ═══════════════════════════════════════════════════════════════════════

/// Keep the notes inside `range` (bounds inclusive), preserving order.
///
/// The result may be empty; callers treat that as "no notes available".
pub fn filter_by_range<I>(notes: I, range: &NoteRange) -> Vec<Note>
where
    I: IntoIterator<Item = Note>,
{
    notes.into_iter().filter(|note| range.contains(note)).collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Range selector catalogue
// ═══════════════════════════════════════════════════════════════════════

/// Every note a range bound can be set to, lowest first (C2 … B6).
pub fn selectable_notes() -> Vec<Note> {
    SELECTABLE_OCTAVES
        .flat_map(|octave| PitchClass::ALL.iter().map(move |&pc| Note::new(pc, octave)))
        .collect()
}

// ═══════════════════════════════════════════════════════════════════════
// Alto saxophone transposition (Eb instrument)
// ═══════════════════════════════════════════════════════════════════════

/// Written-pitch interval above concert pitch for an Eb alto saxophone.
const ALTO_SAX_SEMITONES: i32 = 9;

/// Written note an alto saxophonist reads for a concert pitch.
pub fn transpose_for_alto_sax(concert: Note) -> Note {
    shift(concert, ALTO_SAX_SEMITONES)
}

/// Concert pitch that sounds when an alto saxophonist plays a written note.
pub fn concert_pitch_from_alto_sax(written: Note) -> Note {
    shift(written, -ALTO_SAX_SEMITONES)
}

fn shift(note: Note, semitones: i32) -> Note {
    let moved = Note::from_absolute_pitch(note.absolute_pitch() + semitones);
    Note { scale_degree: note.scale_degree, ..moved }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interval_tables_are_strictly_increasing_within_two_octaves() {
        for scale_type in ScaleType::ALL {
            let table = scale_intervals(scale_type);
            assert_eq!(table.len(), 15);
            assert_eq!(table[0], 0);
            assert!(table.windows(2).all(|w| w[0] < w[1]), "{scale_type} not increasing");
            assert!(*table.last().unwrap() <= 24);
        }
    }

    #[test]
    fn scale_iterator_is_restartable() {
        let scale = generate_scale(PitchClass::FSharp, ScaleType::MelodicMinor);
        let first: Vec<Note> = scale.clone().collect();
        let second: Vec<Note> = scale.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_key_yields_empty_scale() {
        assert_eq!(generate_scale_str("H", "major").count(), 0);
        assert_eq!(generate_scale_str("", "minor").len(), 0);
    }

    #[test]
    fn unknown_scale_type_falls_back_to_major() {
        let fallback: Vec<Note> = generate_scale_str("D", "lydian").collect();
        let major: Vec<Note> = generate_scale(PitchClass::D, ScaleType::Major).collect();
        assert_eq!(fallback, major);
    }

    #[test]
    fn selectable_notes_cover_five_octaves() {
        let notes = selectable_notes();
        assert_eq!(notes.len(), 60);
        assert_eq!(notes[0].label(), "C2");
        assert_eq!(notes[59].label(), "B6");
    }

    #[test]
    fn alto_sax_transposition_moves_a_major_sixth() {
        let concert = Note { pitch_class: PitchClass::DSharp, octave: 4, scale_degree: 3 };
        let written = transpose_for_alto_sax(concert);
        assert_eq!(written.pitch_class, PitchClass::C);
        assert_eq!(written.octave, 5);
        assert_eq!(written.scale_degree, 3);
        assert_eq!(concert_pitch_from_alto_sax(written), concert);

        let low = concert_pitch_from_alto_sax(Note::new(PitchClass::C, 4));
        assert_eq!(low, Note::new(PitchClass::DSharp, 3));
    }
}
