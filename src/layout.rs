//! Staff layout calculator, the single source of vertical placement.
//!
//! Every renderer (full staff, single-note preview, printable sheet) asks
//! this module where a note sits; none of them computes slots on its own.
//!
//! Slots count half line-spacings from the staff's bottom line: slot 0 is
//! the bottom line, odd slots are spaces, even slots are lines, and the
//! five staff lines occupy slots 0, 2, 4, 6 and 8.

use serde::Serialize;

use crate::model::Note;

/// Octave in which the base-position table applies unshifted.
pub const LAYOUT_REFERENCE_OCTAVE: i32 = 4;

/// Slot of the top staff line.
pub const TOP_LINE_SLOT: i32 = 8;

/// Diatonic steps per octave.
const STEPS_PER_OCTAVE: i32 = 7;

/// Stems point down strictly above this slot.
const STEM_FLIP_SLOT: i32 = 2;

/// Vertical position on the staff, in half line-spacings above the bottom line.
pub type StaffPosition = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StemDirection {
    Up,
    Down,
}

/// Placement metadata for one note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoteLayout {
    /// Vertical slot of the notehead
    pub slot: StaffPosition,
    /// Ledger-line slots above the staff, lowest first
    pub ledger_above: Vec<StaffPosition>,
    /// Ledger-line slots below the staff, highest first
    pub ledger_below: Vec<StaffPosition>,
    /// Whether a sharp is drawn in front of the head
    pub is_accidental: bool,
    /// Stem direction the renderer should use
    pub stem: StemDirection,
}

impl NoteLayout {
    /// All ledger-line slots, below the staff first.
    pub fn ledger_slots(&self) -> impl Iterator<Item = StaffPosition> + '_ {
        self.ledger_below.iter().chain(self.ledger_above.iter()).copied()
    }
}

/// Base slot of each natural letter in the reference octave.
fn base_slot(letter: char) -> StaffPosition {
    match letter {
        'C' => -4,
        'D' => -3,
        'E' => -2,
        'F' => -1,
        'G' => 0,
        'A' => 1,
        'B' => 2,
        _ => 0,
    }
}

/// Slot for a note relative to `reference_octave`.
pub fn staff_slot(note: &Note, reference_octave: i32) -> StaffPosition {
    base_slot(note.pitch_class.letter()) + (note.octave - reference_octave) * STEPS_PER_OCTAVE
}

/// Compute the full placement of `note`.
pub fn layout(note: &Note, reference_octave: i32) -> NoteLayout {
    let slot = staff_slot(note, reference_octave);

    let ledger_above = if slot > TOP_LINE_SLOT {
        (TOP_LINE_SLOT + 2..=slot).step_by(2).collect()
    } else {
        Vec::new()
    };

    let ledger_below = if slot < 0 {
        let mut slots = Vec::new();
        let mut s = -2;
        while s >= slot {
            slots.push(s);
            s -= 2;
        }
        slots
    } else {
        Vec::new()
    };

    let stem = if slot > STEM_FLIP_SLOT { StemDirection::Down } else { StemDirection::Up };

    NoteLayout {
        slot,
        ledger_above,
        ledger_below,
        is_accidental: note.pitch_class.is_sharp(),
        stem,
    }
}

/// Layouts for a sequence of notes as JSON, for FFI consumers.
pub fn layout_to_json(notes: &[Note], reference_octave: i32) -> String {
    #[derive(Serialize)]
    struct Entry<'a> {
        note: &'a Note,
        label: String,
        layout: NoteLayout,
    }

    let entries: Vec<Entry<'_>> = notes
        .iter()
        .map(|note| Entry { note, label: note.label(), layout: layout(note, reference_octave) })
        .collect();
    serde_json::to_string(&entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PitchClass;

    fn at(pc: PitchClass, octave: i32) -> NoteLayout {
        layout(&Note::new(pc, octave), LAYOUT_REFERENCE_OCTAVE)
    }

    #[test]
    fn g4_sits_on_the_bottom_line() {
        let l = at(PitchClass::G, 4);
        assert_eq!(l.slot, 0);
        assert!(l.ledger_above.is_empty());
        assert!(l.ledger_below.is_empty());
        assert_eq!(l.stem, StemDirection::Up);
    }

    #[test]
    fn c4_needs_two_ledger_lines_below() {
        let l = at(PitchClass::C, 4);
        assert_eq!(l.slot, -4);
        assert_eq!(l.ledger_below, vec![-2, -4]);
        assert!(l.ledger_above.is_empty());
    }

    #[test]
    fn space_below_the_staff_gets_the_line_above_it() {
        let l = at(PitchClass::F, 4);
        assert_eq!(l.slot, -1);
        assert!(l.ledger_below.is_empty());

        let l = at(PitchClass::D, 4);
        assert_eq!(l.slot, -3);
        assert_eq!(l.ledger_below, vec![-2]);
    }

    #[test]
    fn high_notes_get_ledger_lines_above_only_from_slot_ten() {
        // A5: 1 + 7 = 8, the top line itself
        assert!(at(PitchClass::A, 5).ledger_above.is_empty());
        // B5: slot 9, a space just above the top line
        assert!(at(PitchClass::B, 5).ledger_above.is_empty());
        // E6: -2 + 14 = 12
        let l = at(PitchClass::E, 6);
        assert_eq!(l.slot, 12);
        assert_eq!(l.ledger_above, vec![10, 12]);
        assert_eq!(l.stem, StemDirection::Down);
    }

    #[test]
    fn sharps_share_their_letter_slot() {
        let sharp = at(PitchClass::FSharp, 4);
        let natural = at(PitchClass::F, 4);
        assert_eq!(sharp.slot, natural.slot);
        assert!(sharp.is_accidental);
        assert!(!natural.is_accidental);
    }

    #[test]
    fn stem_flips_above_slot_two() {
        assert_eq!(at(PitchClass::B, 4).stem, StemDirection::Up);
        assert_eq!(at(PitchClass::C, 5).stem, StemDirection::Down);
    }

    #[test]
    fn layout_json_lists_every_note() {
        let notes = [Note::new(PitchClass::C, 4), Note::new(PitchClass::ASharp, 4)];
        let json = layout_to_json(&notes, LAYOUT_REFERENCE_OCTAVE);
        assert!(json.contains(r#""label":"C4""#));
        assert!(json.contains(r#""is_accidental":true"#));
        assert!(json.contains(r#""ledger_below":[-2,-4]"#));
    }
}
