//! Three-slot note window and the policy that feeds it.

use rand::{Rng, RngCore};
use serde::Serialize;

use crate::model::Note;
use super::config::SelectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CarouselSlot {
    Previous,
    Current,
    Next,
}

/// Sliding window of three notes over the selection stream.
///
/// Either all three slots are filled or none is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Carousel {
    slots: Option<[Note; 3]>,
}

impl Carousel {
    pub(crate) fn seeded(previous: Note, current: Note, next: Note) -> Self {
        Self { slots: Some([previous, current, next]) }
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_none()
    }

    pub fn get(&self, slot: CarouselSlot) -> Option<Note> {
        let slots = self.slots?;
        Some(match slot {
            CarouselSlot::Previous => slots[0],
            CarouselSlot::Current => slots[1],
            CarouselSlot::Next => slots[2],
        })
    }

    pub fn previous(&self) -> Option<Note> {
        self.get(CarouselSlot::Previous)
    }

    pub fn current(&self) -> Option<Note> {
        self.get(CarouselSlot::Current)
    }

    pub fn next(&self) -> Option<Note> {
        self.get(CarouselSlot::Next)
    }

    /// The most recently drawn note.
    pub(crate) fn head(&self) -> Option<Note> {
        self.next()
    }

    /// current → previous, next → current, `fresh` → next.
    pub(crate) fn advance(&mut self, fresh: Note) {
        if let Some([_, current, next]) = self.slots {
            self.slots = Some([current, next, fresh]);
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots = None;
    }
}

/// Pick the note that follows `head` in the stream.
///
/// Returns `None` only when `available` is empty.
pub(crate) fn select_note(
    mode: SelectionMode,
    available: &[Note],
    head: Option<&Note>,
    rng: &mut dyn RngCore,
) -> Option<Note> {
    if available.is_empty() {
        return None;
    }
    let index = match mode {
        SelectionMode::Random => rng.random_range(0..available.len()),
        SelectionMode::Sequential => head
            .and_then(|head| available.iter().position(|n| n.same_pitch(head)))
            .map_or(0, |i| (i + 1) % available.len()),
    };
    Some(available[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PitchClass;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn notes() -> Vec<Note> {
        vec![
            Note::new(PitchClass::C, 4),
            Note::new(PitchClass::D, 4),
            Note::new(PitchClass::E, 4),
        ]
    }

    #[test]
    fn sequential_starts_at_the_first_note_and_wraps() {
        let mut rng = StdRng::seed_from_u64(0);
        let available = notes();
        let pick = |head: Option<&Note>, rng: &mut StdRng| {
            select_note(SelectionMode::Sequential, &available, head, rng)
        };
        assert_eq!(pick(None, &mut rng), Some(available[0]));
        assert_eq!(pick(Some(&available[0]), &mut rng), Some(available[1]));
        assert_eq!(pick(Some(&available[2]), &mut rng), Some(available[0]));
        // a head that left the list restarts the sequence
        let stray = Note::new(PitchClass::A, 2);
        assert_eq!(pick(Some(&stray), &mut rng), Some(available[0]));
    }

    #[test]
    fn random_picks_from_the_available_notes() {
        let mut rng = StdRng::seed_from_u64(42);
        let available = notes();
        for _ in 0..50 {
            let note = select_note(SelectionMode::Random, &available, None, &mut rng).unwrap();
            assert!(available.contains(&note));
        }
        assert_eq!(select_note(SelectionMode::Random, &[], None, &mut rng), None);
    }

    #[test]
    fn advance_slides_the_window() {
        let [c, d, e] = [notes()[0], notes()[1], notes()[2]];
        let mut carousel = Carousel::seeded(c, d, e);
        carousel.advance(c);
        assert_eq!(carousel.previous(), Some(d));
        assert_eq!(carousel.current(), Some(e));
        assert_eq!(carousel.next(), Some(c));

        let mut empty = Carousel::default();
        empty.advance(c);
        assert!(empty.is_empty());
    }
}
