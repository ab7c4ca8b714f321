//! Small non-interactive staff holding a single note.
//!
//! Used by the practice carousel for its previous/current/next slots.

use serde::{Deserialize, Serialize};

use crate::model::Note;
use super::constants::*;
use super::{paint_notes, paint_staff, Palette, PlacedNote, StaffGeometry, Surface, SvgSurface};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewOptions {
    pub width: f64,
    pub height: f64,
    pub line_spacing: f64,
    /// Draw the note's label (e.g. `"F#4"`) under the staff
    pub show_letter: bool,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            width: PREVIEW_WIDTH,
            height: PREVIEW_HEIGHT,
            line_spacing: PREVIEW_LINE_SPACING,
            show_letter: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NotePreview {
    note: Option<Note>,
    highlighted: bool,
    options: PreviewOptions,
}

impl NotePreview {
    /// A preview of `note`; `None` draws an empty staff.
    pub fn new(note: Option<Note>, options: PreviewOptions) -> Self {
        Self { note, highlighted: false, options }
    }

    pub fn highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = highlighted;
        self
    }

    pub fn geometry(&self) -> StaffGeometry {
        let ls = self.options.line_spacing;
        let staff_width = self.options.width * 0.8;
        let left = (self.options.width - staff_width) / 2.0;
        StaffGeometry {
            left,
            right: left + staff_width,
            top: self.options.height / 2.0 - 2.0 * ls,
            line_spacing: ls,
        }
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let geometry = self.geometry();
        let ls = geometry.line_spacing;
        paint_staff(surface, &geometry, geometry.left + 1.5 * ls, NOTE_COLOR);

        let Some(note) = self.note else {
            return;
        };
        let placed = [PlacedNote::new(note, self.options.width / 2.0)];
        let selected = self.highlighted.then_some(0);
        paint_notes(surface, &geometry, &placed, selected, &Palette::default());

        if self.options.show_letter {
            surface.text(
                self.options.width / 2.0,
                self.options.height - ls / 2.0,
                &note.label(),
                12.0,
                "bold",
                LABEL_COLOR,
                "middle",
            );
        }
    }

    pub fn render_svg(&self) -> String {
        let mut svg = SvgSurface::new(self.options.width, self.options.height);
        self.render(&mut svg);
        svg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PitchClass;

    #[test]
    fn empty_preview_draws_only_the_staff() {
        let svg = NotePreview::new(None, PreviewOptions::default()).render_svg();
        assert_eq!(svg.matches("<line").count(), 5);
        assert!(!svg.contains("<ellipse"));
    }

    #[test]
    fn letter_label_is_optional() {
        let note = Some(Note::new(PitchClass::FSharp, 4));
        let plain = NotePreview::new(note, PreviewOptions::default()).render_svg();
        assert!(!plain.contains("F#4"));

        let options = PreviewOptions { show_letter: true, ..PreviewOptions::default() };
        let labelled = NotePreview::new(note, options).render_svg();
        assert!(labelled.contains(">F#4</text>"));
    }
}
