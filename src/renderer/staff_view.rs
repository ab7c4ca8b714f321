//! Full-width interactive staff showing every note of the active scale.

use serde::{Deserialize, Serialize};

use crate::model::{Note, ScaleSpec};
use super::constants::*;
use super::{paint_notes, paint_staff, Palette, PlacedNote, StaffGeometry, Surface, SvgSurface};

/// Canvas size and line spacing of the full staff view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaffViewOptions {
    pub width: f64,
    pub height: f64,
    pub line_spacing: f64,
}

impl Default for StaffViewOptions {
    fn default() -> Self {
        Self {
            width: STAFF_VIEW_WIDTH,
            height: STAFF_VIEW_HEIGHT,
            line_spacing: STAFF_VIEW_LINE_SPACING,
        }
    }
}

/// The scale staff: one column per note, clicking a column selects it.
#[derive(Debug, Clone)]
pub struct StaffView {
    spec: ScaleSpec,
    notes: Vec<Note>,
    selected: Option<usize>,
    options: StaffViewOptions,
}

impl StaffView {
    pub fn new(spec: ScaleSpec, notes: Vec<Note>, options: StaffViewOptions) -> Self {
        Self { spec, notes, selected: None, options }
    }

    /// Highlight the note at `index`. Out-of-range indices clear the highlight.
    pub fn with_selected(mut self, index: Option<usize>) -> Self {
        self.selected = index.filter(|&i| i < self.notes.len());
        self
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn options(&self) -> &StaffViewOptions {
        &self.options
    }

    /// Title such as `"C Major (C3 – C5)"`.
    pub fn title(&self) -> String {
        match (self.notes.first(), self.notes.last()) {
            (Some(first), Some(last)) => format!("{} ({} – {})", self.spec.full_name(), first, last),
            _ => self.spec.full_name(),
        }
    }

    pub fn geometry(&self) -> StaffGeometry {
        let ls = self.options.line_spacing;
        StaffGeometry {
            left: STAFF_LEFT,
            right: self.options.width - STAFF_RIGHT_MARGIN,
            top: self.options.height / 2.0 - 2.0 * ls,
            line_spacing: ls,
        }
    }

    /// Width of one note column. Views narrower than the margins keep a
    /// one-unit note area so columns stay positive.
    fn column_width(&self) -> f64 {
        (self.options.width - STAFF_VIEW_NOTES_MARGIN).max(1.0) / self.notes.len().max(1) as f64
    }

    /// Centre x of the note at `index`.
    pub fn note_x(&self, index: usize) -> f64 {
        let nw = self.column_width();
        STAFF_VIEW_NOTES_LEFT + nw * index as f64 + nw / 2.0
    }

    /// Map a click x coordinate to the index of the note column under it.
    pub fn hit_test(&self, x: f64) -> Option<usize> {
        if self.notes.is_empty() {
            return None;
        }
        let column = ((x - STAFF_VIEW_NOTES_LEFT) / self.column_width()).floor();
        if column < 0.0 || column >= self.notes.len() as f64 {
            return None;
        }
        Some(column as usize)
    }

    pub fn placed_notes(&self) -> Vec<PlacedNote> {
        self.notes
            .iter()
            .enumerate()
            .map(|(i, &note)| PlacedNote::new(note, self.note_x(i)))
            .collect()
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let geometry = self.geometry();
        let ls = geometry.line_spacing;

        surface.text(self.options.width / 2.0, 2.0 * ls, &self.title(), 14.0, "bold", NOTE_COLOR, "middle");
        paint_staff(surface, &geometry, CLEF_X, NOTE_COLOR);

        let placed = self.placed_notes();
        let palette = Palette::default();
        paint_notes(surface, &geometry, &placed, self.selected, &palette);

        for (i, p) in placed.iter().enumerate() {
            let y = geometry.slot_y(p.layout.slot);
            let color = if self.selected == Some(i) { palette.highlight } else { LABEL_COLOR };
            surface.text(
                p.x - 0.5 * ls,
                y - OCTAVE_LABEL_RISE * ls,
                &p.note.octave.to_string(),
                10.0,
                "normal",
                color,
                "start",
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
    use crate::model::{PitchClass, ScaleType};
    use crate::theory::generate_scale;

    fn c_major_view() -> StaffView {
        let spec = ScaleSpec::new(PitchClass::C, ScaleType::Major);
        StaffView::new(spec, generate_scale(spec.key, spec.scale_type).collect(), StaffViewOptions::default())
    }

    #[test]
    fn hit_test_inverts_note_x() {
        let view = c_major_view();
        for i in 0..view.notes().len() {
            assert_eq!(view.hit_test(view.note_x(i)), Some(i));
        }
        assert_eq!(view.hit_test(10.0), None);
        assert_eq!(view.hit_test(view.options().width), None);
    }

    #[test]
    fn hit_test_on_empty_view_is_none() {
        let view = StaffView::new(ScaleSpec::default(), Vec::new(), StaffViewOptions::default());
        assert_eq!(view.hit_test(400.0), None);
        assert_eq!(view.title(), "C Major");
    }

    #[test]
    fn title_spans_first_and_last_note() {
        assert_eq!(c_major_view().title(), "C Major (C3 – C5)");
    }

    #[test]
    fn selected_note_is_highlighted() {
        let svg = c_major_view().with_selected(Some(3)).render_svg();
        // head, stem and octave label
        assert_eq!(svg.matches(HIGHLIGHT_COLOR).count(), 3);
        assert!(svg.contains(&format!(r#"fill="{HIGHLIGHT_COLOR}" text-anchor="start">3</text>"#)));
        let plain = c_major_view().render_svg();
        assert!(!plain.contains(HIGHLIGHT_COLOR));
    }

    #[test]
    fn narrow_view_keeps_columns_ordered() {
        let spec = ScaleSpec::new(PitchClass::C, ScaleType::Major);
        let notes: Vec<Note> = generate_scale(spec.key, spec.scale_type).collect();
        for width in [40.0, 100.0] {
            let view = StaffView::new(spec, notes.clone(), StaffViewOptions { width, ..StaffViewOptions::default() });
            assert!((1..notes.len()).all(|i| view.note_x(i) > view.note_x(i - 1)));
            assert!(view.note_x(0) > STAFF_VIEW_NOTES_LEFT);
            assert_eq!(view.hit_test(view.note_x(0)), Some(0));
            assert_eq!(view.hit_test(STAFF_VIEW_NOTES_LEFT - 1.0), None);
            assert_eq!(view.hit_test(STAFF_VIEW_NOTES_LEFT + 2.0), None);
        }
    }

    #[test]
    fn out_of_range_selection_is_dropped() {
        assert_eq!(c_major_view().with_selected(Some(99)).selected(), None);
    }
}
