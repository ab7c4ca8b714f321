//! Staff renderer: paints laid-out notes onto a 2D drawing surface.
//!
//! Vertical placement always comes from [`crate::layout`]; this module
//! only turns slots into coordinates and coordinates into strokes. Three
//! thin adapters sit on top of the shared painting code:
//!
//! - [`StaffView`], the full-width interactive staff,
//! - [`NotePreview`], the small single-note view,
//! - [`PracticeSheet`], the multi-row printable sheet.
//!
//! Drawing goes through the [`Surface`] trait. [`SvgSurface`] is the
//! bundled implementation and doubles as the static-image export.

mod constants;
mod notes;
mod preview;
mod sheet;
mod staff;
mod staff_view;
mod svg_builder;

use crate::layout::{self, NoteLayout, StaffPosition, LAYOUT_REFERENCE_OCTAVE};
use crate::model::Note;

pub use preview::{NotePreview, PreviewOptions};
pub use sheet::{PracticeSheet, SheetOptions};
pub use staff_view::{StaffView, StaffViewOptions};
pub use svg_builder::SvgSurface;

// ═══════════════════════════════════════════════════════════════════════
// Drawing surface
// ═══════════════════════════════════════════════════════════════════════

/// One segment of a vector path, in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Cubic Bézier: two control points, then the end point.
    CubicTo(f64, f64, f64, f64, f64, f64),
    Close,
}

/// A 2D drawing target. Coordinates grow right and down.
pub trait Surface {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64);

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str);

    /// Filled ellipse rotated by `rotation` degrees around its centre.
    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: &str);

    fn path(&mut self, commands: &[PathCommand], fill: &str, stroke: &str, stroke_width: f64);

    /// `anchor` is one of `"start"`, `"middle"`, `"end"`.
    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, weight: &str, fill: &str, anchor: &str);
}

// ═══════════════════════════════════════════════════════════════════════
// Geometry
// ═══════════════════════════════════════════════════════════════════════

/// Where a five-line staff sits on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaffGeometry {
    /// x where the staff lines start
    pub left: f64,
    /// x where the staff lines end
    pub right: f64,
    /// y of the top staff line
    pub top: f64,
    /// Distance between adjacent staff lines
    pub line_spacing: f64,
}

impl StaffGeometry {
    /// y of the bottom staff line (slot 0).
    pub fn bottom(&self) -> f64 {
        self.top + 4.0 * self.line_spacing
    }

    /// y coordinate of a slot; each slot is half a line spacing.
    pub fn slot_y(&self, slot: StaffPosition) -> f64 {
        self.bottom() - slot as f64 * self.line_spacing / 2.0
    }
}

/// A note together with its layout and horizontal position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNote {
    pub note: Note,
    pub layout: NoteLayout,
    pub x: f64,
}

impl PlacedNote {
    pub fn new(note: Note, x: f64) -> Self {
        Self { note, layout: layout::layout(&note, LAYOUT_REFERENCE_OCTAVE), x }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Shared painting
// ═══════════════════════════════════════════════════════════════════════

/// Colors used when painting a staff and its notes.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Palette<'a> {
    pub staff: &'a str,
    pub note: &'a str,
    pub highlight: &'a str,
}

impl Default for Palette<'_> {
    fn default() -> Self {
        Self {
            staff: constants::NOTE_COLOR,
            note: constants::NOTE_COLOR,
            highlight: constants::HIGHLIGHT_COLOR,
        }
    }
}

/// Paint an empty staff (lines + clef) with the clef centred at `clef_x`.
pub(crate) fn paint_staff(surface: &mut dyn Surface, geometry: &StaffGeometry, clef_x: f64, color: &str) {
    staff::render_staff(surface, geometry, clef_x, color);
}

/// Paint every placed note; `selected` gets the highlight color and
/// ledger lines take the staff color.
pub(crate) fn paint_notes(
    surface: &mut dyn Surface,
    geometry: &StaffGeometry,
    notes: &[PlacedNote],
    selected: Option<usize>,
    palette: &Palette<'_>,
) {
    for (i, placed) in notes.iter().enumerate() {
        let color = if selected == Some(i) { palette.highlight } else { palette.note };
        notes::render_note(surface, geometry, &placed.layout, placed.x, color, palette.staff);
    }
}
