//! Staff lines and the treble clef glyph.

use super::constants::*;
use super::{PathCommand, StaffGeometry, Surface};

/// Treble clef outline in line-spacing units, relative to the second line
/// from the bottom (the line the clef's spiral wraps around).
/// Each entry is (c1x, c1y, c2x, c2y, x, y); y grows downward.
const TREBLE_CLEF_START: (f64, f64) = (0.3, 0.0);
const TREBLE_CLEF_CURVES: [(f64, f64, f64, f64, f64, f64); 6] = [
    (-0.6, 0.0, -0.7, -1.0, 0.0, -1.1),
    (0.9, -1.2, 1.0, 0.2, 0.1, 0.5),
    (-1.0, 0.9, -1.2, -1.0, -0.2, -2.0),
    (0.6, -2.8, 0.9, -3.6, 0.6, -4.3),
    (0.3, -4.9, -0.3, -4.2, -0.2, -3.4),
    (0.0, -1.0, 0.3, 0.6, 0.4, 1.6),
];
const TREBLE_CLEF_HOOK: [(f64, f64, f64, f64, f64, f64); 2] = [
    (0.5, 2.2, -0.2, 2.5, -0.5, 2.1),
    (-0.7, 1.8, -0.4, 1.5, -0.2, 1.6),
];

pub(super) fn render_staff_lines(surface: &mut dyn Surface, geometry: &StaffGeometry, color: &str) {
    for i in 0..5 {
        let y = geometry.top + i as f64 * geometry.line_spacing;
        surface.line(geometry.left, y, geometry.right, y, color, STAFF_LINE_WIDTH);
    }
}

/// Draw the clef with its spiral centred at `x`.
pub(super) fn render_treble_clef(surface: &mut dyn Surface, geometry: &StaffGeometry, x: f64, color: &str) {
    let ls = geometry.line_spacing;
    let anchor_y = geometry.slot_y(2);
    let at = |dx: f64, dy: f64| (x + dx * ls, anchor_y + dy * ls);

    let (sx, sy) = at(TREBLE_CLEF_START.0, TREBLE_CLEF_START.1);
    let mut commands = vec![PathCommand::MoveTo(sx, sy)];
    for &(c1x, c1y, c2x, c2y, ex, ey) in TREBLE_CLEF_CURVES.iter().chain(TREBLE_CLEF_HOOK.iter()) {
        let (c1x, c1y) = at(c1x, c1y);
        let (c2x, c2y) = at(c2x, c2y);
        let (ex, ey) = at(ex, ey);
        commands.push(PathCommand::CubicTo(c1x, c1y, c2x, c2y, ex, ey));
    }
    surface.path(&commands, "none", color, CLEF_STROKE_WIDTH * ls / 10.0);
}

/// Staff lines plus clef, the empty staff every view starts from.
pub(super) fn render_staff(surface: &mut dyn Surface, geometry: &StaffGeometry, clef_x: f64, color: &str) {
    render_staff_lines(surface, geometry, color);
    render_treble_clef(surface, geometry, clef_x, color);
}
