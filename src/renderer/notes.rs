//! Notehead, stem, sharp and ledger line rendering.

use crate::layout::{NoteLayout, StemDirection};
use super::constants::*;
use super::{StaffGeometry, Surface};

/// Paint one note at `x`, using its precomputed layout. Ledger lines are
/// part of the staff and take `ledger_color`.
pub(super) fn render_note(
    surface: &mut dyn Surface,
    geometry: &StaffGeometry,
    layout: &NoteLayout,
    x: f64,
    color: &str,
    ledger_color: &str,
) {
    let ls = geometry.line_spacing;
    let y = geometry.slot_y(layout.slot);

    render_ledger_lines(surface, geometry, layout, x, ledger_color);

    let rx = NOTEHEAD_RX * ls;
    let ry = NOTEHEAD_RY * ls;
    surface.ellipse(x, y, rx, ry, NOTEHEAD_ROTATION, color);

    let stem_width = (STEM_WIDTH * ls).max(1.0);
    let inset = STEM_INSET * ls;
    match layout.stem {
        StemDirection::Up => {
            let sx = x + rx - inset;
            surface.line(sx, y, sx, y - STEM_LENGTH * ls, color, stem_width);
        }
        StemDirection::Down => {
            let sx = x - rx + inset;
            surface.line(sx, y, sx, y + STEM_LENGTH * ls, color, stem_width);
        }
    }

    if layout.is_accidental {
        render_sharp(surface, x - SHARP_OFFSET * ls, y, ls, color);
    }
}

fn render_ledger_lines(surface: &mut dyn Surface, geometry: &StaffGeometry, layout: &NoteLayout, x: f64, color: &str) {
    let half = LEDGER_HALF_WIDTH * geometry.line_spacing;
    for slot in layout.ledger_slots() {
        let ly = geometry.slot_y(slot);
        surface.line(x - half, ly, x + half, ly, color, LEDGER_LINE_WIDTH);
    }
}

/// Sharp sign drawn from strokes: two slanted thick bars crossed by two
/// thin verticals.
fn render_sharp(surface: &mut dyn Surface, cx: f64, cy: f64, ls: f64, color: &str) {
    let half_w = 0.45 * ls;
    let half_h = 1.3 * ls;
    let bar_gap = 0.45 * ls;
    let slant = 0.15 * ls;
    let thin = (0.1 * ls).max(0.8);
    let thick = (0.3 * ls).max(1.5);

    for dx in [-0.2 * ls, 0.2 * ls] {
        surface.line(cx + dx, cy - half_h, cx + dx, cy + half_h, color, thin);
    }
    for dy in [-bar_gap, bar_gap] {
        surface.line(cx - half_w, cy + dy + slant, cx + half_w, cy + dy - slant, color, thick);
    }
}
