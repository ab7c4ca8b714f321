//! Shared constants for the staff renderers.
//!
//! Note-glyph proportions are expressed as multiples of the staff's line
//! spacing so the same glyph scales between the full staff (10 units),
//! the preview (8 units) and the printable sheet.

// ── Notehead & stem (× line spacing) ────────────────────────────────
pub(super) const NOTEHEAD_RX: f64 = 0.6;
pub(super) const NOTEHEAD_RY: f64 = 0.4;
pub(super) const NOTEHEAD_ROTATION: f64 = -15.0; // degrees
pub(super) const STEM_LENGTH: f64 = 3.5;
pub(super) const STEM_WIDTH: f64 = 0.15;
pub(super) const STEM_INSET: f64 = 0.1; // stem sits just inside the head's edge
pub(super) const LEDGER_HALF_WIDTH: f64 = 1.2;
pub(super) const SHARP_OFFSET: f64 = 2.0; // sharp centre, left of the head
pub(super) const OCTAVE_LABEL_RISE: f64 = 3.0;

// ── Stroke widths (user units) ──────────────────────────────────────
pub(super) const STAFF_LINE_WIDTH: f64 = 1.0;
pub(super) const LEDGER_LINE_WIDTH: f64 = 1.0;
pub(super) const CLEF_STROKE_WIDTH: f64 = 1.6;

// ── Full staff view ─────────────────────────────────────────────────
pub(super) const STAFF_VIEW_WIDTH: f64 = 800.0;
pub(super) const STAFF_VIEW_HEIGHT: f64 = 240.0;
pub(super) const STAFF_VIEW_LINE_SPACING: f64 = 10.0;
pub(super) const STAFF_VIEW_NOTES_LEFT: f64 = 80.0; // first note column
pub(super) const STAFF_VIEW_NOTES_MARGIN: f64 = 100.0; // width not used by note columns

// ── Single-note preview ─────────────────────────────────────────────
pub(super) const PREVIEW_WIDTH: f64 = 200.0;
pub(super) const PREVIEW_HEIGHT: f64 = 120.0;
pub(super) const PREVIEW_LINE_SPACING: f64 = 8.0;

// ── Staff margins shared by the interactive views ───────────────────
pub(super) const STAFF_LEFT: f64 = 40.0;
pub(super) const STAFF_RIGHT_MARGIN: f64 = 20.0;
pub(super) const CLEF_X: f64 = 45.0;

// ── Printable sheet ─────────────────────────────────────────────────
pub(super) const SHEET_MIN_WIDTH: f64 = 800.0;
pub(super) const SHEET_WIDTH_PER_NOTE: f64 = 50.0;
pub(super) const SHEET_WIDTH_PADDING: f64 = 100.0;
pub(super) const SHEET_ROW_HEIGHT: f64 = 150.0;
pub(super) const SHEET_BOTTOM_PADDING: f64 = 50.0;
pub(super) const SHEET_FIRST_STAFF_TOP: f64 = 60.0;
pub(super) const SHEET_TITLE_Y: f64 = 30.0;
pub(super) const SHEET_STAFF_MARGIN: f64 = 40.0;
pub(super) const SHEET_CLEF_X: f64 = 60.0;
pub(super) const SHEET_NOTES_LEFT: f64 = 100.0;
pub(super) const SHEET_NOTES_MARGIN: f64 = 120.0;
pub(super) const SHEET_LINE_SPACING: f64 = 10.0;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const NOTE_COLOR: &str = "#000000";
pub(super) const HIGHLIGHT_COLOR: &str = "#4f46e5";
pub(super) const LABEL_COLOR: &str = "#666666";
pub(super) const SHEET_COLOR: &str = "#4338ca";
pub(super) const BACKGROUND_COLOR: &str = "#ffffff";
