//! Printable practice sheet: several staves of notes, exportable as SVG.

use std::path::{Path, PathBuf};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::{Note, ScaleSpec};
use super::constants::*;
use super::{paint_notes, paint_staff, Palette, PlacedNote, StaffGeometry, Surface, SvgSurface};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetOptions {
    /// Number of staves on the sheet
    pub lines_count: usize,
    /// Notes on each staff
    pub notes_per_line: usize,
    /// Draw notes at random instead of cycling through the scale
    pub randomized: bool,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self { lines_count: 4, notes_per_line: 12, randomized: false }
    }
}

impl SheetOptions {
    fn lines(&self) -> usize {
        self.lines_count.max(1)
    }

    fn per_line(&self) -> usize {
        self.notes_per_line.max(1)
    }
}

#[derive(Debug, Clone)]
pub struct PracticeSheet {
    spec: ScaleSpec,
    source: Vec<Note>,
    options: SheetOptions,
    sequence: Vec<Note>,
}

impl PracticeSheet {
    /// Build a sheet from the available `notes`. `rng` is only consulted
    /// for randomized sheets.
    pub fn new<R: Rng + ?Sized>(spec: ScaleSpec, notes: Vec<Note>, options: SheetOptions, rng: &mut R) -> Self {
        let mut sheet = Self { spec, source: notes, options, sequence: Vec::new() };
        sheet.regenerate(rng);
        sheet
    }

    /// Redraw the note sequence. Non-random sheets come out identical.
    pub fn regenerate<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let total = self.options.lines() * self.options.per_line();
        self.sequence = if self.source.is_empty() {
            Vec::new()
        } else if self.options.randomized {
            (0..total)
                .map(|_| self.source[rng.random_range(0..self.source.len())])
                .collect()
        } else {
            self.source.iter().copied().cycle().take(total).collect()
        };
        log::debug!(
            "sheet for {} regenerated with {} notes",
            self.spec.full_name(),
            self.sequence.len()
        );
    }

    pub fn options(&self) -> &SheetOptions {
        &self.options
    }

    /// Every note on the sheet, in reading order.
    pub fn notes(&self) -> &[Note] {
        &self.sequence
    }

    /// Notes grouped by staff.
    pub fn rows(&self) -> impl Iterator<Item = &[Note]> + '_ {
        self.sequence.chunks(self.options.per_line())
    }

    pub fn width(&self) -> f64 {
        SHEET_MIN_WIDTH.max(self.options.per_line() as f64 * SHEET_WIDTH_PER_NOTE + SHEET_WIDTH_PADDING)
    }

    pub fn height(&self) -> f64 {
        SHEET_ROW_HEIGHT * self.options.lines() as f64 + SHEET_BOTTOM_PADDING
    }

    pub fn title(&self) -> String {
        format!("{} scale", self.spec.full_name())
    }

    fn row_geometry(&self, row: usize) -> StaffGeometry {
        StaffGeometry {
            left: SHEET_STAFF_MARGIN,
            right: self.width() - SHEET_STAFF_MARGIN,
            top: SHEET_FIRST_STAFF_TOP + row as f64 * SHEET_ROW_HEIGHT,
            line_spacing: SHEET_LINE_SPACING,
        }
    }

    fn note_x(&self, column: usize) -> f64 {
        let step = (self.width() - SHEET_NOTES_MARGIN) / self.options.per_line() as f64;
        SHEET_NOTES_LEFT + column as f64 * step
    }

    pub fn render(&self, surface: &mut dyn Surface) {
        let width = self.width();
        surface.rect(0.0, 0.0, width, self.height(), BACKGROUND_COLOR);
        surface.text(width / 2.0, SHEET_TITLE_Y, &self.title(), 20.0, "bold", SHEET_COLOR, "middle");

        let palette = Palette { staff: SHEET_COLOR, note: SHEET_COLOR, highlight: SHEET_COLOR };
        let mut rows = self.rows();
        for row in 0..self.options.lines() {
            let geometry = self.row_geometry(row);
            paint_staff(surface, &geometry, SHEET_CLEF_X, palette.staff);

            let notes = rows.next().unwrap_or(&[]);
            let placed: Vec<PlacedNote> = notes
                .iter()
                .enumerate()
                .map(|(i, &note)| PlacedNote::new(note, self.note_x(i)))
                .collect();
            paint_notes(surface, &geometry, &placed, None, &palette);
        }
    }

    /// Render to a standalone SVG document.
    pub fn render_svg(&self) -> String {
        let mut svg = SvgSurface::new(self.width(), self.height());
        self.render(&mut svg);
        svg.finish()
    }

    /// Download name, e.g. `scale_C#_Harmonic_minor.svg`.
    pub fn export_file_name(&self) -> String {
        let name = format!("scale_{}_{}", self.spec.key, self.spec.scale_type.label());
        let name: String = name
            .chars()
            .map(|c| if c.is_whitespace() { '_' } else { c })
            .collect();
        format!("{name}.svg")
    }

    /// Write the rendered sheet into `dir` and return the file's path.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(self.export_file_name());
        std::fs::write(&path, self.render_svg())?;
        log::info!("exported practice sheet to {}", path.display());
        Ok(path)
    }
}
