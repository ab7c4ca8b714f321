//! SVG surface. Accumulates SVG elements and produces the final document.
//!
//! This is the "render to static image" backend: the string returned by
//! [`SvgSurface::finish`] is a self-contained image that a host can save
//! or hand to a download action.
//!
//! Coordinates are written with one decimal (`{:.1}`) and font sizes and
//! rotations as integers, so the same drawing always produces the same
//! bytes and tests can match on attribute text.

use super::{PathCommand, Surface};

pub struct SvgSurface {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Close the document and return the SVG text.
    pub fn finish(self) -> String {
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {} {}" width="{}" height="{}" style="font-family: 'Georgia', 'Times New Roman', serif;">"#,
            self.width, self.height, self.width, self.height
        );
        svg.push('\n');
        for el in &self.elements {
            svg.push_str("  ");
            svg.push_str(el);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, color: &str, width: f64) {
        self.elements.push(format!(
            r#"<line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            x1, y1, x2, y2, color, width
        ));
    }

    fn rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
            x, y, w, h, fill
        ));
    }

    fn ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, rotation: f64, fill: &str) {
        self.elements.push(format!(
            r#"<ellipse cx="{:.1}" cy="{:.1}" rx="{:.1}" ry="{:.1}" fill="{}" stroke="none" transform="rotate({:.0},{:.1},{:.1})"/>"#,
            cx, cy, rx, ry, fill, rotation, cx, cy
        ));
    }

    fn path(&mut self, commands: &[PathCommand], fill: &str, stroke: &str, stroke_width: f64) {
        self.elements.push(format!(
            r#"<path d="{}" fill="{}" stroke="{}" stroke-width="{:.1}" stroke-linecap="round"/>"#,
            path_data(commands), fill, stroke, stroke_width
        ));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, size: f64, weight: &str, fill: &str, anchor: &str) {
        let escaped = content
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;");
        self.elements.push(format!(
            r#"<text x="{:.1}" y="{:.1}" font-size="{:.0}" font-weight="{}" fill="{}" text-anchor="{}">{}</text>"#,
            x, y, size, weight, fill, anchor, escaped
        ));
    }
}

/// Convert path commands to an SVG `d` attribute.
fn path_data(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for cmd in commands {
        if !d.is_empty() {
            d.push(' ');
        }
        match *cmd {
            PathCommand::MoveTo(x, y) => d.push_str(&format!("M{:.1},{:.1}", x, y)),
            PathCommand::LineTo(x, y) => d.push_str(&format!("L{:.1},{:.1}", x, y)),
            PathCommand::CubicTo(c1x, c1y, c2x, c2y, x, y) => d.push_str(&format!(
                "C{:.1},{:.1} {:.1},{:.1} {:.1},{:.1}",
                c1x, c1y, c2x, c2y, x, y
            )),
            PathCommand::Close => d.push('Z'),
        }
    }
    d
}
