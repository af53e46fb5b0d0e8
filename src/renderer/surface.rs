//! Drawing surface — the paged canvas strips are drawn onto.
//!
//! The layout code only issues directives; a surface decides how they
//! become output. [`SvgSurface`](super::SvgSurface) writes an SVG file,
//! [`DirectiveLog`] records the directives for inspection.

use crate::error::Result;
use std::path::{Path, PathBuf};

/// Stroke color and width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pen {
    pub color: &'static str,
    pub width: f64,
}

/// Dash and gap lengths of a dashed line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashPattern {
    pub dash: f64,
    pub space: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFamily {
    Courier,
    Helvetica,
}

impl FontFamily {
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Courier => "Courier, monospace",
            FontFamily::Helvetica => "Helvetica, Arial, sans-serif",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    pub family: FontFamily,
    pub bold: bool,
    pub size_pt: f64,
}

/// How a closed shape is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeStyle {
    Stroke,
    Fill,
    StrokeAndFill,
}

/// A paged canvas in millimeter coordinates, origin at the page's top-left.
pub trait DrawingSurface {
    /// Start a new page; subsequent directives draw on it.
    fn add_page(&mut self);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen);

    fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen, pattern: DashPattern);

    /// Text with its baseline starting at (x, y).
    fn text(&mut self, x: f64, y: f64, content: &str, font: Font);

    fn image(&mut self, path: &Path, x: f64, y: f64, w: f64, h: f64);

    /// Ellipse inscribed in the box with top-left corner (x, y).
    fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64, style: ShapeStyle, pen: Pen);

    /// Rotate subsequent directives counter-clockwise by `angle` degrees
    /// around (x, y). An angle of 0 restores the unrotated frame.
    fn rotate(&mut self, angle: f64, x: f64, y: f64);

    /// Flush the document to `output`. Called once, after the last strip.
    fn save(&mut self, output: &Path) -> Result<()>;

    /// Release the document without output after a failed run.
    fn abandon(&mut self) {}
}

// ═══════════════════════════════════════════════════════════════════════
// DirectiveLog
// ═══════════════════════════════════════════════════════════════════════

/// One recorded drawing directive.
#[derive(Debug, Clone, PartialEq)]
pub enum Directive {
    AddPage,
    Line { x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen },
    DashedLine { x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen, pattern: DashPattern },
    Text { x: f64, y: f64, content: String, font: Font },
    Image { path: PathBuf, x: f64, y: f64, w: f64, h: f64 },
    Ellipse { x: f64, y: f64, w: f64, h: f64, style: ShapeStyle },
    Rotate { angle: f64, x: f64, y: f64 },
}

/// Surface that records directives instead of drawing them.
#[derive(Debug, Default)]
pub struct DirectiveLog {
    pub directives: Vec<Directive>,
    pub saved_to: Option<PathBuf>,
    pub abandoned: bool,
}

impl DirectiveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page_count(&self) -> usize {
        self.directives
            .iter()
            .filter(|d| matches!(d, Directive::AddPage))
            .count()
    }

    /// Directives drawn on a given page (0-based).
    pub fn page(&self, index: usize) -> &[Directive] {
        let starts: Vec<usize> = self
            .directives
            .iter()
            .enumerate()
            .filter(|(_, d)| matches!(d, Directive::AddPage))
            .map(|(i, _)| i + 1)
            .collect();
        match starts.get(index) {
            Some(&start) => {
                let end = starts
                    .get(index + 1)
                    .map(|&next| next - 1)
                    .unwrap_or(self.directives.len());
                &self.directives[start..end]
            }
            None => &[],
        }
    }

    pub fn ellipses(&self) -> impl Iterator<Item = &Directive> {
        self.directives
            .iter()
            .filter(|d| matches!(d, Directive::Ellipse { .. }))
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.directives.iter().filter_map(|d| match d {
            Directive::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}

impl DrawingSurface for DirectiveLog {
    fn add_page(&mut self) {
        self.directives.push(Directive::AddPage);
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen) {
        self.directives.push(Directive::Line { x1, y1, x2, y2, pen });
    }

    fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen, pattern: DashPattern) {
        self.directives
            .push(Directive::DashedLine { x1, y1, x2, y2, pen, pattern });
    }

    fn text(&mut self, x: f64, y: f64, content: &str, font: Font) {
        self.directives.push(Directive::Text {
            x,
            y,
            content: content.to_string(),
            font,
        });
    }

    fn image(&mut self, path: &Path, x: f64, y: f64, w: f64, h: f64) {
        self.directives.push(Directive::Image {
            path: path.to_path_buf(),
            x,
            y,
            w,
            h,
        });
    }

    fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64, style: ShapeStyle, _pen: Pen) {
        self.directives.push(Directive::Ellipse { x, y, w, h, style });
    }

    fn rotate(&mut self, angle: f64, x: f64, y: f64) {
        self.directives.push(Directive::Rotate { angle, x, y });
    }

    fn save(&mut self, output: &Path) -> Result<()> {
        self.saved_to = Some(output.to_path_buf());
        Ok(())
    }

    fn abandon(&mut self) {
        self.abandoned = true;
    }
}
