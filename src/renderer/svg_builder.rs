//! SVG surface — accumulates page elements and writes one SVG document.
//!
//! Pages are stacked vertically, separated by a gap, each with a white
//! background. User units are millimeters.

use super::constants::*;
use super::surface::{DashPattern, DrawingSurface, Font, Pen, ShapeStyle};
use crate::error::Result;
use std::path::Path;

pub struct SvgSurface {
    pages: Vec<Vec<String>>,
    width: f64,
    height: f64,
    rotated: bool,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            pages: Vec::new(),
            width,
            height,
            rotated: false,
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn push(&mut self, element: String) {
        if self.pages.is_empty() {
            self.pages.push(Vec::new());
        }
        if let Some(page) = self.pages.last_mut() {
            page.push(element);
        }
    }

    fn close_rotation(&mut self) {
        if self.rotated {
            self.rotated = false;
            self.push("</g>".to_string());
        }
    }

    pub fn build(mut self) -> String {
        self.close_rotation();
        let pages = self.pages.len().max(1);
        let total_height = pages as f64 * self.height + (pages - 1) as f64 * PAGE_GAP;

        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" viewBox="0 0 {w} {h}" width="{w}mm" height="{h}mm">"#,
            w = self.width,
            h = total_height
        );
        svg.push('\n');
        for (i, page) in self.pages.iter().enumerate() {
            let offset = i as f64 * (self.height + PAGE_GAP);
            svg.push_str(&format!(r#"  <g transform="translate(0,{:.2})">"#, offset));
            svg.push('\n');
            svg.push_str(&format!(
                r#"    <rect x="0" y="0" width="{}" height="{}" fill="white"/>"#,
                self.width, self.height
            ));
            svg.push('\n');
            for el in page {
                svg.push_str("    ");
                svg.push_str(el);
                svg.push('\n');
            }
            svg.push_str("  </g>\n");
        }
        svg.push_str("</svg>\n");
        svg
    }
}

fn escape(content: &str) -> String {
    content
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl DrawingSurface for SvgSurface {
    fn add_page(&mut self) {
        self.close_rotation();
        self.pages.push(Vec::new());
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen) {
        self.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}"/>"#,
            x1, y1, x2, y2, pen.color, pen.width
        ));
    }

    fn dashed_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, pen: Pen, pattern: DashPattern) {
        self.push(format!(
            r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="{:.2}" stroke-dasharray="{:.2} {:.2}"/>"#,
            x1, y1, x2, y2, pen.color, pen.width, pattern.dash, pattern.space
        ));
    }

    fn text(&mut self, x: f64, y: f64, content: &str, font: Font) {
        self.push(format!(
            r#"<text x="{:.2}" y="{:.2}" font-family="{}" font-size="{:.2}" font-weight="{}" fill="{}">{}</text>"#,
            x,
            y,
            font.family.css_name(),
            font.size_pt * PT_TO_MM,
            if font.bold { "bold" } else { "normal" },
            TEXT_COLOR,
            escape(content)
        ));
    }

    fn image(&mut self, path: &Path, x: f64, y: f64, w: f64, h: f64) {
        self.push(format!(
            r#"<image xlink:href="{}" x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/>"#,
            escape(&path.to_string_lossy()),
            x,
            y,
            w,
            h
        ));
    }

    fn ellipse(&mut self, x: f64, y: f64, w: f64, h: f64, style: ShapeStyle, pen: Pen) {
        let (fill, stroke) = match style {
            ShapeStyle::Stroke => ("none", pen.color),
            ShapeStyle::Fill => (pen.color, "none"),
            ShapeStyle::StrokeAndFill => (pen.color, pen.color),
        };
        self.push(format!(
            r#"<ellipse cx="{:.2}" cy="{:.2}" rx="{:.2}" ry="{:.2}" fill="{}" stroke="{}" stroke-width="{:.2}"/>"#,
            x + w / 2.0,
            y + h / 2.0,
            w / 2.0,
            h / 2.0,
            fill,
            stroke,
            pen.width
        ));
    }

    fn rotate(&mut self, angle: f64, x: f64, y: f64) {
        self.close_rotation();
        if angle != 0.0 {
            // SVG angles turn clockwise
            self.push(format!(
                r#"<g transform="rotate({:.2},{:.2},{:.2})">"#,
                -angle, x, y
            ));
            self.rotated = true;
        }
    }

    fn save(&mut self, output: &Path) -> Result<()> {
        let blank = SvgSurface::new(self.width, self.height);
        let surface = std::mem::replace(self, blank);
        let pages = surface.page_count();
        std::fs::write(output, surface.build())?;
        log::info!("Wrote {} page(s) to {}", pages, output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::surface::FontFamily;

    const PEN: Pen = Pen { color: "#000000", width: 0.2 };

    #[test]
    fn pages_are_stacked_with_gap() {
        let mut svg = SvgSurface::new(100.0, 50.0);
        svg.add_page();
        svg.line(0.0, 0.0, 10.0, 10.0, PEN);
        svg.add_page();
        svg.ellipse(1.0, 1.0, 2.0, 2.0, ShapeStyle::StrokeAndFill, PEN);
        assert_eq!(svg.page_count(), 2);

        let out = svg.build();
        assert!(out.starts_with("<svg"));
        assert!(out.contains(r#"viewBox="0 0 100 110""#));
        assert!(out.contains(r#"translate(0,60.00)"#));
        assert!(out.contains(r#"<ellipse cx="2.00" cy="2.00" rx="1.00""#));
        assert!(out.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn rotation_group_is_closed_by_zero_angle() {
        let mut svg = SvgSurface::new(100.0, 50.0);
        svg.add_page();
        svg.rotate(90.0, 10.0, 20.0);
        let font = Font { family: FontFamily::Courier, bold: true, size_pt: 12.0 };
        svg.text(10.0, 20.0, "Tom & Jerry", font);
        svg.rotate(0.0, 20.0, 10.0);
        let out = svg.build();
        assert!(out.contains(r#"rotate(-90.00,10.00,20.00)"#));
        assert!(out.contains("Tom &amp; Jerry"));
        assert_eq!(out.matches("<g ").count(), out.matches("</g>").count());
    }

    #[test]
    fn unclosed_rotation_is_closed_on_build() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.add_page();
        svg.rotate(45.0, 0.0, 0.0);
        let out = svg.build();
        assert_eq!(out.matches("<g ").count(), out.matches("</g>").count());
    }
}
