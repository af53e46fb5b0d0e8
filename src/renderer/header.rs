//! Header block of the first strip: feed marker, title, author and pin legend.
//!
//! The block is drawn rotated a quarter turn so its text runs across the
//! strip. Its length along the strip is fixed before layout starts, so the
//! layout engine can reserve it and the drawing code can fill it.

use super::constants::*;
use super::strip::row_y;
use super::surface::{DrawingSurface, Font, FontFamily, Pen};
use crate::model::{MusicBoxProfile, SongHeader};
use std::path::Path;

/// Measured header block.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderBlock {
    pub header: SongHeader,
    /// Title and author font size, fitted to the strip height
    pub title_font_pt: f64,
    /// Length of the block along the strip
    pub footprint: f64,
}

/// Width of a string set in Courier.
fn courier_width(text: &str, size_pt: f64) -> f64 {
    text.chars().count() as f64 * COURIER_ADVANCE * size_pt * PT_TO_MM
}

impl HeaderBlock {
    pub fn measure(profile: &MusicBoxProfile, header: &SongHeader) -> Self {
        let budget = profile.strip_body_height() - TITLE_SIDE_PADDING;
        let longest = header
            .title
            .chars()
            .count()
            .max(header.author.chars().count())
            .max(1) as f64;
        let fitted = budget / (longest * COURIER_ADVANCE * PT_TO_MM);
        let title_font_pt = fitted.clamp(TITLE_FONT_MIN_PT, TITLE_FONT_MAX_PT);

        let title = title_font_pt * PT_TO_MM;
        let legend = LEGEND_FONT_PT * PT_TO_MM;
        let footprint = MARKER_MARGIN
            + MARKER_SIZE
            + title
            + TITLE_GAP
            + title
            + AUTHOR_GAP
            + legend
            + LEGEND_GAP;

        Self {
            header: header.clone(),
            title_font_pt,
            footprint,
        }
    }

    fn title_font(&self) -> Font {
        Font {
            family: FontFamily::Courier,
            bold: true,
            size_pt: self.title_font_pt,
        }
    }
}

/// Draw the header block starting at `x0` on a strip centered at `y`.
/// Returns the x where the note grid begins.
pub(super) fn draw_header<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    block: &HeaderBlock,
    marker: &Path,
    x0: f64,
    y: f64,
) -> f64 {
    let title_mm = block.title_font_pt * PT_TO_MM;
    let legend_mm = LEGEND_FONT_PT * PT_TO_MM;
    let font = block.title_font();

    // Rotated frame: +y runs along the strip, +x runs toward the first pin row's edge
    surface.rotate(90.0, x0, y);
    let mut cursor = y + MARKER_MARGIN;
    surface.image(marker, x0 - MARKER_SIZE / 2.0, cursor, MARKER_SIZE, MARKER_SIZE);

    cursor += MARKER_SIZE + title_mm + TITLE_GAP;
    let title = &block.header.title;
    surface.text(x0 - courier_width(title, font.size_pt) / 2.0, cursor, title, font);

    let author = &block.header.author;
    surface.text(
        x0 - courier_width(author, font.size_pt) / 2.0,
        cursor + title_mm + AUTHOR_BASELINE,
        author,
        font,
    );
    cursor += title_mm + AUTHOR_GAP;

    draw_pin_legend(surface, profile, x0, y, cursor + legend_mm);
    surface.rotate(0.0, x0, y);

    let x_start = x0 + block.footprint;
    draw_lead_in(surface, profile, x0, x_start, y);
    x_start
}

/// One label per pin: the letter at full legend size, the accidental at half.
fn draw_pin_legend<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    x0: f64,
    y: f64,
    baseline: f64,
) {
    let legend_mm = LEGEND_FONT_PT * PT_TO_MM;
    let letter_font = Font {
        family: FontFamily::Helvetica,
        bold: true,
        size_pt: LEGEND_FONT_PT,
    };
    let accidental_font = Font {
        size_pt: LEGEND_FONT_PT / 2.0,
        ..letter_font
    };

    for (row, note) in profile.notes.iter().enumerate() {
        // A page point at row height sits this far along the rotated x axis
        let x = x0 + (y - row_y(profile, y, row)) - legend_mm / 3.0;
        let mut chars = note.name.chars();
        if let Some(letter) = chars.next() {
            surface.text(x, baseline, &letter.to_string(), letter_font);
        }
        let accidental: String = chars.collect();
        if !accidental.is_empty() {
            surface.text(x + legend_mm * 0.6, baseline, &accidental, accidental_font);
        }
    }
}

/// Tapered tip in front of the header and the borders alongside it.
fn draw_lead_in<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    x0: f64,
    x_start: f64,
    y: f64,
) {
    let half = profile.strip_body_height() / 2.0;
    let pen = Pen {
        color: BORDER_COLOR,
        width: LINE_WIDTH,
    };
    let x_taper = x0 + LEAD_IN_LENGTH;

    surface.line(x_taper, y - half, x_start, y - half, pen);
    surface.line(x_taper, y + half, x_start, y + half, pen);
    surface.line(x0, y - LEAD_IN_HALF_WIDTH, x_taper, y - half, pen);
    surface.line(x0, y + LEAD_IN_HALF_WIDTH, x_taper, y + half, pen);
}
