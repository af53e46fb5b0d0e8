//! Strip drawing — pin grid, beat lines, borders and note holes.

use super::constants::*;
use super::header::{draw_header, HeaderBlock};
use super::layout::Strip;
use super::surface::{DashPattern, DrawingSurface, Pen, ShapeStyle};
use crate::model::MusicBoxProfile;
use std::path::Path;

/// Page y of a pin row on a strip centered at `y`. Row 0 is nearest the bottom edge.
pub(super) fn row_y(profile: &MusicBoxProfile, y: f64, row: usize) -> f64 {
    y + profile.strip_body_height() / 2.0 - profile.row_offset(row)
}

/// Draw a complete strip between `x0` and `x1`, centered vertically on `y`.
#[allow(clippy::too_many_arguments)]
pub(super) fn draw_strip<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    strip: &Strip,
    header: &HeaderBlock,
    marker: &Path,
    x0: f64,
    x1: f64,
    y: f64,
) {
    let x_start = if strip.is_first {
        draw_header(surface, profile, header, marker, x0, y)
    } else {
        x0
    };
    draw_body(surface, profile, strip, x_start, x1, y);
    draw_notes(surface, profile, strip, x_start, y);
}

fn draw_body<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    strip: &Strip,
    x_start: f64,
    x1: f64,
    y: f64,
) {
    let grid = Pen {
        color: GRID_COLOR,
        width: LINE_WIDTH,
    };
    let grid_end = x_start + strip.beat_capacity as f64 * profile.beat_width;

    for row in 0..profile.note_count() {
        let ry = row_y(profile, y, row);
        surface.line(x_start, ry, grid_end, ry, grid);
    }

    // Beat lines span the pin rows only
    let low = row_y(profile, y, 0);
    let high = row_y(profile, y, profile.note_count() - 1);
    let dashes = DashPattern {
        dash: DASH_FACTOR * profile.pin_width,
        space: DASH_SPACE_FACTOR * profile.pin_width,
    };
    for beat in 0..=strip.beat_capacity {
        let x = x_start + beat as f64 * profile.beat_width;
        if beat % 2 == 0 {
            surface.line(x, high, x, low, grid);
        } else {
            surface.dashed_line(x, high, x, low, grid, dashes);
        }
    }

    let border = Pen {
        color: BORDER_COLOR,
        width: LINE_WIDTH,
    };
    let half = profile.strip_body_height() / 2.0;
    surface.line(x_start, y - half, x1, y - half, border);
    surface.line(x_start, y + half, x1, y + half, border);
}

fn draw_notes<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    profile: &MusicBoxProfile,
    strip: &Strip,
    x_start: f64,
    y: f64,
) {
    let pen = Pen {
        color: NOTE_COLOR,
        width: NOTE_DIAMETER * NOTE_STROKE_FACTOR,
    };
    for note in &strip.notes {
        let cx = x_start + note.x_offset;
        let cy = row_y(profile, y, note.row);
        surface.ellipse(
            cx - NOTE_DIAMETER / 2.0,
            cy - NOTE_DIAMETER / 2.0,
            NOTE_DIAMETER,
            NOTE_DIAMETER,
            ShapeStyle::StrokeAndFill,
            pen,
        );
    }
}
