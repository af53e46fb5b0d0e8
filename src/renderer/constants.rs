//! Shared constants for strip drawing (millimeters unless noted).

// ── Header block ────────────────────────────────────────────────────
pub(super) const MARKER_SIZE: f64 = 8.0; // feed-direction marker, square
pub(super) const MARKER_MARGIN: f64 = 4.0; // strip start → marker
pub(super) const TITLE_GAP: f64 = 5.0; // marker → title baseline
pub(super) const AUTHOR_GAP: f64 = 10.0; // title → legend
pub(super) const AUTHOR_BASELINE: f64 = 3.0; // title → author baseline
pub(super) const LEGEND_GAP: f64 = 1.0; // legend → grid
pub(super) const TITLE_SIDE_PADDING: f64 = 4.0; // title width budget is body height minus this
pub(super) const LEAD_IN_HALF_WIDTH: f64 = 4.0; // half width of the tapered tip
pub(super) const LEAD_IN_LENGTH: f64 = MARKER_SIZE + 5.0; // tip → full strip width

// ── Fonts (points) ──────────────────────────────────────────────────
pub(super) const TITLE_FONT_MAX_PT: f64 = 30.0;
pub(super) const TITLE_FONT_MIN_PT: f64 = 1.0;
pub(super) const LEGEND_FONT_PT: f64 = 6.0;
pub(super) const PT_TO_MM: f64 = 25.4 / 72.0;
/// Courier glyph advance as a fraction of the font size.
pub(super) const COURIER_ADVANCE: f64 = 0.6;

// ── Grid & notes ────────────────────────────────────────────────────
pub(super) const DASH_FACTOR: f64 = 1.6; // × pin width
pub(super) const DASH_SPACE_FACTOR: f64 = 1.1; // × pin width
pub(super) const NOTE_DIAMETER: f64 = 1.5;
pub(super) const NOTE_STROKE_FACTOR: f64 = 0.6; // × note diameter
pub(super) const LINE_WIDTH: f64 = 0.2;

// ── Colors ──────────────────────────────────────────────────────────
pub(super) const GRID_COLOR: &str = "#8c8c8c";
pub(super) const BORDER_COLOR: &str = "#000000";
pub(super) const NOTE_COLOR: &str = "#000000";
pub(super) const TEXT_COLOR: &str = "#000000";

// ── SVG document ────────────────────────────────────────────────────
pub(super) const PAGE_GAP: f64 = 10.0; // space between stacked pages
