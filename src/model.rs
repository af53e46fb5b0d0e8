//! Data model for music box profiles, note events and page setup.
//!
//! All physical dimensions are in millimeters; font sizes are in points.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One pin of the music box comb: a pitch name and its octave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxNote {
    /// Pitch name without octave digits (e.g. "C", "F#", "Bb")
    pub name: String,
    pub octave: i32,
}

impl BoxNote {
    pub fn new(name: impl Into<String>, octave: i32) -> Self {
        Self {
            name: name.into(),
            octave,
        }
    }
}

impl std::fmt::Display for BoxNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.name, self.octave)
    }
}

/// Static description of a physical music box.
///
/// `notes` is ordered by pin position; index 0 is the first pin row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MusicBoxProfile {
    pub notes: Vec<BoxNote>,
    /// Distance between adjacent pin rows
    pub pin_width: f64,
    /// Extra paper before the first pin row
    pub start_margin: f64,
    /// Extra paper after the last pin row
    pub end_margin: f64,
    /// Paper length per beat
    pub beat_width: f64,
    /// Informational only
    #[serde(default)]
    pub clef: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub manufacturer: Option<String>,
}

/// One sounded note from the input feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    /// Pitch name (e.g. "C#")
    pub note: String,
    pub octave: i32,
    /// Time position in beats; non-decreasing across a feed
    pub beat: f64,
    /// MIDI key number (60 = C4)
    pub raw_pitch: u8,
}

impl NoteEvent {
    pub fn new(note: impl Into<String>, octave: i32, beat: f64, raw_pitch: u8) -> Self {
        Self {
            note: note.into(),
            octave,
            beat,
            raw_pitch,
        }
    }
}

/// Title block printed on the first strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongHeader {
    pub title: String,
    pub author: String,
}

impl Default for SongHeader {
    fn default() -> Self {
        Self {
            title: "NO-TITLE".into(),
            author: "NO-AUTHOR".into(),
        }
    }
}

/// Paper size, margins and strip spacing of the output document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSetup {
    pub page_width: f64,
    pub page_height: f64,
    pub left_margin: f64,
    pub top_margin: f64,
    pub right_margin: f64,
    pub bottom_margin: f64,
    /// Vertical gap between consecutive strips
    pub strip_separation: f64,
    /// Feed-direction marker drawn on the header strip
    pub marker_image: PathBuf,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            page_width: 279.4,
            page_height: 215.9,
            left_margin: 8.0,
            top_margin: 6.0,
            right_margin: 8.0,
            bottom_margin: 6.0,
            strip_separation: 0.0,
            marker_image: PathBuf::from("res/triangle_tiny.png"),
        }
    }
}

impl PageSetup {
    /// Horizontal space available to a strip between the side margins.
    pub fn available_width(&self) -> f64 {
        self.page_width - self.left_margin - self.right_margin
    }
}
