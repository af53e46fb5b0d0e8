//! Error types for strip generation.

use thiserror::Error;

/// Result type for music box operations.
pub type Result<T> = std::result::Result<T, MusicBoxError>;

/// Errors that can stop a generation run.
///
/// Events that cannot be played are not errors: they are dropped and
/// counted in [`DropTally`](crate::DropTally).
#[derive(Debug, Error)]
pub enum MusicBoxError {
    /// The profile cannot describe a physical box.
    #[error("invalid music box profile: {0}")]
    InvalidProfile(String),

    /// A profile note name is not one of the twelve pitch classes.
    #[error("unknown note '{name}' at pin {index} of the profile")]
    UnknownNote { name: String, index: usize },

    /// A streaming strip holds no beat, so pushed-back events would never be reached.
    #[error("strip of width {width:.1} holds no beat of width {beat_width:.1}")]
    ZeroBeatCapacity { width: f64, beat_width: f64 },

    /// `generate` was called twice on the same document.
    #[error("document was already generated")]
    AlreadyGenerated,

    /// A strip does not fit on an empty page.
    #[error("strip of height {strip_height:.1} does not fit a page with {usable_height:.1} usable height")]
    StripTallerThanPage { strip_height: f64, usable_height: f64 },

    /// The MIDI file could not be parsed.
    #[error("MIDI error: {0}")]
    Midi(#[from] midly::Error),

    /// SMPTE timecode files carry no beat grid.
    #[error("unsupported MIDI timing: {0}")]
    UnsupportedTiming(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MusicBoxError {
    /// Creates an invalid profile error.
    pub fn invalid_profile(message: impl Into<String>) -> Self {
        Self::InvalidProfile(message.into())
    }
}
