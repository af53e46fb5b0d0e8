//! Music box profile loading, validation and pin lookup.

use crate::error::{MusicBoxError, Result};
use crate::model::{BoxNote, MusicBoxProfile};
use crate::pitch::{canonical_name, note_to_pitch, notes_match, parse_note_spec};
use serde::Deserialize;
use std::ops::RangeInclusive;
use std::path::Path;

// ═══════════════════════════════════════════════════════════════════════
// Profile file format
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Deserialize)]
struct ProfileFile {
    #[serde(default)]
    meta: ProfileMeta,
    dimensions: ProfileDimensions,
    music_props: MusicProps,
}

#[derive(Debug, Default, Deserialize)]
struct ProfileMeta {
    description: Option<String>,
    manufacturer: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProfileDimensions {
    pin_width: f64,
    start_margin: f64,
    end_margin: f64,
    beat_width: f64,
}

#[derive(Debug, Deserialize)]
struct MusicProps {
    /// Note specs such as "C5" or "F#6", in pin order
    notes: Vec<String>,
    clef: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════
// Profile operations
// ═══════════════════════════════════════════════════════════════════════

impl MusicBoxProfile {
    /// Parse a profile from its JSON file format and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ProfileFile = serde_json::from_str(json)?;

        let notes = file
            .music_props
            .notes
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                parse_note_spec(spec)
                    .map(|(name, octave)| BoxNote { name, octave })
                    .ok_or_else(|| MusicBoxError::UnknownNote {
                        name: spec.clone(),
                        index,
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let profile = MusicBoxProfile {
            notes,
            pin_width: file.dimensions.pin_width,
            start_margin: file.dimensions.start_margin,
            end_margin: file.dimensions.end_margin,
            beat_width: file.dimensions.beat_width,
            clef: file.music_props.clef,
            description: file.meta.description,
            manufacturer: file.meta.manufacturer,
        };
        profile.validate()?;
        Ok(profile)
    }

    /// Read and validate a profile file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
    }

    /// Check that the profile describes a drawable box.
    pub fn validate(&self) -> Result<()> {
        if self.notes.is_empty() {
            return Err(MusicBoxError::invalid_profile("profile has no notes"));
        }
        if let Some((index, note)) = self
            .notes
            .iter()
            .enumerate()
            .find(|(_, n)| canonical_name(&n.name).is_none())
        {
            return Err(MusicBoxError::UnknownNote {
                name: note.name.clone(),
                index,
            });
        }
        if !(self.pin_width > 0.0) {
            return Err(MusicBoxError::invalid_profile(format!(
                "pin_width must be positive, got {}",
                self.pin_width
            )));
        }
        if !(self.beat_width > 0.0) {
            return Err(MusicBoxError::invalid_profile(format!(
                "beat_width must be positive, got {}",
                self.beat_width
            )));
        }
        if !(self.start_margin >= 0.0 && self.end_margin >= 0.0) {
            return Err(MusicBoxError::invalid_profile(format!(
                "margins must not be negative, got {} and {}",
                self.start_margin, self.end_margin
            )));
        }
        Ok(())
    }

    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Pin row of a note, matching names enharmonically and octaves exactly.
    pub fn find_note_index(&self, note: &str, octave: i32) -> Option<usize> {
        self.notes
            .iter()
            .position(|n| n.octave == octave && notes_match(&n.name, note))
    }

    pub fn is_playable(&self, note: &str, octave: i32) -> bool {
        self.find_note_index(note, octave).is_some()
    }

    /// Height of a strip across all pin rows, margins included.
    ///
    /// Every vertical measurement of a strip derives from this value.
    pub fn strip_body_height(&self) -> f64 {
        self.pin_width * (self.note_count() as f64 - 1.0) + self.start_margin + self.end_margin
    }

    /// Distance of a pin row from the strip's start edge.
    pub fn row_offset(&self, row: usize) -> f64 {
        self.start_margin + row as f64 * self.pin_width
    }

    /// Lowest to highest MIDI key the comb can sound.
    pub fn pitch_range(&self) -> Option<RangeInclusive<i32>> {
        let pitches = self
            .notes
            .iter()
            .filter_map(|n| note_to_pitch(&n.name, n.octave));
        let (min, max) = pitches.fold(None, |acc: Option<(i32, i32)>, p| match acc {
            Some((lo, hi)) => Some((lo.min(p), hi.max(p))),
            None => Some((p, p)),
        })?;
        Some(min..=max)
    }
}

impl std::fmt::Display for MusicBoxProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "MusicBoxProfile")?;
        writeln!(f, "- Description: {}", self.description.as_deref().unwrap_or("-"))?;
        writeln!(f, "- Manufacturer: {}", self.manufacturer.as_deref().unwrap_or("-"))?;
        writeln!(f, "- Notes count: {}", self.note_count())?;
        write!(f, "- Pin width: {}", self.pin_width)
    }
}
