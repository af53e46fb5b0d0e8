//! Strip layout — partitions the note feed into fixed-width strips.
//!
//! The engine consumes a shared queue of beat-ordered events, one strip at
//! a time. Each strip covers `beat_capacity` beats starting where the
//! previous strip ended; events past its window are returned to the front
//! of the queue for the next strip.

use super::header::HeaderBlock;
use crate::error::{MusicBoxError, Result};
use crate::model::{MusicBoxProfile, NoteEvent, SongHeader};
use serde::Serialize;
use std::collections::VecDeque;
use std::ops::{AddAssign, RangeInclusive};

// ═══════════════════════════════════════════════════════════════════════
// Layout structures
// ═══════════════════════════════════════════════════════════════════════

/// Events dropped instead of placed, by reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DropTally {
    /// Beat earlier than the strip being produced
    pub below_window: usize,
    /// Pitch outside the comb's lowest and highest pins
    pub out_of_range: usize,
    /// Pitch inside the range but with no pin of its own
    pub unplayable: usize,
}

impl DropTally {
    pub fn total(&self) -> usize {
        self.below_window + self.out_of_range + self.unplayable
    }
}

impl AddAssign for DropTally {
    fn add_assign(&mut self, other: Self) {
        self.below_window += other.below_window;
        self.out_of_range += other.out_of_range;
        self.unplayable += other.unplayable;
    }
}

/// An event assigned to a pin row of a strip.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedNote {
    pub event: NoteEvent,
    pub row: usize,
    /// Distance from the strip's first beat line
    pub x_offset: f64,
}

/// One paper strip.
#[derive(Debug, Clone, PartialEq)]
pub struct Strip {
    /// Carries the song header
    pub is_first: bool,
    /// Beat at the strip's first beat line
    pub first_beat: f64,
    pub beat_capacity: u32,
    pub notes: Vec<PlacedNote>,
    /// Events discarded while producing this strip
    pub dropped: DropTally,
}

impl Strip {
    /// Last beat drawn on this strip (inclusive).
    pub fn max_beat(&self) -> f64 {
        self.first_beat + self.beat_capacity as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutState {
    /// The next strip is the header strip.
    AwaitingHeader,
    Streaming,
}

// ═══════════════════════════════════════════════════════════════════════
// StripLayoutEngine
// ═══════════════════════════════════════════════════════════════════════

pub struct StripLayoutEngine<'a> {
    profile: &'a MusicBoxProfile,
    header: HeaderBlock,
    pitch_range: RangeInclusive<i32>,
    state: LayoutState,
    dropped: DropTally,
    strips: usize,
}

impl<'a> StripLayoutEngine<'a> {
    /// Validates the profile and measures the header block.
    pub fn new(profile: &'a MusicBoxProfile, header: &SongHeader) -> Result<Self> {
        profile.validate()?;
        let pitch_range = profile
            .pitch_range()
            .ok_or_else(|| MusicBoxError::invalid_profile("profile has no playable pitch"))?;

        Ok(Self {
            profile,
            header: HeaderBlock::measure(profile, header),
            pitch_range,
            state: LayoutState::AwaitingHeader,
            dropped: DropTally::default(),
            strips: 0,
        })
    }

    pub fn state(&self) -> LayoutState {
        self.state
    }

    pub fn header_block(&self) -> &HeaderBlock {
        &self.header
    }

    /// Length the header strip reserves before its first beat line.
    pub fn header_footprint(&self) -> f64 {
        self.header.footprint
    }

    /// Drops accumulated over every strip produced so far.
    pub fn dropped(&self) -> DropTally {
        self.dropped
    }

    pub fn strips_produced(&self) -> usize {
        self.strips
    }

    /// Whole beats that fit in `available_width`, less the header if `is_first`.
    pub fn beat_capacity(&self, available_width: f64, is_first: bool) -> u32 {
        let drawable = if is_first {
            available_width - self.header.footprint
        } else {
            available_width
        };
        (drawable / self.profile.beat_width).floor().max(0.0) as u32
    }

    /// Produce the next strip from the front of `queue`.
    ///
    /// Returns the strip and the beats it consumed, which is always its
    /// full capacity so strip offsets stay aligned to strip widths.
    pub fn produce_next_strip(
        &mut self,
        queue: &mut VecDeque<NoteEvent>,
        cumulative_beats: u32,
        available_width: f64,
    ) -> Result<(Strip, u32)> {
        let is_first = self.state == LayoutState::AwaitingHeader;
        self.state = LayoutState::Streaming;

        let beat_width = self.profile.beat_width;
        let beat_capacity = self.beat_capacity(available_width, is_first);
        if beat_capacity == 0 && !is_first {
            return Err(MusicBoxError::ZeroBeatCapacity {
                width: available_width,
                beat_width,
            });
        }

        let first_beat = cumulative_beats as f64;
        let max_beat = first_beat + beat_capacity as f64;
        let mut dropped = DropTally::default();
        let mut notes = Vec::new();

        log::debug!(
            "Strip {}: beats {}-{}, notes left: {}",
            self.strips,
            first_beat,
            max_beat,
            queue.len()
        );

        while queue.front().is_some_and(|e| e.beat < first_beat) {
            if let Some(late) = queue.pop_front() {
                log::warn!(
                    "Dropped {}{} at beat {}, before strip window {}-{}",
                    late.note,
                    late.octave,
                    late.beat,
                    first_beat,
                    max_beat
                );
                dropped.below_window += 1;
            }
        }

        while let Some(event) = queue.pop_front() {
            if event.beat > max_beat {
                queue.push_front(event);
                break;
            }
            if !self.pitch_range.contains(&(event.raw_pitch as i32)) {
                log::debug!(
                    "Cannot draw {}{}: pitch {} is outside {:?}",
                    event.note,
                    event.octave,
                    event.raw_pitch,
                    self.pitch_range
                );
                dropped.out_of_range += 1;
                continue;
            }
            match self.profile.find_note_index(&event.note, event.octave) {
                Some(row) => notes.push(PlacedNote {
                    x_offset: (event.beat - first_beat) * beat_width,
                    row,
                    event,
                }),
                None => {
                    log::debug!("Skipped {}{} (not present in music box)", event.note, event.octave);
                    dropped.unplayable += 1;
                }
            }
        }

        self.dropped += dropped;
        self.strips += 1;

        let strip = Strip {
            is_first,
            first_beat,
            beat_capacity,
            notes,
            dropped,
        };
        Ok((strip, beat_capacity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BoxNote;
    use pretty_assertions::assert_eq;

    fn profile() -> MusicBoxProfile {
        MusicBoxProfile {
            notes: vec![BoxNote::new("C", 4), BoxNote::new("E", 4), BoxNote::new("G", 4)],
            pin_width: 2.0,
            start_margin: 1.0,
            end_margin: 1.0,
            beat_width: 1.0,
            clef: None,
            description: None,
            manufacturer: None,
        }
    }

    #[test]
    fn state_moves_to_streaming_after_first_strip() {
        let p = profile();
        let mut engine = StripLayoutEngine::new(&p, &SongHeader::default()).unwrap();
        assert_eq!(engine.state(), LayoutState::AwaitingHeader);

        let mut queue = VecDeque::new();
        let width = engine.header_footprint() + 5.5;
        let (first, consumed) = engine.produce_next_strip(&mut queue, 0, width).unwrap();
        assert!(first.is_first);
        assert_eq!(consumed, 5);
        assert_eq!(engine.state(), LayoutState::Streaming);

        let (second, consumed) = engine.produce_next_strip(&mut queue, 5, 8.0).unwrap();
        assert!(!second.is_first);
        assert_eq!(second.first_beat, 5.0);
        assert_eq!(consumed, 8);
    }

    #[test]
    fn in_range_pitch_without_pin_is_unplayable() {
        let p = profile();
        let mut engine = StripLayoutEngine::new(&p, &SongHeader::default()).unwrap();
        let mut queue: VecDeque<NoteEvent> = vec![
            NoteEvent::new("D", 4, 0.0, 62),
            NoteEvent::new("C", 3, 0.0, 48),
            NoteEvent::new("G", 4, 1.0, 67),
        ]
        .into();
        let width = engine.header_footprint() + 10.5;
        let (strip, _) = engine.produce_next_strip(&mut queue, 0, width).unwrap();

        assert_eq!(strip.notes.len(), 1);
        assert_eq!(strip.notes[0].row, 2);
        assert_eq!(
            strip.dropped,
            DropTally { below_window: 0, out_of_range: 1, unplayable: 1 }
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn note_exactly_on_last_beat_belongs_to_strip() {
        let p = profile();
        let mut engine = StripLayoutEngine::new(&p, &SongHeader::default()).unwrap();
        let mut queue: VecDeque<NoteEvent> = vec![
            NoteEvent::new("C", 4, 4.0, 60),
            NoteEvent::new("E", 4, 4.5, 64),
        ]
        .into();
        let width = engine.header_footprint() + 4.5;
        let (strip, _) = engine.produce_next_strip(&mut queue, 0, width).unwrap();

        assert_eq!(strip.max_beat(), 4.0);
        assert_eq!(strip.notes.len(), 1);
        assert_eq!(strip.notes[0].x_offset, 4.0);
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].beat, 4.5);
    }

    #[test]
    fn header_wider_than_page_leaves_empty_first_strip() {
        let p = profile();
        let mut engine = StripLayoutEngine::new(&p, &SongHeader::default()).unwrap();
        let mut queue: VecDeque<NoteEvent> = vec![NoteEvent::new("C", 4, 0.5, 60)].into();

        let (first, consumed) = engine.produce_next_strip(&mut queue, 0, 1.0).unwrap();
        assert_eq!(consumed, 0);
        assert!(first.notes.is_empty());
        assert_eq!(queue.len(), 1);

        let (second, _) = engine.produce_next_strip(&mut queue, 0, 10.0).unwrap();
        assert_eq!(second.notes.len(), 1);
        assert_eq!(second.notes[0].x_offset, 0.5);
    }

    #[test]
    fn zero_capacity_streaming_strip_is_an_error() {
        let p = profile();
        let mut engine = StripLayoutEngine::new(&p, &SongHeader::default()).unwrap();
        let mut queue = VecDeque::new();
        engine.produce_next_strip(&mut queue, 0, 100.0).unwrap();

        let err = engine.produce_next_strip(&mut queue, 0, 0.5).unwrap_err();
        assert!(matches!(err, MusicBoxError::ZeroBeatCapacity { .. }));
    }

    #[test]
    fn empty_profile_is_rejected_before_any_strip() {
        let mut p = profile();
        p.notes.clear();
        assert!(matches!(
            StripLayoutEngine::new(&p, &SongHeader::default()),
            Err(MusicBoxError::InvalidProfile(_))
        ));
    }
}
