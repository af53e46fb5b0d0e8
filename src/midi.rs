//! Note event feed — flattens a Standard MIDI File into beat-ordered events.
//!
//! Every track is walked with absolute tick times; each sounding NoteOn
//! (velocity > 0) becomes one [`NoteEvent`]. Tracks are merged and the
//! result is stably sorted by beat, so simultaneous notes keep file order.
//!
//! Uses the `midly` crate for SMF parsing.

use crate::error::{MusicBoxError, Result};
use crate::model::NoteEvent;
use crate::pitch::pitch_to_note;
use midly::{MidiMessage, Smf, Timing, TrackEventKind};
use std::path::Path;

/// Music box beats per MIDI quarter note.
pub const BEATS_PER_QUARTER: f64 = 2.0;

/// Read and flatten a MIDI file.
pub fn read_midi_file<P: AsRef<Path>>(path: P) -> Result<Vec<NoteEvent>> {
    let data = std::fs::read(path.as_ref())?;
    parse_midi(&data)
}

/// Flatten raw SMF bytes into a sorted note event feed.
pub fn parse_midi(data: &[u8]) -> Result<Vec<NoteEvent>> {
    let smf = Smf::parse(data)?;

    let ticks_per_quarter = match smf.header.timing {
        Timing::Metrical(tpq) => tpq.as_int(),
        Timing::Timecode(fps, subframe) => {
            return Err(MusicBoxError::UnsupportedTiming(format!(
                "SMPTE {} fps, {} ticks per frame",
                fps.as_int(),
                subframe
            )));
        }
    };
    if ticks_per_quarter == 0 {
        return Err(MusicBoxError::UnsupportedTiming(
            "zero ticks per quarter note".into(),
        ));
    }

    let mut events = Vec::new();
    for track in &smf.tracks {
        let mut tick: u64 = 0;
        for event in track {
            tick += event.delta.as_int() as u64;
            if let TrackEventKind::Midi {
                message: MidiMessage::NoteOn { key, vel },
                ..
            } = event.kind
            {
                if vel.as_int() == 0 {
                    continue;
                }
                let pitch = key.as_int();
                let (note, octave) = pitch_to_note(pitch);
                events.push(NoteEvent {
                    note: note.to_string(),
                    octave,
                    beat: tick as f64 / ticks_per_quarter as f64 * BEATS_PER_QUARTER,
                    raw_pitch: pitch,
                });
            }
        }
    }

    sort_by_beat(&mut events);
    log::debug!(
        "Parsed {} note events from {} tracks",
        events.len(),
        smf.tracks.len()
    );
    Ok(events)
}

/// Stable sort by beat.
pub fn sort_by_beat(events: &mut [NoteEvent]) {
    events.sort_by(|a, b| a.beat.total_cmp(&b.beat));
}

/// Load a pre-parsed feed from a JSON array of events.
pub fn parse_events_json(json: &str) -> Result<Vec<NoteEvent>> {
    let mut events: Vec<NoteEvent> = serde_json::from_str(json)?;
    sort_by_beat(&mut events);
    Ok(events)
}
