//! musicbox — turns MIDI songs into printable paper strips for pinned music boxes.
//!
//! A [`MusicBoxProfile`] describes the comb (pin notes and spacing). A MIDI
//! file is flattened into a beat-ordered feed of [`NoteEvent`]s, which the
//! renderer cuts into strips, stacks onto pages and draws.
//!
//! # Example
//! ```no_run
//! use musicbox::{load_events, render_to_svg_file, MusicBoxProfile, PageSetup, SongHeader};
//!
//! let profile = MusicBoxProfile::load("profiles/kikkerland-15.json").unwrap();
//! let events = load_events("song.mid").unwrap();
//! let header = SongHeader { title: "Greensleeves".into(), author: "Trad.".into() };
//! let report = render_to_svg_file(profile, PageSetup::default(), events, &header, "song.svg").unwrap();
//! println!("{} strips on {} pages", report.strips, report.pages);
//! ```

pub mod error;
pub mod midi;
pub mod model;
pub mod pitch;
pub mod profile;
pub mod renderer;

use std::path::Path;

pub use error::{MusicBoxError, Result};
pub use midi::{parse_events_json, parse_midi, read_midi_file};
pub use model::*;
pub use renderer::{
    DirectiveLog, DrawingSurface, DropTally, GenerationReport, PageFlow, Strip, StripDocument,
    StripLayoutEngine, SvgSurface,
};

/// Load a note event feed from a file.
/// The format is chosen by extension:
/// - `.json` → a pre-parsed array of events
/// - anything else → Standard MIDI File
pub fn load_events<P: AsRef<Path>>(path: P) -> Result<Vec<NoteEvent>> {
    let path = path.as_ref();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            let json = std::fs::read_to_string(path)?;
            parse_events_json(&json)
        }
        _ => read_midi_file(path),
    }
}

/// Lay out `events` and write the strips to an SVG file.
pub fn render_to_svg_file<P: AsRef<Path>>(
    profile: MusicBoxProfile,
    setup: PageSetup,
    events: Vec<NoteEvent>,
    header: &SongHeader,
    output: P,
) -> Result<GenerationReport> {
    let mut document = StripDocument::svg(profile, setup);
    document.generate(events, header, output.as_ref())
}
