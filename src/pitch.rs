//! Pitch names, MIDI key numbers and enharmonic matching.
//!
//! Names are matched case-insensitively after stripping octave digits.
//! Sharps are the canonical spelling; the five flats below are accepted
//! as their sharp equivalents.

/// Pitch classes in sharp spelling, indexed by semitone above C.
pub const NOTE_LABELS: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings and the sharp they sound as.
const ENHARMONICS: [(&str, &str); 5] = [
    ("DB", "C#"),
    ("EB", "D#"),
    ("GB", "F#"),
    ("AB", "G#"),
    ("BB", "A#"),
];

/// Split a MIDI key number into its sharp-spelled name and octave (60 → C4).
pub fn pitch_to_note(pitch: u8) -> (&'static str, i32) {
    (NOTE_LABELS[(pitch % 12) as usize], pitch as i32 / 12 - 1)
}

/// Canonical sharp spelling of a pitch name, or `None` if it is not one of
/// the twelve pitch classes. Octave digits are ignored.
pub fn canonical_name(name: &str) -> Option<&'static str> {
    let stripped: String = name
        .chars()
        .filter(|c| !c.is_ascii_digit() && *c != '-' && !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    if let Some(label) = NOTE_LABELS.iter().find(|&&l| l == stripped) {
        return Some(*label);
    }
    ENHARMONICS
        .iter()
        .find(|(flat, _)| *flat == stripped)
        .map(|(_, sharp)| *sharp)
}

/// Semitone of a pitch name above C (0..12).
pub fn semitone(name: &str) -> Option<i32> {
    let canonical = canonical_name(name)?;
    NOTE_LABELS
        .iter()
        .position(|&l| l == canonical)
        .map(|i| i as i32)
}

/// MIDI key number of a name and octave (C4 → 60). May fall outside 0..=127.
pub fn note_to_pitch(name: &str, octave: i32) -> Option<i32> {
    Some(12 * (octave + 1) + semitone(name)?)
}

/// Whether two pitch names denote the same pitch class.
///
/// Unknown names never match anything, not even themselves.
pub fn notes_match(a: &str, b: &str) -> bool {
    match (canonical_name(a), canonical_name(b)) {
        (Some(x), Some(y)) => x == y,
        _ => false,
    }
}

/// Parse a note spec such as `"A#4"`, `"bb3"` or `"C-1"` into name and octave.
pub fn parse_note_spec(spec: &str) -> Option<(String, i32)> {
    let spec = spec.trim();
    let split = spec.find(|c: char| c.is_ascii_digit() || c == '-')?;
    let (name, octave) = spec.split_at(split);
    if name.is_empty() {
        return None;
    }
    let octave: i32 = octave.parse().ok()?;
    Some((name.to_string(), octave))
}
