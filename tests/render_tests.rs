//! Rendering tests — full generation passes onto recording and SVG surfaces.

use musicbox::renderer::Directive;
use musicbox::{
    render_to_svg_file, BoxNote, DirectiveLog, MusicBoxError, MusicBoxProfile, NoteEvent,
    PageSetup, SongHeader, StripDocument,
};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

fn profiles_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("profiles")
}

fn output_dir() -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("test_output");
    std::fs::create_dir_all(&dir).ok();
    dir
}

fn three_note_box() -> MusicBoxProfile {
    MusicBoxProfile {
        notes: vec![BoxNote::new("C", 4), BoxNote::new("D", 4), BoxNote::new("E", 4)],
        pin_width: 2.0,
        start_margin: 1.0,
        end_margin: 1.0,
        beat_width: 4.0,
        clef: None,
        description: None,
        manufacturer: None,
    }
}

/// A page with room for exactly one 6mm strip.
fn one_strip_page() -> PageSetup {
    PageSetup {
        page_height: 20.0,
        top_margin: 6.0,
        bottom_margin: 6.0,
        strip_separation: 0.0,
        ..PageSetup::default()
    }
}

/// C major scale from C5, one note per beat, repeated.
fn scale_feed(beats: usize) -> Vec<NoteEvent> {
    let scale = [("C", 72u8), ("D", 74), ("E", 76), ("F", 77), ("G", 79), ("A", 81), ("B", 83)];
    (0..beats)
        .map(|i| {
            let (name, pitch) = scale[i % scale.len()];
            NoteEvent::new(name, 5, i as f64, pitch)
        })
        .collect()
}

fn horizontal_lines_at(directives: &[Directive], y: f64) -> usize {
    directives
        .iter()
        .filter(|d| matches!(d, Directive::Line { y1, y2, .. } if *y1 == y && *y2 == y))
        .count()
}

// ═══════════════════════════════════════════════════════════════════════
// Page flow through a document
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn second_strip_starts_a_new_page_when_only_one_fits() {
    let profile = three_note_box();
    let events = vec![
        NoteEvent::new("C", 4, 0.0, 60),
        NoteEvent::new("E", 4, 80.0, 64),
    ];
    let mut doc = StripDocument::new(profile, one_strip_page(), DirectiveLog::new());
    let report = doc
        .generate(events, &SongHeader::default(), Path::new("out.svg"))
        .unwrap();

    assert_eq!(report.strips, 2);
    assert_eq!(report.pages, 2);
    assert_eq!(report.placed_notes, 2);

    let log = doc.into_surface();
    assert_eq!(log.page_count(), 2);
    // Both strips centered at y = 6/2 + 6 = 9, borders at 6 and 12
    for page in 0..2 {
        assert!(horizontal_lines_at(log.page(page), 6.0) >= 1, "page {page}");
        assert!(horizontal_lines_at(log.page(page), 12.0) >= 1, "page {page}");
        assert_eq!(log.page(page).iter().filter(|d| matches!(d, Directive::Ellipse { .. })).count(), 1);
    }
    assert_eq!(log.saved_to.as_deref(), Some(Path::new("out.svg")));
}

#[test]
fn strips_stack_down_a_tall_page() {
    let profile = three_note_box();
    let setup = PageSetup {
        strip_separation: 2.0,
        ..PageSetup::default()
    };
    let mut doc = StripDocument::new(profile, setup, DirectiveLog::new());
    let events = vec![NoteEvent::new("D", 4, 200.0, 62)];
    let report = doc
        .generate(events, &SongHeader::default(), Path::new("out.svg"))
        .unwrap();

    assert_eq!(report.pages, 1);
    assert!(report.strips >= 3);
    let log = doc.into_surface();
    // Strip k is centered at 9 + 8k; its top border lies 3 above
    for k in 0..report.strips {
        let top = 9.0 + 8.0 * k as f64 - 3.0;
        assert!(horizontal_lines_at(&log.directives, top) >= 1, "strip {k}");
    }
}

// ═══════════════════════════════════════════════════════════════════════
// One-shot guard and failure release
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn document_refuses_to_generate_twice() {
    let mut doc = StripDocument::new(three_note_box(), PageSetup::default(), DirectiveLog::new());
    doc.generate(Vec::new(), &SongHeader::default(), Path::new("a.svg"))
        .unwrap();
    assert!(doc.is_generated());

    let err = doc
        .generate(Vec::new(), &SongHeader::default(), Path::new("b.svg"))
        .unwrap_err();
    assert!(matches!(err, MusicBoxError::AlreadyGenerated));
    assert_eq!(doc.surface().saved_to.as_deref(), Some(Path::new("a.svg")));
}

#[test]
fn strip_taller_than_page_aborts_and_releases_surface() {
    let setup = PageSetup {
        page_height: 10.0,
        ..PageSetup::default()
    };
    let mut doc = StripDocument::new(three_note_box(), setup, DirectiveLog::new());
    let err = doc
        .generate(scale_feed(3), &SongHeader::default(), Path::new("x.svg"))
        .unwrap_err();
    assert!(matches!(err, MusicBoxError::StripTallerThanPage { .. }));

    assert!(doc.surface().abandoned);
    assert!(doc.surface().saved_to.is_none());
    assert_eq!(doc.surface().page_count(), 1);

    let again = doc.generate(Vec::new(), &SongHeader::default(), Path::new("x.svg"));
    assert!(matches!(again, Err(MusicBoxError::AlreadyGenerated)));
}

#[test]
fn invalid_profile_fails_before_drawing() {
    let mut profile = three_note_box();
    profile.notes.push(BoxNote::new("H", 4));
    let mut doc = StripDocument::new(profile, PageSetup::default(), DirectiveLog::new());
    let err = doc
        .generate(scale_feed(3), &SongHeader::default(), Path::new("x.svg"))
        .unwrap_err();
    assert!(matches!(err, MusicBoxError::UnknownNote { index: 3, .. }));
    assert!(doc.surface().directives.is_empty());
    assert!(doc.surface().abandoned);
}

// ═══════════════════════════════════════════════════════════════════════
// Drawn content
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn header_appears_once_and_every_placed_note_is_drawn() {
    let profile = MusicBoxProfile::load(profiles_dir().join("kikkerland-15.json")).unwrap();
    let mut feed = scale_feed(300);
    feed.push(NoteEvent::new("C", 2, 300.0, 36));
    let header = SongHeader {
        title: "Scales".into(),
        author: "Practice".into(),
    };

    let mut doc = StripDocument::new(profile.clone(), PageSetup::default(), DirectiveLog::new());
    let report = doc.generate(feed, &header, Path::new("scales.svg")).unwrap();
    let log = doc.into_surface();

    assert_eq!(report.placed_notes, 300);
    assert_eq!(report.dropped.out_of_range, 1);
    assert_eq!(log.ellipses().count(), report.placed_notes);
    assert_eq!(log.texts().filter(|t| *t == "Scales").count(), 1);
    assert_eq!(log.texts().filter(|t| *t == "Practice").count(), 1);

    // Legend: one letter per pin
    let letters = log.texts().filter(|t| t.len() == 1).count();
    assert_eq!(letters, profile.note_count());

    let rotations: Vec<f64> = log
        .directives
        .iter()
        .filter_map(|d| match d {
            Directive::Rotate { angle, .. } => Some(*angle),
            _ => None,
        })
        .collect();
    assert_eq!(rotations, vec![90.0, 0.0]);
    assert_eq!(
        log.directives
            .iter()
            .filter(|d| matches!(d, Directive::Image { .. }))
            .count(),
        1
    );
}

#[test]
fn render_scale_to_svg_file() {
    let profile = MusicBoxProfile::load(profiles_dir().join("kikkerland-15.json")).unwrap();
    let header = SongHeader {
        title: "C major <scale> & friends".into(),
        author: "musicbox".into(),
    };
    let out = output_dir().join("scale.svg");
    let report =
        render_to_svg_file(profile, PageSetup::default(), scale_feed(600), &header, &out).unwrap();

    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.starts_with("<svg"), "Output should be SVG");
    assert!(svg.contains("</svg>"), "SVG should be closed");
    assert!(svg.contains("&lt;scale&gt; &amp; friends"), "title should be escaped");
    assert_eq!(svg.matches("<ellipse").count(), report.placed_notes);
    assert!(svg.contains("stroke-dasharray"), "odd beats should be dashed");
    assert!(svg.contains("rotate(-90.00"));
    assert!(report.pages >= 2, "600 beats should need more than one page");
    println!("✓ Rendered scale.svg ({} strips, {} pages)", report.strips, report.pages);
    println!("  Output: {}", out.display());
}
