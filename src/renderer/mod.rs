//! Strip renderer — lays a note feed out as music box strips on pages.
//!
//! A [`StripDocument`] owns one drawing surface and runs one generation
//! pass over it: the layout engine cuts the feed into strips, the page flow
//! stacks them down the pages, and each strip is drawn as it is produced.

mod constants;
mod header;
mod layout;
mod page_flow;
mod strip;
mod surface;
mod svg_builder;

pub use header::HeaderBlock;
pub use layout::{DropTally, LayoutState, PlacedNote, Strip, StripLayoutEngine};
pub use page_flow::{PageFlow, Placement};
pub use surface::{
    DashPattern, Directive, DirectiveLog, DrawingSurface, Font, FontFamily, Pen, ShapeStyle,
};
pub use svg_builder::SvgSurface;

use crate::error::{MusicBoxError, Result};
use crate::model::{MusicBoxProfile, NoteEvent, PageSetup, SongHeader};
use serde::Serialize;
use std::collections::VecDeque;
use std::path::Path;
use strip::draw_strip;

/// Summary of one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GenerationReport {
    pub strips: usize,
    pub pages: usize,
    /// Beats covered by all strips together
    pub beats: u32,
    pub placed_notes: usize,
    pub dropped: DropTally,
}

/// A one-shot document of music box strips.
pub struct StripDocument<S: DrawingSurface> {
    profile: MusicBoxProfile,
    setup: PageSetup,
    surface: S,
    generated: bool,
}

impl<S: DrawingSurface> StripDocument<S> {
    pub fn new(profile: MusicBoxProfile, setup: PageSetup, surface: S) -> Self {
        Self {
            profile,
            setup,
            surface,
            generated: false,
        }
    }

    pub fn is_generated(&self) -> bool {
        self.generated
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Lay out and draw every event, then save the surface to `output`.
    ///
    /// A document generates once; a second call fails with
    /// [`MusicBoxError::AlreadyGenerated`] even if the first one failed.
    pub fn generate(
        &mut self,
        events: Vec<NoteEvent>,
        header: &SongHeader,
        output: &Path,
    ) -> Result<GenerationReport> {
        if self.generated {
            return Err(MusicBoxError::AlreadyGenerated);
        }
        self.generated = true;

        match self.lay_out(events, header) {
            Ok(report) => {
                self.surface.save(output)?;
                Ok(report)
            }
            Err(e) => {
                self.surface.abandon();
                Err(e)
            }
        }
    }

    fn lay_out(&mut self, events: Vec<NoteEvent>, header: &SongHeader) -> Result<GenerationReport> {
        let mut engine = StripLayoutEngine::new(&self.profile, header)?;
        let mut flow = PageFlow::new(self.profile.strip_body_height(), &self.setup);
        let x0 = self.setup.left_margin;
        let x1 = self.setup.page_width - self.setup.right_margin;
        let available_width = self.setup.available_width();

        let total_events = events.len();
        let mut queue: VecDeque<NoteEvent> = events.into();
        let mut report = GenerationReport::default();

        self.surface.add_page();
        report.pages = 1;

        // The header strip is produced even for an empty feed
        loop {
            let placement = flow.place_next()?;
            if placement.new_page {
                self.surface.add_page();
                report.pages += 1;
            }

            let (strip, consumed) =
                engine.produce_next_strip(&mut queue, report.beats, available_width)?;
            draw_strip(
                &mut self.surface,
                &self.profile,
                &strip,
                engine.header_block(),
                &self.setup.marker_image,
                x0,
                x1,
                placement.y,
            );

            report.beats += consumed;
            report.strips += 1;
            report.placed_notes += strip.notes.len();

            if queue.is_empty() {
                break;
            }
        }

        report.dropped = engine.dropped();
        log::info!(
            "Laid out {} of {} notes on {} strips, {} pages ({} dropped)",
            report.placed_notes,
            total_events,
            report.strips,
            report.pages,
            report.dropped.total()
        );
        Ok(report)
    }
}

impl StripDocument<SvgSurface> {
    /// Document drawn onto an SVG surface sized to the page setup.
    pub fn svg(profile: MusicBoxProfile, setup: PageSetup) -> Self {
        let surface = SvgSurface::new(setup.page_width, setup.page_height);
        Self::new(profile, setup, surface)
    }
}
