//! Page flow — stacks strips down the page and breaks to a new page.

use crate::error::{MusicBoxError, Result};
use crate::model::PageSetup;

/// Where the next strip goes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Vertical center of the strip
    pub y: f64,
    /// A new page must be started before drawing the strip
    pub new_page: bool,
}

#[derive(Debug, Clone)]
pub struct PageFlow {
    strip_height: f64,
    separation: f64,
    top_margin: f64,
    bottom_limit: f64,
    current_y: f64,
}

impl PageFlow {
    pub fn new(strip_height: f64, setup: &PageSetup) -> Self {
        Self {
            strip_height,
            separation: setup.strip_separation,
            top_margin: setup.top_margin,
            bottom_limit: setup.page_height - setup.bottom_margin,
            current_y: -strip_height / 2.0 - setup.strip_separation + setup.top_margin,
        }
    }

    pub fn current_y(&self) -> f64 {
        self.current_y
    }

    /// Advance to the next strip position, breaking the page when the strip
    /// would cross the bottom margin.
    pub fn place_next(&mut self) -> Result<Placement> {
        let half = self.strip_height / 2.0;
        self.current_y += self.strip_height + self.separation;
        if self.current_y + half <= self.bottom_limit {
            return Ok(Placement {
                y: self.current_y,
                new_page: false,
            });
        }

        self.current_y = half + self.top_margin;
        if self.current_y + half > self.bottom_limit {
            return Err(MusicBoxError::StripTallerThanPage {
                strip_height: self.strip_height,
                usable_height: self.bottom_limit - self.top_margin,
            });
        }
        log::info!("Strip does not fit, starting a new page");
        Ok(Placement {
            y: self.current_y,
            new_page: true,
        })
    }
}
