//! Mutable state of one planning pass.

use log::trace;

use chordgram_core::geometry::Size;

use super::metrics::{BASE_FRET_COUNT, Metrics};

/// The barre of a chord: its raw fret and the row it is drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Barre {
    pub fret: u32,
    pub row: i32,
}

/// Fretboard extent and barre found so far.
///
/// Created at the start of [`plan`](super::plan) and consumed when the
/// diagram is assembled; it never outlives one call.
#[derive(Debug)]
pub struct LayoutState {
    metrics: Metrics,
    frets: u32,
    canvas: Size,
    barre: Option<Barre>,
}

impl LayoutState {
    pub fn new(metrics: Metrics) -> Self {
        Self {
            metrics,
            frets: BASE_FRET_COUNT,
            canvas: metrics.initial_canvas(),
            barre: None,
        }
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Number of fret lines, the nut line included.
    pub fn frets(&self) -> u32 {
        self.frets
    }

    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn barre(&self) -> Option<Barre> {
        self.barre
    }

    pub fn set_barre(&mut self, barre: Barre) {
        self.barre = Some(barre);
    }

    /// Bottom edge of the strings.
    pub fn bottom_y(&self) -> f32 {
        self.metrics.bottom_y(self.frets)
    }

    /// Adds fret lines, one fret spacing at a time, until `y` lies on the
    /// fretboard. The canvas grows by the same amount.
    pub fn extend_to(&mut self, y: f32) {
        while y > self.bottom_y() {
            self.frets += 1;
            self.canvas = self.canvas.grow_height(self.metrics.fret_spacing);
            trace!(frets = self.frets, y = y; "Fretboard extended");
        }
    }
}
