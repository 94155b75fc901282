//! The planned diagram: everything the exporter needs, nothing it computes.

use chordgram_core::{
    draw::{Drawable, Primitive},
    geometry::{Bounds, Size},
    style::StyleSheet,
};

use crate::layout::Barre;

/// A fully positioned chord diagram.
///
/// Primitives are kept in stacking order; the exporter emits them as-is.
#[derive(Debug, Clone)]
pub struct Diagram {
    canvas: Size,
    primitives: Vec<Primitive>,
    style: StyleSheet,
    fret_count: u32,
    barre: Option<Barre>,
}

impl Diagram {
    pub(crate) fn new(
        canvas: Size,
        primitives: Vec<Primitive>,
        style: StyleSheet,
        fret_count: u32,
        barre: Option<Barre>,
    ) -> Self {
        Self {
            canvas,
            primitives,
            style,
            fret_count,
            barre,
        }
    }

    /// Width and height of the SVG canvas.
    pub fn canvas(&self) -> Size {
        self.canvas
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn style(&self) -> &StyleSheet {
        &self.style
    }

    /// Fret lines on the fretboard after extension, the nut line included.
    pub fn fret_count(&self) -> u32 {
        self.fret_count
    }

    pub fn barre(&self) -> Option<Barre> {
        self.barre
    }

    /// Union of the bounds of every primitive.
    pub fn content_bounds(&self) -> Bounds {
        let mut bounds = self.primitives.iter().map(Drawable::bounds);
        let Some(first) = bounds.next() else {
            return Bounds::default();
        };
        bounds.fold(first, |acc, b| acc.merge(&b))
    }
}
