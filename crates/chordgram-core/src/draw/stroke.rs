//! Stroke definitions for line-like style classes.
//!
//! Diagrams reference strokes through CSS classes rather than inline
//! attributes, so a [`StrokeDefinition`] renders to style-sheet declarations.
//!
//! ```
//! use chordgram_core::draw::StrokeDefinition;
//! use chordgram_core::color::Color;
//!
//! let stroke = StrokeDefinition::new(Color::new("black").unwrap(), 0.6);
//! assert_eq!(stroke.to_css(), "stroke: black; stroke-width: 0.6;");
//! ```

use crate::color::Color;

/// A stroke definition for rendering lines and outlines.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
}

impl StrokeDefinition {
    /// Creates a new stroke with the given color and width.
    pub fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }

    /// Returns the stroke color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the stroke width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Sets the stroke color.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Sets the stroke width.
    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    /// Renders the stroke as CSS declarations.
    pub fn to_css(&self) -> String {
        format!("stroke: {}; stroke-width: {};", self.color, self.width)
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self {
            color: Color::default(),
            width: 1.0,
        }
    }
}
