//! Color handling for chord diagrams
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate, so palette entries can be written as any CSS color.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// Wrapper around the `DynamicColor` type from the color crate
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use chordgram_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the alpha (transparency) component of this color.
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
