//! Configuration types for chord diagram rendering.
//!
//! All types implement [`serde::Deserialize`] so the command line can load
//! them from a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining diagram and style settings.
//! - [`DiagramConfig`] - Default scale and handedness for every chord.
//! - [`StyleConfig`] - Ink and chord-name colors.
//!
//! # Example
//!
//! ```
//! # use chordgram::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.diagram().scale(), 2.0);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use chordgram_core::{
    chord::{DEFAULT_SCALE, Hand},
    color::Color,
    style::Palette,
};
use chordgram_parser::ElaborateConfig;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Diagram defaults section.
    #[serde(default)]
    diagram: DiagramConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    pub fn new(diagram: DiagramConfig, style: StyleConfig) -> Self {
        Self { diagram, style }
    }

    pub fn diagram(&self) -> &DiagramConfig {
        &self.diagram
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Defaults applied to chords that do not set scale or hand themselves.
    pub fn elaborate_config(&self) -> ElaborateConfig {
        ElaborateConfig::new(self.diagram.scale, self.diagram.hand)
    }
}

/// Defaults for chords that leave an option unset.
#[derive(Debug, Clone, Deserialize)]
pub struct DiagramConfig {
    #[serde(default = "default_scale")]
    scale: f32,

    #[serde(default)]
    hand: Hand,
}

fn default_scale() -> f32 {
    DEFAULT_SCALE
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            hand: Hand::default(),
        }
    }
}

impl DiagramConfig {
    pub fn new(scale: f32, hand: Hand) -> Self {
        Self { scale, hand }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }
}

/// Colors of rendered diagrams, as CSS color strings.
///
/// Unset colors fall back to [`Palette::default`].
#[derive(Debug, Default, Clone, Deserialize)]
pub struct StyleConfig {
    /// Color of lines, dots and labels.
    #[serde(default)]
    ink_color: Option<String>,

    /// Color of the chord name.
    #[serde(default)]
    name_color: Option<String>,
}

impl StyleConfig {
    pub fn new(ink_color: Option<String>, name_color: Option<String>) -> Self {
        Self {
            ink_color,
            name_color,
        }
    }

    /// Returns the parsed ink [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn ink_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.ink_color.as_deref(), "ink")
    }

    /// Returns the parsed chord-name [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn name_color(&self) -> Result<Option<Color>, String> {
        parse_color(self.name_color.as_deref(), "name")
    }

    /// Builds the palette, filling unset colors from the default palette.
    pub fn palette(&self) -> Result<Palette, String> {
        let defaults = Palette::default();
        Ok(Palette::new(
            self.ink_color()?.unwrap_or(defaults.ink()),
            self.name_color()?.unwrap_or(defaults.name()),
        ))
    }
}

fn parse_color(color: Option<&str>, which: &str) -> Result<Option<Color>, String> {
    color
        .map(Color::new)
        .transpose()
        .map_err(|err| format!("Invalid {which} color in config: {err}"))
}
