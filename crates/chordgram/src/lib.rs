//! Chordgram - guitar chord diagrams as standalone SVG files.
//!
//! Parsing, layout and rendering of six-string chord diagrams. A chord is
//! given either as a fret list (`x 0 2 2 1 0`) or as an entry of a chord
//! book; each chord becomes one SVG document with finger dots, open and
//! muted markers, barre arcs, capo labels and cut fretboards.

pub mod config;
pub mod layout;

mod diagram;
mod error;
mod export;

pub use chordgram_core::{chord, color, draw, geometry, style};

pub use diagram::Diagram;
pub use error::ChordgramError;

use std::path::Path;

use log::{debug, info, trace};

use chordgram_core::chord::{BookEntry, ChordShape};

use config::AppConfig;
use export::Exporter;

/// Builder for parsing, laying out and rendering chord diagrams.
///
/// # Examples
///
/// ```rust,no_run
/// use chordgram::{DiagramBuilder, config::AppConfig};
///
/// let builder = DiagramBuilder::new(AppConfig::default());
///
/// // A single chord from a fret list
/// let chord = builder.parse_chord("x 0 2 2 1 0")
///     .expect("Failed to parse")
///     .with_name("Am");
/// let svg = builder.render_svg(&chord)
///     .expect("Failed to render");
///
/// // Or a whole chord book
/// let entries = builder.parse_book("E: 0 2 2 1 0 0; A: x 0 2 2 2 0;")
///     .expect("Failed to parse");
/// assert_eq!(entries.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a chord book into its entries.
    ///
    /// Entries that leave `scale` or `hand` unset take the configured
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ChordgramError::Parse`] with every diagnostic of the book.
    pub fn parse_book(&self, source: &str) -> Result<Vec<BookEntry>, ChordgramError> {
        info!("Parsing chord book");

        let entries = chordgram_parser::parse_book(source, self.config.elaborate_config())
            .map_err(|err| ChordgramError::new_parse_error(err, source))?;

        debug!(entries = entries.len(); "Chord book parsed successfully");
        Ok(entries)
    }

    /// Parse a fret list into an unnamed chord with the configured defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ChordgramError::Parse`] for malformed fret lists.
    pub fn parse_chord(&self, frets: &str) -> Result<ChordShape, ChordgramError> {
        let states = chordgram_parser::parse_frets(frets)
            .map_err(|err| ChordgramError::new_parse_error(err, frets))?;

        let chord = ChordShape::new(&states)?
            .with_scale(self.config.diagram().scale())
            .with_hand(self.config.diagram().hand());
        trace!(chord:% = chord; "Parsed fret list");
        Ok(chord)
    }

    /// Plan the diagram of a chord.
    ///
    /// # Errors
    ///
    /// Returns [`ChordgramError::Config`] for unusable style colors and
    /// [`ChordgramError::Chord`] for chords that cannot be drawn.
    pub fn layout(&self, chord: &ChordShape) -> Result<Diagram, ChordgramError> {
        let palette = self
            .config
            .style()
            .palette()
            .map_err(ChordgramError::Config)?;
        Ok(layout::plan(chord, &palette)?)
    }

    /// Render a chord to SVG text.
    ///
    /// # Errors
    ///
    /// Returns the layout errors of [`Self::layout`] or
    /// [`ChordgramError::Export`] if rendering fails.
    pub fn render_svg(&self, chord: &ChordShape) -> Result<String, ChordgramError> {
        let diagram = self.layout(chord)?;
        let svg = export::svg::to_svg_string(&diagram)?;

        info!(chord:% = chord; "SVG rendered successfully");
        Ok(svg)
    }

    /// Render a chord and write it to `path`.
    ///
    /// # Errors
    ///
    /// Returns the layout errors of [`Self::layout`] or
    /// [`ChordgramError::Export`] if rendering or writing fails.
    pub fn write_svg(&self, chord: &ChordShape, path: &Path) -> Result<(), ChordgramError> {
        let diagram = self.layout(chord)?;
        let mut exporter = export::svg::Svg::new(path);
        exporter.export_diagram(&diagram)?;
        debug!(path:% = exporter.file_name().display(); "Chord diagram written");
        Ok(())
    }
}
