//! Export of planned diagrams.
//!
//! This module provides the [`Exporter`] trait, the last stage of the
//! pipeline:
//!
//! ```text
//! Chord book / fret list
//!     ↓ parse
//! ChordShape
//!     ↓ layout
//! Diagram (positioned primitives)
//!     ↓ export (this module)
//! Output file
//! ```
//!
//! # Available Backends
//!
//! - [`svg`]: standalone SVG files via [`svg::Svg`]
//!
//! Export operations return [`Error`], which converts into
//! [`ChordgramError::Export`](crate::ChordgramError::Export) at the crate
//! boundary.

pub mod svg;

use thiserror::Error;

use crate::diagram::Diagram;

/// Abstraction for diagram export backends.
pub trait Exporter {
    /// Writes one diagram in the backend's output format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if the diagram cannot be converted, or
    /// [`Error::Io`] if writing the output fails.
    fn export_diagram(&mut self, diagram: &Diagram) -> Result<(), Error>;
}

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering or conversion failure.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
