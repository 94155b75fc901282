//! Error types for chordgram operations.

use std::io;

use thiserror::Error;

use chordgram_core::chord::ChordError;
use chordgram_parser::error::ParseError;

/// The main error type for chordgram operations.
///
/// The `Parse` variant keeps the source text next to the diagnostics so
/// callers can render them with source snippets.
#[derive(Debug, Error)]
pub enum ChordgramError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse { err: ParseError, src: String },

    #[error("Invalid chord: {0}")]
    Chord(#[from] ChordError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for ChordgramError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl ChordgramError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: ParseError, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
