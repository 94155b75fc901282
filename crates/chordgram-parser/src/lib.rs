//! # Chordgram Parser
//!
//! Text front-end for chordgram. It reads two notations:
//!
//! - **fret lists** such as `x x 4 4 4 7` or `X,X,4,4,4,7`, one position per
//!   string, low E first ([`parse_frets`]);
//! - **chord books**, one chord per statement with optional attributes
//!   ([`parse_book`]).
//!
//! ```text
//! # open position
//! E: 0 2 2 1 0 0;
//! "A" : 5 7 7 6 5 5 [capo=2, file="Acapo2.svg"];
//! B: X X 4 4 4 7 [cut=3];
//! ```
//!
//! Failures are returned as a [`ParseError`](error::ParseError) holding one
//! diagnostic per problem, each with an error code and source spans.
//!
//! ## Usage
//!
//! ```
//! # use chordgram_parser::{parse_book, ElaborateConfig, error::ParseError};
//! fn main() -> Result<(), ParseError> {
//!     let entries = parse_book("Am: x 0 2 2 1 0 [cut=3];", ElaborateConfig::default())?;
//!     assert_eq!(entries[0].chord().cut(), 3);
//!     Ok(())
//! }
//! ```

mod elaborate;
pub mod error;
mod span;
mod syntax;

pub use elaborate::ElaborateConfig;
pub use span::{Span, Spanned};

use log::debug;

use chordgram_core::chord::{BookEntry, STRING_COUNT, StringState};

use elaborate::Builder;
use error::ParseError;

/// Parses a chord book into its entries, in source order.
///
/// Syntax errors are recovered at the next `;`, and every problem of the
/// book is reported in the returned error.
pub fn parse_book(source: &str, config: ElaborateConfig) -> Result<Vec<BookEntry>, ParseError> {
    let statements = syntax::statements(source)?;
    debug!(statements = statements.len(); "Chord book parsed");

    Builder::new(config).build(&statements)
}

/// Parses a single fret list into the six string states.
pub fn parse_frets(source: &str) -> Result<[StringState; STRING_COUNT], ParseError> {
    let tokens = syntax::fret_tokens(source)?;
    let list_span = match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => first.span().union(last.span()),
        _ => Span::new(0..source.len()),
    };

    elaborate::fret_states(&tokens, list_span).map_err(ParseError::new)
}
