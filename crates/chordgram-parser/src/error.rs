//! Diagnostics reported while reading fret notation and chord books.
//!
//! A [`Diagnostic`] is one error or warning with an optional [`ErrorCode`],
//! labeled source spans and help text. Every failure of the parsing pipeline
//! is returned as a [`ParseError`] carrying one or more diagnostics, so a
//! single run can report every problem in a chord book.
//!
//! # Example
//!
//! ```
//! # use chordgram_parser::error::{Diagnostic, ErrorCode};
//! # use chordgram_parser::Span;
//! let diag = Diagnostic::error("attribute `capo` is given twice")
//!     .with_code(ErrorCode::E301)
//!     .with_label(Span::new(30..36), "duplicate attribute")
//!     .with_secondary_label(Span::new(20..26), "first given here")
//!     .with_help("remove one of the two values");
//!
//! assert_eq!(diag.to_string(), "error[E301]: attribute `capo` is given twice");
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod parse_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use parse_error::ParseError;
pub use severity::Severity;
