//! Error adapter for converting ChordgramError to miette diagnostics.
//!
//! When a [`chordgram_parser::error::ParseError`] contains multiple
//! diagnostics, each diagnostic is rendered independently with its own
//! source snippet.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use chordgram::ChordgramError;
use chordgram_parser::error::{Diagnostic, Severity};

/// Adapter for a single chordgram diagnostic.
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    /// Source text for displaying snippets
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl fmt::Debug for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticAdapter")
            .field("diag", &self.diag)
            .finish()
    }
}

impl fmt::Display for DiagnosticAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.diag.message())
    }
}

impl std::error::Error for DiagnosticAdapter<'_> {}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .code()
            .map(|c| Box::new(c) as Box<dyn fmt::Display>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diag.severity() {
            Severity::Error => miette::Severity::Error,
            Severity::Warning => miette::Severity::Warning,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diag
            .help()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let span = span_to_miette(label.span());
            let message = Some(label.message().to_string());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// Adapter for [`ChordgramError`] variants without source locations.
pub struct ErrorAdapter<'a>(pub &'a ChordgramError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            ChordgramError::Io(_) => "chordgram::io",
            ChordgramError::Parse { .. } => return None,
            ChordgramError::Chord(_) => "chordgram::chord",
            ChordgramError::Config(_) => "chordgram::config",
            ChordgramError::Export(_) => "chordgram::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match &self.0 {
            ChordgramError::Config(_) => Some(Box::new(
                "check the [diagram] and [style] sections of the configuration file",
            )),
            _ => None,
        }
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A rich diagnostic with source location information.
    Diagnostic(DiagnosticAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Diagnostic(d) => fmt::Display::fmt(d, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Diagnostic(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn severity(&self) -> Option<miette::Severity> {
        match self {
            Reportable::Diagnostic(d) => d.severity(),
            Reportable::Error(e) => e.severity(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Diagnostic(d) => d.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Diagnostic(d) => d.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Diagnostic(d) => d.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: chordgram_parser::Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Convert a [`ChordgramError`] into a list of reportable errors.
///
/// [`ChordgramError::Parse`] yields one [`Reportable`] per diagnostic; every
/// other variant yields a single one.
pub fn to_reportables(err: &ChordgramError) -> Vec<Reportable<'_>> {
    match err {
        ChordgramError::Parse {
            err: parse_err,
            src,
        } => parse_err
            .diagnostics()
            .iter()
            .map(|d| Reportable::Diagnostic(DiagnosticAdapter::new(d, src)))
            .collect(),
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}

#[cfg(test)]
mod tests {
    use chordgram::chord::ChordError;
    use chordgram_parser::{
        Span,
        error::{ErrorCode, ParseError},
    };

    use super::*;

    #[test]
    fn test_diagnostics_are_reported_separately() {
        let diags = vec![
            Diagnostic::error("expected 6 fret positions, found 5")
                .with_code(ErrorCode::E200)
                .with_label(Span::new(3..12), "wrong number of strings"),
            Diagnostic::error("unknown attribute `capos`")
                .with_code(ErrorCode::E300)
                .with_label(Span::new(14..19), "unknown attribute")
                .with_help("valid attributes: capo, cut, hand, scale, file"),
        ];
        let err = ChordgramError::new_parse_error(ParseError::new(diags), "E: 0 2 2 1 0 [capos=1];");

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 2);
        assert_eq!(reportables[0].to_string(), "expected 6 fret positions, found 5");
        assert_eq!(
            reportables[0].code().map(|c| c.to_string()),
            Some("E200".to_string())
        );
        assert!(reportables[1].help().is_some());
        assert_eq!(reportables[1].labels().map(Iterator::count), Some(1));
    }

    #[test]
    fn test_warning_severity_is_kept() {
        let diag = Diagnostic::warning("suspicious").with_label(Span::new(0..1), "here");
        let err = ChordgramError::new_parse_error(ParseError::new(vec![diag]), "x");

        let reportables = to_reportables(&err);
        assert_eq!(reportables[0].severity(), Some(miette::Severity::Warning));
    }

    #[test]
    fn test_non_parse_error() {
        let err = ChordgramError::Chord(ChordError::InvalidScale(0.0));

        let reportables = to_reportables(&err);
        assert_eq!(reportables.len(), 1);
        match &reportables[0] {
            Reportable::Error(e) => {
                assert_eq!(
                    e.code().map(|c| c.to_string()),
                    Some("chordgram::chord".to_string())
                );
                assert!(e.source_code().is_none());
            }
            Reportable::Diagnostic(_) => panic!("Expected Error"),
        }
    }
}
