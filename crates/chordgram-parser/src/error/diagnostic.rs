use std::fmt;

use crate::{
    error::{ErrorCode, Label, Severity},
    span::Span,
};

/// One error or warning about the input.
///
/// Rendered by the command line as:
///
/// ```text
/// error[E200]: expected 6 fret positions, found 5
///   |
/// 3 | D: x x 0 2 3;
///   |        ^^^^^^^ wrong number of strings
///   |
///   = help: list one position per string, low E first
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    code: Option<ErrorCode>,
    message: String,
    labels: Vec<Label>,
    help: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            labels: Vec::new(),
            help: None,
        }
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn code(&self) -> Option<ErrorCode> {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The span of the first primary label, if any.
    pub fn primary_span(&self) -> Option<Span> {
        self.labels
            .iter()
            .find(|label| label.is_primary())
            .map(Label::span)
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn with_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::primary(span, message));
        self
    }

    pub fn with_secondary_label(mut self, span: Span, message: impl Into<String>) -> Self {
        self.labels.push(Label::secondary(span, message));
        self
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        write!(f, ": {}", self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_collects_labels_in_order() {
        let diag = Diagnostic::error("output file `A.svg` is used twice")
            .with_code(ErrorCode::E303)
            .with_label(Span::new(40..47), "used again here")
            .with_secondary_label(Span::new(10..17), "first used here")
            .with_help("give each entry its own `file`");

        assert!(diag.severity().is_error());
        assert_eq!(diag.code(), Some(ErrorCode::E303));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.primary_span(), Some(Span::new(40..47)));
        assert_eq!(diag.help(), Some("give each entry its own `file`"));
    }

    #[test]
    fn test_display_with_and_without_code() {
        let coded = Diagnostic::error("unknown attribute `capp`").with_code(ErrorCode::E300);
        assert_eq!(coded.to_string(), "error[E300]: unknown attribute `capp`");

        let plain = Diagnostic::warning("empty chord book");
        assert_eq!(plain.to_string(), "warning: empty chord book");
        assert_eq!(plain.primary_span(), None);
    }
}
