use crate::error::{Diagnostic, ParseError};

/// Accumulates diagnostics so a phase can keep going after the first error.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        self.has_errors |= diagnostic.severity().is_error();
        self.diagnostics.push(diagnostic);
    }

    /// Succeeds with the warnings emitted so far, or fails with everything
    /// when at least one error was emitted.
    pub fn finish(self) -> Result<Vec<Diagnostic>, ParseError> {
        if self.has_errors {
            Err(ParseError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
