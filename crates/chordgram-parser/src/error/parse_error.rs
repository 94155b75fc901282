use std::fmt;

use crate::error::Diagnostic;

/// Failure of the parsing pipeline, carrying every diagnostic reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    diagnostics: Vec<Diagnostic>,
}

impl ParseError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.diagnostics.first() else {
            return f.write_str("parse failed");
        };
        write!(f, "{first}")?;
        if self.diagnostics.len() > 1 {
            write!(f, " (+{} more)", self.diagnostics.len() - 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

impl From<Diagnostic> for ParseError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_counts_remaining_diagnostics() {
        let err = ParseError::new(vec![
            Diagnostic::error("first"),
            Diagnostic::error("second"),
            Diagnostic::error("third"),
        ]);
        assert_eq!(err.to_string(), "error: first (+2 more)");

        let single: ParseError = Diagnostic::error("only").into();
        assert_eq!(single.to_string(), "error: only");
    }
}
