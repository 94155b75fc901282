use crate::span::Span;

/// A message attached to a span of the source.
///
/// A diagnostic has one primary label at the offending location and may add
/// secondary labels for context, such as the first occurrence of a duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    span: Span,
    message: String,
    is_primary: bool,
}

impl Label {
    pub fn primary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: true,
        }
    }

    pub fn secondary(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
            is_primary: false,
        }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    pub fn is_secondary(&self) -> bool {
        !self.is_primary
    }
}
