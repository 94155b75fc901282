//! Error codes, grouped by the phase that reports them:
//!
//! - `E0xx`: malformed literals
//! - `E1xx`: statement syntax
//! - `E2xx`: fret lists
//! - `E3xx`: attributes and entries

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// A string literal is missing its closing quote.
    E001,
    /// A character that cannot start any token.
    E002,

    /// The statement does not match `NAME: FRETS [ATTRS];`.
    E100,
    /// The statement is not terminated by `;`.
    E101,

    /// The fret list does not name exactly six strings.
    E200,
    /// A fret token is neither `x`, `o` nor a fret number.
    E201,

    /// Unknown attribute name.
    E300,
    /// The same attribute is given twice in one statement.
    E301,
    /// An attribute value has the wrong type or range.
    E302,
    /// Two entries write to the same output file.
    E303,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "E001",
            ErrorCode::E002 => "E002",
            ErrorCode::E100 => "E100",
            ErrorCode::E101 => "E101",
            ErrorCode::E200 => "E200",
            ErrorCode::E201 => "E201",
            ErrorCode::E300 => "E300",
            ErrorCode::E301 => "E301",
            ErrorCode::E302 => "E302",
            ErrorCode::E303 => "E303",
        }
    }

    /// Short description, used as the default label text.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E001 => "unterminated string literal",
            ErrorCode::E002 => "unexpected character",
            ErrorCode::E100 => "malformed statement",
            ErrorCode::E101 => "missing statement terminator",
            ErrorCode::E200 => "wrong number of strings",
            ErrorCode::E201 => "invalid fret",
            ErrorCode::E300 => "unknown attribute",
            ErrorCode::E301 => "duplicate attribute",
            ErrorCode::E302 => "invalid attribute value",
            ErrorCode::E303 => "duplicate output file",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::E001.to_string(), "E001");
        assert_eq!(ErrorCode::E303.to_string(), "E303");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(ErrorCode::E200.description(), "wrong number of strings");
        assert_eq!(ErrorCode::E301.description(), "duplicate attribute");
    }
}
