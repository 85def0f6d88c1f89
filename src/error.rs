//! Error types for the Gong front end

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Diagnostic attached to a malformed token.
///
/// Lexical problems never stop the scanner. The offending region is still emitted as a token and
/// carries one of these so later stages can decide what to do with it.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LexError {
    /// **Triggered by:** end of input before the closing `"`
    /// **Example:** `"abc`
    #[error("unterminated string")]
    UnterminatedString,

    /// **Triggered by:** a decimal literal with more than one `.`
    /// **Example:** `1.2.3`
    #[error("multiple decimal points in number")]
    MultipleDecimalPoints,

    /// **Triggered by:** a radix prefix with no digits after it
    /// **Example:** `0x`, `0b`
    #[error("missing digits after base-{radix} prefix")]
    MissingDigits {
        /// Radix announced by the prefix (16 or 2)
        radix: u32,
    },

    /// **Triggered by:** a character glued to a numeric literal that is not valid for its radix
    /// **Example:** `12ab`, `0b102`, `0x1G`
    #[error("invalid digit '{digit}' in number")]
    InvalidDigit {
        /// First offending character
        digit: char,
    },
}

/// Syntax errors surfaced by the parser.
///
/// Every variant is fatal to the parse call that produced it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Unexpected token encountered where a form, list element or `(` was required
    ///
    /// **Example:** `foo` at top level (expected `(`), `(a ))` has a stray `)` at top level
    #[error("Syntax error at offset {offset}: expected {expected}, found {found}")]
    UnexpectedToken {
        /// Expected token description
        expected: String,
        /// Actual token received
        found: String,
        /// Offset of the actual token
        offset: usize,
    },

    /// Input ended inside an unfinished form
    ///
    /// **Example:** `(a (b)` (missing closing parenthesis)
    #[error("Unexpected end of input at offset {offset}: expected {expected}")]
    UnexpectedEof {
        /// Expected token description
        expected: String,
        /// Offset of the `Eof` token
        offset: usize,
    },

    /// Atom token carrying a lexical diagnostic, only raised in strict mode
    #[error("Malformed token at offset {offset}: {error}")]
    MalformedToken {
        /// Offset of the malformed token
        offset: usize,
        /// Diagnostic attached by the scanner
        error: LexError,
    },

    /// Lists nested deeper than the configured limit
    #[error("Nesting depth exceeds limit of {limit} at offset {offset}")]
    NestingTooDeep {
        /// Configured maximum depth
        limit: usize,
        /// Offset of the `(` that crossed the limit
        offset: usize,
    },
}

impl Error {
    /// Source offset the error points at
    pub fn offset(&self) -> usize {
        match self {
            Error::UnexpectedToken { offset, .. }
            | Error::UnexpectedEof { offset, .. }
            | Error::MalformedToken { offset, .. }
            | Error::NestingTooDeep { offset, .. } => *offset,
        }
    }
}

/// Result type for Gong operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_offset() {
        let err = Error::UnexpectedToken {
            expected: "`(`".to_string(),
            found: "identifier `foo`".to_string(),
            offset: 3,
        };
        assert_eq!(
            err.to_string(),
            "Syntax error at offset 3: expected `(`, found identifier `foo`"
        );
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn test_lex_error_display() {
        assert_eq!(LexError::UnterminatedString.to_string(), "unterminated string");
        assert_eq!(
            LexError::MissingDigits { radix: 16 }.to_string(),
            "missing digits after base-16 prefix"
        );
        assert_eq!(
            LexError::InvalidDigit { digit: 'G' }.to_string(),
            "invalid digit 'G' in number"
        );
    }
}
