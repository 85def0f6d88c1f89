use crate::error::LexError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single token from the source code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The type of token
    pub kind: TokenKind,
    /// Text of the token (unescaped contents for strings, empty for `Eof`)
    pub lexeme: String,
    /// Zero-based character index where the token begins
    pub offset: usize,
    /// Diagnostic for a malformed token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<LexError>,
}

impl Token {
    /// Creates a new well-formed token
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
            offset,
            error: None,
        }
    }

    /// Attaches a diagnostic to the token
    pub fn with_error(mut self, error: LexError) -> Self {
        self.error = Some(error);
        self
    }

    /// True unless the token is `Invalid` or carries a diagnostic
    pub fn is_well_formed(&self) -> bool {
        self.error.is_none() && self.kind != TokenKind::Invalid
    }

    /// Representation of a `Number` token, derived from its lexeme
    pub fn numeric_form(&self) -> Option<NumericForm> {
        if self.kind != TokenKind::Number {
            return None;
        }

        let form = if self.lexeme.starts_with("0x") {
            NumericForm::Hex
        } else if self.lexeme.starts_with("0b") {
            NumericForm::Binary
        } else if self.lexeme.contains('.') {
            NumericForm::Decimal
        } else {
            NumericForm::Integer
        };
        Some(form)
    }

    /// Value of a well-formed `Number` token
    ///
    /// Returns `None` for other kinds, for malformed literals and on integer overflow.
    pub fn number_value(&self) -> Option<Number> {
        if self.error.is_some() {
            return None;
        }

        match self.numeric_form()? {
            NumericForm::Integer => self.lexeme.parse().ok().map(Number::Integer),
            NumericForm::Decimal => self.lexeme.parse().ok().map(Number::Real),
            NumericForm::Hex => i64::from_str_radix(&self.lexeme[2..], 16)
                .ok()
                .map(Number::Integer),
            NumericForm::Binary => i64::from_str_radix(&self.lexeme[2..], 2)
                .ok()
                .map(Number::Integer),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            TokenKind::Eof => write!(f, "({}:{})", self.kind, self.offset)?,
            _ => write!(
                f,
                "({}:{}:{} {:?})",
                self.kind,
                self.offset,
                self.lexeme.chars().count(),
                self.lexeme
            )?,
        }

        if let Some(error) = &self.error {
            write!(f, " <{}>", error)?;
        }
        Ok(())
    }
}

/// All possible token types in Gong
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    /// Numeric literal: decimal, real, `0x` hex or `0b` binary
    Number,
    /// Double-quoted string literal
    String,
    /// `true` or `false`
    Boolean,
    /// Identifier or bare operator symbol
    Identifier,
    /// Quote for LISP-style syntax (')
    Quote,
    /// Left parenthesis (
    OpenParen,
    /// Right parenthesis )
    CloseParen,
    /// End of file marker
    Eof,
    /// Unrecognized character
    Invalid,
}

impl TokenKind {
    /// Kinds that become `Atom` nodes in the tree
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            TokenKind::Number | TokenKind::String | TokenKind::Boolean | TokenKind::Identifier
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Boolean => "boolean",
            TokenKind::Identifier => "identifier",
            TokenKind::Quote => "quote",
            TokenKind::OpenParen => "open-paren",
            TokenKind::CloseParen => "close-paren",
            TokenKind::Eof => "eof",
            TokenKind::Invalid => "invalid",
        };
        f.write_str(name)
    }
}

/// How a numeric literal is written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericForm {
    /// Plain digits
    Integer,
    /// Digits with a `.`
    Decimal,
    /// `0x` prefix
    Hex,
    /// `0b` prefix
    Binary,
}

/// Numeric value of a `Number` token
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Integer written in any radix
    Integer(i64),
    /// Real number
    Real(f64),
}
