use crate::lexer::{Token, TokenKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A parsed Gong expression
///
/// Atoms built by the parser or by [`Expression::atom`] always wrap a number, string, boolean or
/// identifier token. The variants are public, so trees assembled by hand or deserialized are not
/// checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Number, string, boolean or identifier, keeping its originating token
    Atom(Token),

    /// Quoted expression: 'expr, shorthand for (quote expr)
    Quote(Box<Expression>),

    /// Parenthesized form: (expr expr ...)
    List(Vec<Expression>),
}

impl Expression {
    /// Wraps `token` in an atom, handing it back if its kind cannot be an atom
    pub fn atom(token: Token) -> std::result::Result<Expression, Token> {
        if token.kind.is_atom() {
            Ok(Expression::Atom(token))
        } else {
            Err(token)
        }
    }

    /// Compares two trees by shape, token kinds and lexemes
    ///
    /// Offsets and token diagnostics are ignored, so a tree equals the tree obtained by printing
    /// and re-parsing it.
    pub fn structurally_eq(&self, other: &Expression) -> bool {
        match (self, other) {
            (Expression::Atom(a), Expression::Atom(b)) => a.kind == b.kind && a.lexeme == b.lexeme,
            (Expression::Quote(a), Expression::Quote(b)) => a.structurally_eq(b),
            (Expression::List(a), Expression::List(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.structurally_eq(y))
            }
            _ => false,
        }
    }

    /// Token of an atom
    pub fn as_atom(&self) -> Option<&Token> {
        match self {
            Expression::Atom(token) => Some(token),
            _ => None,
        }
    }

    /// Children of a list
    pub fn as_list(&self) -> Option<&[Expression]> {
        match self {
            Expression::List(items) => Some(items),
            _ => None,
        }
    }

    /// Quoted child of a quote form
    pub fn as_quoted(&self) -> Option<&Expression> {
        match self {
            Expression::Quote(inner) => Some(inner),
            _ => None,
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::Atom(token) if token.kind == TokenKind::String => {
                f.write_str("\"")?;
                for c in token.lexeme.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{}", c)?;
                }
                f.write_str("\"")
            }
            Expression::Atom(token) => f.write_str(&token.lexeme),
            Expression::Quote(inner) => write!(f, "'{}", inner),
            Expression::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str(")")
            }
        }
    }
}
