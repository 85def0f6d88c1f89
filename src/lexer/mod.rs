//! Lexical analysis for Gong
//!
//! Converts source text into a flat stream of tokens for the S-expression parser.

mod sexpr_scanner;
mod token;

pub use sexpr_scanner::{diagnostics, scan, SExprScanner};
pub use token::{Number, NumericForm, Token, TokenKind};
