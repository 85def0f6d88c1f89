//! Gong Parser Module
//!
//! Parses the token stream into a tree of S-expressions.

mod ast;
mod sexpr_parser;

pub use ast::Expression;
pub use sexpr_parser::{ParserOptions, ParserState, SExprParser};

use crate::error::Result;
use crate::lexer::Token;

/// Parses a token stream into its top-level forms
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Expression>> {
    SExprParser::new(tokens).parse()
}
