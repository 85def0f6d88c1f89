//! # Gong - A Minimal LISP Front End
//!
//! Scanner and recursive-descent parser for a small LISP dialect. Source text goes in, a tree of
//! S-expressions comes out, ready for a printer, REPL or evaluator to consume.
//!
//! ## Quick Start
//!
//! ```rust
//! use gong::{Expression, Parser, Scanner, TokenKind};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let code = "(define greet (lambda (name) (print \"hi\" name))) '(1 2 3)";
//!
//! // Tokenize (scan)
//! let mut scanner = Scanner::new(code);
//! let tokens = scanner.scan_tokens();
//! assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
//!
//! // Parse into expressions
//! let mut parser = Parser::new(tokens);
//! let forms = parser.parse()?;
//!
//! assert_eq!(forms.len(), 2);
//! assert!(matches!(forms[1], Expression::Quote(_)));
//! assert_eq!(forms[1].to_string(), "'(1 2 3)");
//! # Ok(())
//! # }
//! ```
//!
//! ## Grammar
//!
//! ```text
//! program    = form* EOF
//! form       = QUOTE primary | list
//! list       = "(" primary* ")"
//! primary    = NUMBER | STRING | BOOLEAN | IDENTIFIER | list
//! ```
//!
//! Inside a list, a quoted primary (`'x`) is also a valid element.
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Scanner → Tokens → Parser → Expressions → (printer / evaluator)
//! ```
//!
//! - [`Scanner`] - Tokenizes source code; never fails, malformed input becomes `Invalid` tokens
//!   or tokens carrying a [`LexError`]
//! - [`Parser`] - Builds [`Expression`] trees; the first syntax error aborts the parse
//!
//! ## Error Handling
//!
//! ```rust
//! let err = gong::read("(a (b)").unwrap_err();
//! assert_eq!(err.offset(), 6);
//! assert!(err.to_string().contains("closing the list opened at offset 0"));
//! ```

/// Version of the Gong front end
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;

// Re-export main types
pub use error::{Error, LexError, Result};
pub use lexer::{scan, Number, NumericForm, SExprScanner, Token, TokenKind};
pub use parser::{parse, Expression, ParserOptions, ParserState, SExprParser};

/// Type alias for the S-expression scanner (lexer).
/// Converts raw source text into tokens for the parser.
pub type Scanner = SExprScanner;

/// Type alias for the S-expression parser.
/// Converts tokens into a tree of expressions.
pub type Parser = SExprParser;

/// Scans and parses `source` in one step
pub fn read(source: &str) -> Result<Vec<Expression>> {
    parse(scan(source))
}
