use super::ast::Expression;
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Tuning knobs for [`SExprParser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest list nesting accepted before failing with [`Error::NestingTooDeep`]
    pub max_depth: usize,
    /// Fail on atoms whose token carries a lexical diagnostic
    pub reject_malformed_tokens: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_depth: 256,
            reject_malformed_tokens: false,
        }
    }
}

/// Where the parser stands in the token stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Between top-level forms
    AwaitingForm,
    /// Inside an unfinished list
    AwaitingListElementOrClose,
    /// `Eof` reached or a syntax error surfaced; no further forms are produced
    Done,
}

/// Recursive-descent parser for Gong S-expressions
///
/// ```text
/// program = form* EOF
/// form    = QUOTE primary | list
/// list    = "(" ( QUOTE primary | primary )* ")"
/// primary = NUMBER | STRING | BOOLEAN | IDENTIFIER | list
/// ```
pub struct SExprParser {
    tokens: Vec<Token>,
    current: usize,
    depth: usize,
    state: ParserState,
    options: ParserOptions,
}

impl SExprParser {
    /// Creates a new S-expression parser
    pub fn new(tokens: Vec<Token>) -> Self {
        Self::with_options(tokens, ParserOptions::default())
    }

    /// Creates a parser with explicit options
    pub fn with_options(mut tokens: Vec<Token>, options: ParserOptions) -> Self {
        // Hand-built token streams may lack the terminator
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let offset = tokens
                .last()
                .map(|t| t.offset + t.lexeme.chars().count())
                .unwrap_or(0);
            tokens.push(Token::new(TokenKind::Eof, String::new(), offset));
        }

        SExprParser {
            tokens,
            current: 0,
            depth: 0,
            state: ParserState::AwaitingForm,
            options,
        }
    }

    /// Current state of the parser
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Parses all remaining top-level forms
    ///
    /// The first syntax error aborts the whole parse; no partial tree is returned.
    pub fn parse(&mut self) -> Result<Vec<Expression>> {
        let mut forms = Vec::new();

        while let Some(form) = self.next_form() {
            forms.push(form?);
        }

        tracing::debug!(forms = forms.len(), "parsed program");
        Ok(forms)
    }

    /// Parses the next top-level form
    ///
    /// Returns `None` once `Eof` is reached or after an error has been returned.
    pub fn next_form(&mut self) -> Option<Result<Expression>> {
        if self.state == ParserState::Done {
            return None;
        }

        if self.is_at_end() {
            self.state = ParserState::Done;
            return None;
        }

        let result = self.parse_form();
        match &result {
            Ok(_) => self.state = ParserState::AwaitingForm,
            Err(err) => {
                tracing::debug!(error = %err, "aborting parse");
                self.state = ParserState::Done;
            }
        }
        Some(result)
    }

    fn parse_form(&mut self) -> Result<Expression> {
        if self.check(TokenKind::Quote) {
            self.parse_quoted()
        } else {
            self.parse_list()
        }
    }

    /// Parse a quoted expression '(1 2 3)
    fn parse_quoted(&mut self) -> Result<Expression> {
        self.consume(TokenKind::Quote)?;
        let expr = self.parse_primary()?;
        Ok(Expression::Quote(Box::new(expr)))
    }

    /// Parse a list (the core S-expression form)
    fn parse_list(&mut self) -> Result<Expression> {
        let open = self.consume(TokenKind::OpenParen)?;

        if self.depth >= self.options.max_depth {
            return Err(Error::NestingTooDeep {
                limit: self.options.max_depth,
                offset: open.offset,
            });
        }
        self.depth += 1;
        self.state = ParserState::AwaitingListElementOrClose;
        tracing::trace!(offset = open.offset, depth = self.depth, "enter list");

        let mut elements = Vec::new();
        while !self.check(TokenKind::CloseParen) {
            if self.is_at_end() {
                return Err(Error::UnexpectedEof {
                    expected: format!("`)` closing the list opened at offset {}", open.offset),
                    offset: self.peek().offset,
                });
            }

            let element = if self.check(TokenKind::Quote) {
                self.parse_quoted()?
            } else {
                self.parse_primary()?
            };
            elements.push(element);
        }
        self.advance(); // Closing )

        self.depth -= 1;
        if self.depth == 0 {
            self.state = ParserState::AwaitingForm;
        }
        tracing::trace!(elements = elements.len(), "exit list");

        Ok(Expression::List(elements))
    }

    fn parse_primary(&mut self) -> Result<Expression> {
        match self.peek().kind {
            kind if kind.is_atom() => {
                let token = self.advance();
                if self.options.reject_malformed_tokens {
                    if let Some(error) = token.error {
                        return Err(Error::MalformedToken {
                            offset: token.offset,
                            error,
                        });
                    }
                }
                Expression::atom(token).map_err(|token| Error::UnexpectedToken {
                    expected: "expression".to_string(),
                    found: Self::describe(&token),
                    offset: token.offset,
                })
            }
            TokenKind::OpenParen => self.parse_list(),
            _ => Err(self.expected_error("expression")),
        }
    }

    // Helper methods

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.tokens[self.current - 1].clone()
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn consume(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.expected_error(&Self::token_kind_name(kind)))
        }
    }

    /// Get a human-readable name for a token kind
    fn token_kind_name(kind: TokenKind) -> String {
        match kind {
            TokenKind::OpenParen => "`(`".to_string(),
            TokenKind::CloseParen => "`)`".to_string(),
            TokenKind::Quote => "`'`".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Invalid => "invalid character".to_string(),
            kind => kind.to_string(),
        }
    }

    /// Describe the token actually found, including its text where it helps
    fn describe(token: &Token) -> String {
        match token.kind {
            TokenKind::String => format!("string {:?}", token.lexeme),
            TokenKind::Number
            | TokenKind::Boolean
            | TokenKind::Identifier
            | TokenKind::Invalid => {
                format!("{} `{}`", Self::token_kind_name(token.kind), token.lexeme)
            }
            kind => Self::token_kind_name(kind),
        }
    }

    /// Helper to create a syntax error with expected/found pattern at the current token
    fn expected_error(&self, expected: &str) -> Error {
        let token = self.peek();

        if token.kind == TokenKind::Eof {
            Error::UnexpectedEof {
                expected: expected.to_string(),
                offset: token.offset,
            }
        } else {
            Error::UnexpectedToken {
                expected: expected.to_string(),
                found: Self::describe(token),
                offset: token.offset,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LexError;
    use crate::lexer::SExprScanner;

    fn parse_str(source: &str) -> Result<Vec<Expression>> {
        let mut scanner = SExprScanner::new(source);
        let tokens = scanner.scan_tokens();
        let mut parser = SExprParser::new(tokens);
        parser.parse()
    }

    #[test]
    fn test_simple_list() {
        let forms = parse_str("(+ 1 2)").unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].as_list().map(|l| l.len()), Some(3));
    }

    #[test]
    fn test_empty_program() {
        assert!(parse_str("").unwrap().is_empty());
        assert!(parse_str("   \n").unwrap().is_empty());
    }

    #[test]
    fn test_top_level_quote() {
        let forms = parse_str("'x '(1 2)").unwrap();
        assert_eq!(forms.len(), 2);
        assert_eq!(forms[0].to_string(), "'x");
        assert_eq!(forms[1].to_string(), "'(1 2)");
    }

    #[test]
    fn test_top_level_atom_is_rejected() {
        let err = parse_str("foo").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedToken {
                expected: "`(`".to_string(),
                found: "identifier `foo`".to_string(),
                offset: 0,
            }
        );
    }

    #[test]
    fn test_double_quote_is_rejected() {
        let err = parse_str("(''a)").unwrap_err();
        assert!(matches!(err, Error::UnexpectedToken { offset: 2, .. }));
    }

    #[test]
    fn test_stray_close_paren() {
        let err = parse_str("(a) )").unwrap_err();
        assert_eq!(err.offset(), 4);
        assert!(err.to_string().contains("found `)`"));
    }

    #[test]
    fn test_unterminated_list_names_opening_paren() {
        let err = parse_str("(a (b)").unwrap_err();
        assert_eq!(
            err,
            Error::UnexpectedEof {
                expected: "`)` closing the list opened at offset 0".to_string(),
                offset: 6,
            }
        );
    }

    #[test]
    fn test_quote_at_end_of_input() {
        let err = parse_str("'").unwrap_err();
        assert!(matches!(err, Error::UnexpectedEof { offset: 1, .. }));
    }

    #[test]
    fn test_invalid_token_in_list() {
        let err = parse_str("(a # b)").unwrap_err();
        assert!(err.to_string().contains("invalid character `#`"));
    }

    #[test]
    fn test_state_transitions() {
        let tokens = SExprScanner::new("(a) (b)").scan_tokens();
        let mut parser = SExprParser::new(tokens);
        assert_eq!(parser.state(), ParserState::AwaitingForm);

        assert!(parser.next_form().unwrap().is_ok());
        assert_eq!(parser.state(), ParserState::AwaitingForm);
        assert!(parser.next_form().unwrap().is_ok());
        assert!(parser.next_form().is_none());
        assert_eq!(parser.state(), ParserState::Done);
        assert!(parser.next_form().is_none());
        assert!(parser.parse().unwrap().is_empty());
    }

    #[test]
    fn test_error_ends_parse() {
        let tokens = SExprScanner::new("(a) x (b)").scan_tokens();
        let mut parser = SExprParser::new(tokens);
        assert!(parser.next_form().unwrap().is_ok());
        assert!(parser.next_form().unwrap().is_err());
        assert_eq!(parser.state(), ParserState::Done);
        assert!(parser.next_form().is_none());
    }

    #[test]
    fn test_nesting_limit() {
        let options = ParserOptions {
            max_depth: 3,
            ..ParserOptions::default()
        };

        let tokens = SExprScanner::new("(((a)))").scan_tokens();
        assert!(SExprParser::with_options(tokens, options).parse().is_ok());

        let tokens = SExprScanner::new("((((a))))").scan_tokens();
        let err = SExprParser::with_options(tokens, options)
            .parse()
            .unwrap_err();
        assert_eq!(err, Error::NestingTooDeep { limit: 3, offset: 3 });
    }

    #[test]
    fn test_malformed_tokens_in_strict_mode() {
        let source = "(print \"abc)";
        assert!(parse_str("(print 1.2.3)").is_ok());

        let tokens = SExprScanner::new(source).scan_tokens();
        let options = ParserOptions {
            reject_malformed_tokens: true,
            ..ParserOptions::default()
        };
        let err = SExprParser::with_options(tokens, options)
            .parse()
            .unwrap_err();
        assert_eq!(
            err,
            Error::MalformedToken {
                offset: 7,
                error: LexError::UnterminatedString,
            }
        );
    }

    #[test]
    fn test_tokens_without_eof() {
        let tokens = vec![
            Token::new(TokenKind::OpenParen, "(", 0),
            Token::new(TokenKind::Identifier, "abc", 1),
        ];
        let err = SExprParser::new(tokens).parse().unwrap_err();
        assert_eq!(err.offset(), 4);

        assert!(SExprParser::new(Vec::new()).parse().unwrap().is_empty());
    }
}
