use super::token::{Token, TokenKind};
use crate::error::LexError;

/// Scanner for S-expression Gong syntax
///
/// Single left-to-right pass over the characters of the source. Scanning never fails: malformed
/// input shows up as `Invalid` tokens or as tokens carrying a [`LexError`].
pub struct SExprScanner {
    /// Source code as character vector
    source: Vec<char>,
    /// Accumulated tokens
    tokens: Vec<Token>,
    /// Start position of current token
    start: usize,
    /// Current position in source
    current: usize,
}

impl SExprScanner {
    /// Creates a new scanner from source code
    pub fn new(source: &str) -> Self {
        SExprScanner {
            source: source.chars().collect(),
            tokens: Vec::new(),
            start: 0,
            current: 0,
        }
    }

    /// Scans all tokens from source code, ending with a single `Eof` token
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        while !self.is_at_end() {
            self.start = self.current;
            self.scan_token();
        }

        self.tokens
            .push(Token::new(TokenKind::Eof, String::new(), self.source.len()));

        let tokens = std::mem::take(&mut self.tokens);
        tracing::debug!(
            tokens = tokens.len(),
            diagnostics = tokens.iter().filter(|t| !t.is_well_formed()).count(),
            "scanned source"
        );
        tokens
    }

    fn scan_token(&mut self) {
        let c = self.advance();

        match c {
            ' ' | '\t' | '\n' | '\r' => {}

            '\'' => self.add_token(TokenKind::Quote, None),
            '(' => self.add_token(TokenKind::OpenParen, None),
            ')' => self.add_token(TokenKind::CloseParen, None),

            c if c.is_ascii_digit() => self.scan_number(),

            '"' => self.scan_string(),

            c if is_identifier_start(c) => self.scan_identifier(),

            _ => self.add_token(TokenKind::Invalid, None),
        }
    }

    fn scan_number(&mut self) {
        let mut error = None;

        let radix = match (self.source[self.start], self.peek()) {
            ('0', 'x') => Some(16),
            ('0', 'b') => Some(2),
            _ => None,
        };

        if let Some(radix) = radix {
            self.advance(); // x or b
            let digits_start = self.current;
            while self.peek().is_digit(radix) {
                self.advance();
            }
            if self.current == digits_start {
                error = Some(LexError::MissingDigits { radix });
            }
        } else {
            let mut points = 0;
            while self.peek().is_ascii_digit() || self.peek() == '.' {
                if self.advance() == '.' {
                    points += 1;
                }
            }
            if points > 1 {
                error = Some(LexError::MultipleDecimalPoints);
            }
        }

        // Characters glued to the literal stay part of it
        if is_number_continue(self.peek()) {
            let digit = self.peek();
            while is_number_continue(self.peek()) {
                self.advance();
            }
            error.get_or_insert(LexError::InvalidDigit { digit });
        }

        self.add_token(TokenKind::Number, error);
    }

    fn scan_string(&mut self) {
        let mut value = String::new();

        loop {
            if self.is_at_end() {
                self.push_token(
                    TokenKind::String,
                    value,
                    Some(LexError::UnterminatedString),
                );
                return;
            }

            match self.advance() {
                '"' => break,
                '\\' => {
                    if !self.is_at_end() {
                        value.push(self.advance());
                    }
                }
                c => value.push(c),
            }
        }

        self.push_token(TokenKind::String, value, None);
    }

    fn scan_identifier(&mut self) {
        while is_identifier_continue(self.peek()) {
            self.advance();
        }

        let kind = match self.current_lexeme().as_str() {
            "true" | "false" => TokenKind::Boolean,
            _ => TokenKind::Identifier,
        };
        self.add_token(kind, None);
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn current_lexeme(&self) -> String {
        self.source[self.start..self.current].iter().collect()
    }

    fn add_token(&mut self, kind: TokenKind, error: Option<LexError>) {
        let lexeme = self.current_lexeme();
        self.push_token(kind, lexeme, error);
    }

    fn push_token(&mut self, kind: TokenKind, lexeme: String, error: Option<LexError>) {
        let mut token = Token::new(kind, lexeme, self.start);
        token.error = error;

        if !token.is_well_formed() {
            tracing::trace!(token = %token, "malformed token");
        }
        self.tokens.push(token);
    }
}

/// Symbols that may appear in identifiers without letters, such as `->` or `/`
const OPERATOR_CHARS: &[char] = &[
    '+', '-', '*', '/', '%', '<', '>', '=', '!', '?', '_', '&', '.', ':',
];

fn is_operator(c: char) -> bool {
    OPERATOR_CHARS.contains(&c)
}

fn is_number_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '.'
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || is_operator(c)
}

fn is_identifier_continue(c: char) -> bool {
    c.is_alphanumeric() || is_operator(c)
}

/// Scans `source` into tokens
pub fn scan(source: &str) -> Vec<Token> {
    SExprScanner::new(source).scan_tokens()
}

/// Tokens that are `Invalid` or carry a diagnostic
pub fn diagnostics(tokens: &[Token]) -> impl Iterator<Item = &Token> {
    tokens.iter().filter(|token| !token.is_well_formed())
}
