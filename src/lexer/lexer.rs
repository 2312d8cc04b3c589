use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_SIMPLE_TOKEN, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

lazy_static! {
    static ref IDENTIFIER_START: Regex = Regex::new(r"^[\p{L}_]$").unwrap();
    static ref IDENTIFIER_CONTINUE: Regex = Regex::new(r"^[\p{L}\p{Nd}_]$").unwrap();
}

fn matches_class(regex: &Regex, c: char) -> bool {
    let mut buf = [0u8; 4];
    regex.is_match(c.encode_utf8(&mut buf))
}

/// Unicode letter (any `L` category) or underscore.
pub fn is_identifier_start(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphabetic() || c == '_'
    } else {
        matches_class(&IDENTIFIER_START, c)
    }
}

/// Identifier start characters plus Unicode decimal digits.
pub fn is_identifier_continue(c: char) -> bool {
    if c.is_ascii() {
        c.is_ascii_alphanumeric() || c == '_'
    } else {
        matches_class(&IDENTIFIER_CONTINUE, c)
    }
}

/// Streaming tokenizer.
///
/// Tokens are produced on demand by [`Lexer::next_token`]. Once the end of
/// input is reached every further call yields another `EOF` token.
#[derive(Clone, Debug)]
pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    pending_errors: Vec<Error>,
    finished: bool,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            source: source.chars().collect(),
            pos: 0,
            line: 0,
            column: 0,
            pending_errors: vec![],
            finished: false,
        }
    }

    /// Looks `k` characters past the current one without consuming anything.
    pub fn peek(&self, k: usize) -> Option<char> {
        self.source.get(self.pos + k).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek(0)?;
        self.pos += 1;

        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }

        Some(c)
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    /// Position the next consumed character will occupy.
    pub fn next_position(&self) -> Position {
        Position::new(self.line, self.column + 1)
    }

    /// Lexical errors that did not stop the token stream (unterminated
    /// strings and comments). Draining them is the caller's job.
    pub fn take_errors(&mut self) -> Vec<Error> {
        std::mem::take(&mut self.pending_errors)
    }

    pub fn next_token(&mut self) -> Result<Token, Error> {
        self.skip_trivia();

        let Some(c) = self.peek(0) else {
            // Columns are 1-based even when the line is empty
            let column = self.column.max(1);
            return Ok(Token {
                kind: TokenKind::EOF,
                value: String::new(),
                line: self.line,
                column,
                length: 0,
                start: Position::new(self.line, column),
            });
        };

        let token = match c {
            '"' | '\'' | '`' => self.read_string(c),
            c if c.is_ascii_digit() => self.read_number(),
            c if is_identifier_start(c) => self.read_identifier(),
            '+' => MK_SIMPLE_TOKEN!(self, TokenKind::Plus, "+"),
            '-' if self.peek(1) == Some('>') => MK_SIMPLE_TOKEN!(self, TokenKind::Arrow, "->"),
            '-' => MK_SIMPLE_TOKEN!(self, TokenKind::Dash, "-"),
            '*' => MK_SIMPLE_TOKEN!(self, TokenKind::Star, "*"),
            '/' => MK_SIMPLE_TOKEN!(self, TokenKind::Slash, "/"),
            '%' => MK_SIMPLE_TOKEN!(self, TokenKind::Percent, "%"),
            '=' if self.peek(1) == Some('=') => MK_SIMPLE_TOKEN!(self, TokenKind::Equals, "=="),
            '=' => MK_SIMPLE_TOKEN!(self, TokenKind::Assignment, "="),
            '!' if self.peek(1) == Some('=') => MK_SIMPLE_TOKEN!(self, TokenKind::NotEquals, "!="),
            '<' if self.peek(1) == Some('=') => MK_SIMPLE_TOKEN!(self, TokenKind::LessEquals, "<="),
            '<' => MK_SIMPLE_TOKEN!(self, TokenKind::Less, "<"),
            '>' if self.peek(1) == Some('=') => MK_SIMPLE_TOKEN!(self, TokenKind::GreaterEquals, ">="),
            '>' => MK_SIMPLE_TOKEN!(self, TokenKind::Greater, ">"),
            '.' => MK_SIMPLE_TOKEN!(self, TokenKind::Dot, "."),
            ';' => MK_SIMPLE_TOKEN!(self, TokenKind::Semicolon, ";"),
            ':' => MK_SIMPLE_TOKEN!(self, TokenKind::Colon, ":"),
            '?' => MK_SIMPLE_TOKEN!(self, TokenKind::Question, "?"),
            ',' => MK_SIMPLE_TOKEN!(self, TokenKind::Comma, ","),
            '(' => MK_SIMPLE_TOKEN!(self, TokenKind::OpenParen, "("),
            ')' => MK_SIMPLE_TOKEN!(self, TokenKind::CloseParen, ")"),
            '{' => MK_SIMPLE_TOKEN!(self, TokenKind::OpenCurly, "{"),
            '}' => MK_SIMPLE_TOKEN!(self, TokenKind::CloseCurly, "}"),
            '[' => MK_SIMPLE_TOKEN!(self, TokenKind::OpenBracket, "["),
            ']' => MK_SIMPLE_TOKEN!(self, TokenKind::CloseBracket, "]"),
            _ => {
                self.advance();
                return Err(Error::new(
                    ErrorImpl::IllegalCharacter { character: c },
                    Position::new(self.line, self.column),
                ));
            }
        };

        trace!(kind = %token.kind, value = %token.value, line = token.line, column = token.column, "token");
        Ok(token)
    }

    fn skip_trivia(&mut self) {
        loop {
            match (self.peek(0), self.peek(1)) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while let Some(c) = self.peek(0) {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.next_position();
        self.advance_n(2);

        loop {
            match (self.peek(0), self.peek(1)) {
                (Some('*'), Some('/')) => {
                    self.advance_n(2);
                    return;
                }
                (Some(_), _) => {
                    self.advance();
                }
                (None, _) => {
                    self.pending_errors
                        .push(Error::new(ErrorImpl::UnterminatedComment, start));
                    return;
                }
            }
        }
    }

    // Digits with at most one '.', so "1.2.3" lexes as Number Dot Number.
    fn read_number(&mut self) -> Token {
        let start = self.next_position();
        let mut literal = String::new();
        let mut seen_dot = false;

        while let Some(c) = self.peek(0) {
            if c.is_ascii_digit() {
                literal.push(c);
            } else if c == '.' && !seen_dot {
                seen_dot = true;
                literal.push(c);
            } else {
                break;
            }
            self.advance();
        }

        let length = literal.chars().count();
        MK_TOKEN!(self, TokenKind::Number, literal, start, length)
    }

    fn read_identifier(&mut self) -> Token {
        let start = self.next_position();
        let mut value = String::new();

        while let Some(c) = self.peek(0) {
            if !is_identifier_continue(c) {
                break;
            }
            value.push(c);
            self.advance();
        }

        let kind = RESERVED_LOOKUP
            .get(value.as_str())
            .copied()
            .unwrap_or(TokenKind::Identifier);
        let length = value.chars().count();

        MK_TOKEN!(self, kind, value, start, length)
    }

    fn read_string(&mut self, delimiter: char) -> Token {
        let start = self.next_position();
        let start_pos = self.pos;
        self.advance();

        let mut result = String::new();

        loop {
            match self.advance() {
                None => {
                    self.pending_errors
                        .push(Error::new(ErrorImpl::UnterminatedString { delimiter }, start));
                    break;
                }
                Some(c) if c == delimiter => break,
                Some('\\') => match self.advance() {
                    Some('n') => result.push('\n'),
                    Some('t') => result.push('\t'),
                    Some('r') => result.push('\r'),
                    Some(c @ ('\\' | '"' | '\'' | '`')) => result.push(c),
                    Some(other) => {
                        // Unknown escapes are kept as written
                        result.push('\\');
                        result.push(other);
                    }
                    None => {
                        result.push('\\');
                        self.pending_errors
                            .push(Error::new(ErrorImpl::UnterminatedString { delimiter }, start));
                        break;
                    }
                },
                Some(c) => result.push(c),
            }
        }

        let length = self.pos - start_pos;
        MK_TOKEN!(self, TokenKind::String, result, start, length)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, Error>;

    /// Yields every token up to and including the first `EOF`.
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if matches!(&result, Ok(token) if token.kind == TokenKind::EOF) {
            self.finished = true;
        }

        Some(result)
    }
}

/// Tokenizes a whole source string, stopping at the first lexical error.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    while let Some(token) = lex.next() {
        tokens.push(token?);

        if let Some(error) = lex.take_errors().into_iter().next() {
            return Err(error);
        }
    }

    Ok(tokens)
}
