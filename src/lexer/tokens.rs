use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::{Position, Span};

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("function", TokenKind::Function);
        map.insert("let", TokenKind::Let);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("then", TokenKind::Then);
        map.insert("for", TokenKind::For);
        map.insert("while", TokenKind::While);
        map.insert("do", TokenKind::Do);
        map.insert("in", TokenKind::In);
        map.insert("range", TokenKind::Range);
        map.insert("switch", TokenKind::Switch);
        map.insert("case", TokenKind::Case);
        map.insert("default", TokenKind::Default);
        map.insert("data", TokenKind::Data);
        map.insert("type", TokenKind::Type);
        map.insert("return", TokenKind::Return);
        map.insert("asm", TokenKind::Asm);
        map.insert("syscall", TokenKind::Syscall);
        map.insert("import", TokenKind::Import);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Dot,
    Semicolon,
    Colon,
    Question,
    Comma,
    Arrow,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,

    // Reserved
    Function,
    Let,
    If,
    Else,
    Then,
    For,
    While,
    Do,
    In,
    Range,
    Switch,
    Case,
    Default,
    Data,
    Type,
    Return,
    Asm,
    Syscall,
    Import,
}

impl TokenKind {
    /// Source spelling of fixed tokens, used in suggestions.
    pub fn lexeme(&self) -> &'static str {
        match self {
            TokenKind::EOF => "end of input",
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::OpenBracket => "[",
            TokenKind::CloseBracket => "]",
            TokenKind::OpenCurly => "{",
            TokenKind::CloseCurly => "}",
            TokenKind::OpenParen => "(",
            TokenKind::CloseParen => ")",
            TokenKind::Assignment => "=",
            TokenKind::Equals => "==",
            TokenKind::NotEquals => "!=",
            TokenKind::Less => "<",
            TokenKind::LessEquals => "<=",
            TokenKind::Greater => ">",
            TokenKind::GreaterEquals => ">=",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Comma => ",",
            TokenKind::Arrow => "->",
            TokenKind::Plus => "+",
            TokenKind::Dash => "-",
            TokenKind::Slash => "/",
            TokenKind::Star => "*",
            TokenKind::Percent => "%",
            TokenKind::Function => "function",
            TokenKind::Let => "let",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Then => "then",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::In => "in",
            TokenKind::Range => "range",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::Data => "data",
            TokenKind::Type => "type",
            TokenKind::Return => "return",
            TokenKind::Asm => "asm",
            TokenKind::Syscall => "syscall",
            TokenKind::Import => "import",
        }
    }

    pub fn is_keyword(&self) -> bool {
        RESERVED_LOOKUP.values().any(|kind| kind == self)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// A lexed token. Immutable once produced.
///
/// `line` and `column` locate the *last* character of the token
/// (0-based line, 1-based column); `start` locates the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub line: u32,
    pub column: u32,
    pub length: u32,
    pub start: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::String | TokenKind::Identifier | TokenKind::Number => {
                write!(f, "{} ({}) {}:{}", self.kind, self.value, self.line, self.column)
            }
            _ => write!(f, "{} {}:{}", self.kind, self.line, self.column),
        }
    }
}

impl Token {
    pub fn end(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end())
    }

    pub fn is_one_of_many(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }
}
