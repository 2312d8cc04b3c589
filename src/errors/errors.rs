use std::fmt::Display;

use thiserror::Error;

use crate::{lexer::tokens::TokenKind, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn is_lexical(&self) -> bool {
        matches!(
            self.internal_error,
            ErrorImpl::IllegalCharacter { .. }
                | ErrorImpl::UnterminatedString { .. }
                | ErrorImpl::UnterminatedComment
        )
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => "IllegalCharacter",
            ErrorImpl::UnterminatedString { .. } => "UnterminatedString",
            ErrorImpl::UnterminatedComment => "UnterminatedComment",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::NoPrefixParse { .. } => "NoPrefixParse",
            ErrorImpl::TrailingComma { .. } => "TrailingComma",
            ErrorImpl::InvalidParameter { .. } => "InvalidParameter",
            ErrorImpl::InvalidArgumentCount { .. } => "InvalidArgumentCount",
            ErrorImpl::NumberParseError { .. } => "NumberParseError",
            ErrorImpl::DuplicateFunction { .. } => "DuplicateFunction",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::IllegalCharacter { .. } => ErrorTip::None,
            ErrorImpl::UnterminatedString { delimiter } => ErrorTip::Suggestion(format!(
                "Add a closing `{}` to end the string",
                delimiter
            )),
            ErrorImpl::UnterminatedComment => {
                ErrorTip::Suggestion(String::from("Add `*/` to close the comment"))
            }
            ErrorImpl::UnexpectedToken { expected, got } => match expected {
                TokenKind::Semicolon => ErrorTip::Suggestion(format!(
                    "Unexpected token: `{}`, did you miss a semicolon?",
                    got
                )),
                TokenKind::CloseCurly | TokenKind::CloseParen | TokenKind::CloseBracket => {
                    ErrorTip::Suggestion(format!("Missing closing `{}`", expected.lexeme()))
                }
                _ => ErrorTip::None,
            },
            ErrorImpl::NoPrefixParse { kind } => ErrorTip::Suggestion(format!(
                "`{}` cannot start an expression",
                kind.lexeme()
            )),
            ErrorImpl::TrailingComma { closing } => ErrorTip::Suggestion(format!(
                "Remove the comma before `{}`",
                closing.lexeme()
            )),
            ErrorImpl::InvalidParameter { .. } => ErrorTip::Suggestion(String::from(
                "Parameters are identifiers, optionally followed by `(Type)`",
            )),
            ErrorImpl::InvalidArgumentCount { .. } => ErrorTip::None,
            ErrorImpl::NumberParseError { token } => {
                ErrorTip::Suggestion(format!("Invalid number: `{}`", token))
            }
            ErrorImpl::DuplicateFunction { function } => {
                ErrorTip::Suggestion(format!("Function `{}` already declared", function))
            }
            ErrorImpl::NestingTooDeep { .. } => ErrorTip::Suggestion(String::from(
                "Split the expression into smaller pieces",
            )),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.internal_error, self.position)
    }
}

impl std::error::Error for Error {}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ErrorImpl {
    #[error("illegal character {character:?}")]
    IllegalCharacter { character: char },
    #[error("unterminated string literal opened with {delimiter:?}")]
    UnterminatedString { delimiter: char },
    #[error("unterminated block comment")]
    UnterminatedComment,
    #[error("expected next token to be {expected}, got {got} instead")]
    UnexpectedToken { expected: TokenKind, got: TokenKind },
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParse { kind: TokenKind },
    #[error("trailing comma before {closing}")]
    TrailingComma { closing: TokenKind },
    #[error("invalid parameter `{found}`")]
    InvalidParameter { found: String },
    #[error("{construct} expects {expected} arguments, received {received}")]
    InvalidArgumentCount {
        construct: &'static str,
        expected: &'static str,
        received: usize,
    },
    #[error("error parsing number: {token:?}")]
    NumberParseError { token: String },
    #[error("function {function:?} already declared")]
    DuplicateFunction { function: String },
    #[error("expression nesting exceeds {limit} levels")]
    NestingTooDeep { limit: usize },
}
