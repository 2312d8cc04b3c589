//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter { character: '@' },
        Position::new(0, 10),
    );

    assert_eq!(error.get_error_name(), "IllegalCharacter");
    assert!(error.is_lexical());
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::NoPrefixParse {
            kind: TokenKind::Star,
        },
        Position::new(3, 42),
    );

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 42);
    assert!(!error.is_lexical());
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::CloseParen,
            got: TokenKind::EOF,
        },
        Position::new(1, 7),
    );

    assert_eq!(
        error.to_string(),
        "expected next token to be CloseParen, got EOF instead at line 2, position 7"
    );
}

#[test]
fn test_illegal_character_message_names_character() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter { character: '#' },
        Position::new(0, 5),
    );

    let message = error.to_string();
    assert!(message.contains("'#'"));
    assert!(message.contains("line 1, position 5"));
}

#[test]
fn test_unterminated_string_error() {
    let error = Error::new(
        ErrorImpl::UnterminatedString { delimiter: '"' },
        Position::new(4, 1),
    );

    assert_eq!(error.get_error_name(), "UnterminatedString");
    assert!(error.is_lexical());
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::IllegalCharacter { character: '@' },
        Position::new(0, 0),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_missing_semicolon() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            expected: TokenKind::Semicolon,
            got: TokenKind::Let,
        },
        Position::new(0, 0),
    );

    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("semicolon")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}

#[test]
fn test_trailing_comma_error() {
    let error = Error::new(
        ErrorImpl::TrailingComma {
            closing: TokenKind::CloseBracket,
        },
        Position::new(0, 7),
    );

    assert_eq!(error.get_error_name(), "TrailingComma");
    assert_eq!(
        error.get_tip().to_string(),
        "Remove the comma before `]`"
    );
}

#[test]
fn test_invalid_argument_count_error() {
    let error = Error::new(
        ErrorImpl::InvalidArgumentCount {
            construct: "syscall",
            expected: "at most 6",
            received: 7,
        },
        Position::new(0, 0),
    );

    assert_eq!(error.get_error_name(), "InvalidArgumentCount");
    assert!(error.to_string().starts_with("syscall expects at most 6 arguments, received 7"));
}

#[test]
fn test_duplicate_function_error() {
    let error = Error::new(
        ErrorImpl::DuplicateFunction {
            function: "main".to_string(),
        },
        Position::new(0, 0),
    );

    assert_eq!(error.get_error_name(), "DuplicateFunction");
}

#[test]
fn test_nesting_too_deep_error() {
    let error = Error::new(ErrorImpl::NestingTooDeep { limit: 8 }, Position::new(0, 0));

    assert_eq!(error.get_error_name(), "NestingTooDeep");
    assert!(error.to_string().contains("8 levels"));
}
