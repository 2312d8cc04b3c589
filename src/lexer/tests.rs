//! Unit tests for the lexer module.
//!
//! This module contains tests for tokenization including:
//! - Keywords and identifiers (Unicode included)
//! - Numeric literals and the single-dot rule
//! - String literals with escape sequences and all three delimiters
//! - Operators and punctuation
//! - Comments
//! - Position tracking
//! - Error cases

use crate::errors::errors::ErrorImpl;

use super::{
    lexer::{tokenize, Lexer},
    tokens::TokenKind,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    tokenize(source).unwrap().iter().map(|t| t.kind).collect()
}

#[test]
fn test_tokenize_keywords() {
    let source = "function let if else for while do in range switch case default data type return asm syscall import then";
    let tokens = tokenize(source).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Function);
    assert_eq!(tokens[1].kind, TokenKind::Let);
    assert_eq!(tokens[2].kind, TokenKind::If);
    assert_eq!(tokens[3].kind, TokenKind::Else);
    assert_eq!(tokens[4].kind, TokenKind::For);
    assert_eq!(tokens[5].kind, TokenKind::While);
    assert_eq!(tokens[6].kind, TokenKind::Do);
    assert_eq!(tokens[7].kind, TokenKind::In);
    assert_eq!(tokens[8].kind, TokenKind::Range);
    assert_eq!(tokens[9].kind, TokenKind::Switch);
    assert_eq!(tokens[10].kind, TokenKind::Case);
    assert_eq!(tokens[11].kind, TokenKind::Default);
    assert_eq!(tokens[12].kind, TokenKind::Data);
    assert_eq!(tokens[13].kind, TokenKind::Type);
    assert_eq!(tokens[14].kind, TokenKind::Return);
    assert_eq!(tokens[15].kind, TokenKind::Asm);
    assert_eq!(tokens[16].kind, TokenKind::Syscall);
    assert_eq!(tokens[17].kind, TokenKind::Import);
    assert_eq!(tokens[18].kind, TokenKind::Then);
    assert_eq!(tokens[19].kind, TokenKind::EOF);
}

#[test]
fn test_keyword_prefixes_are_identifiers() {
    let tokens = tokenize("iffy input asmx functions").unwrap();

    for token in &tokens[..4] {
        assert_eq!(token.kind, TokenKind::Identifier);
    }
    assert_eq!(tokens[1].value, "input");
}

#[test]
fn test_tokenize_identifiers() {
    let tokens = tokenize("foo bar baz_123 _underscore CamelCase").unwrap();

    assert_eq!(tokens[0].value, "foo");
    assert_eq!(tokens[1].value, "bar");
    assert_eq!(tokens[2].value, "baz_123");
    assert_eq!(tokens[3].value, "_underscore");
    assert_eq!(tokens[4].value, "CamelCase");
    assert!(tokens[..5].iter().all(|t| t.kind == TokenKind::Identifier));
    assert_eq!(tokens[5].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_unicode_identifiers() {
    let tokens = tokenize("αβγ 变量 naïve x١").unwrap();

    assert_eq!(tokens.len(), 5);
    assert_eq!(tokens[0].kind, TokenKind::Identifier);
    assert_eq!(tokens[0].value, "αβγ");
    assert_eq!(tokens[0].length, 3);
    assert_eq!(tokens[1].value, "变量");
    assert_eq!(tokens[2].value, "naïve");
    // Arabic-Indic digit one continues an identifier
    assert_eq!(tokens[3].value, "x١");
}

#[test]
fn test_tokenize_numbers() {
    let tokens = tokenize("42 3.14 0 100.5").unwrap();

    assert_eq!(tokens[0].value, "42");
    assert_eq!(tokens[1].value, "3.14");
    assert_eq!(tokens[2].value, "0");
    assert_eq!(tokens[3].value, "100.5");
    assert!(tokens[..4].iter().all(|t| t.kind == TokenKind::Number));
    assert_eq!(tokens[4].kind, TokenKind::EOF);
}

#[test]
fn test_second_dot_starts_new_token() {
    let tokens = tokenize("45.67.5").unwrap();

    assert_eq!(tokens[0].kind, TokenKind::Number);
    assert_eq!(tokens[0].value, "45.67");
    assert_eq!(tokens[1].kind, TokenKind::Dot);
    assert_eq!(tokens[2].kind, TokenKind::Number);
    assert_eq!(tokens[2].value, "5");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_strings_with_all_delimiters() {
    let tokens = tokenize(r#""hello" 'world' `multiple words`"#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "hello");
    assert_eq!(tokens[0].length, 7);
    assert_eq!(tokens[1].value, "world");
    assert_eq!(tokens[2].value, "multiple words");
    assert_eq!(tokens[3].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_string_escapes() {
    let tokens = tokenize(r#""hello\nworld" "tab\there" "back\\slash" "cr\r" 'it\'s' `tick\``"#).unwrap();

    assert_eq!(tokens[0].value, "hello\nworld");
    assert_eq!(tokens[1].value, "tab\there");
    assert_eq!(tokens[2].value, "back\\slash");
    assert_eq!(tokens[3].value, "cr\r");
    assert_eq!(tokens[4].value, "it's");
    assert_eq!(tokens[5].value, "tick`");
}

#[test]
fn test_unknown_escape_is_preserved() {
    let tokens = tokenize(r#""a\qb""#).unwrap();

    assert_eq!(tokens[0].value, "a\\qb");
}

#[test]
fn test_other_quote_inside_string() {
    let tokens = tokenize(r#""it's" 'say "hi"'"#).unwrap();

    assert_eq!(tokens[0].value, "it's");
    assert_eq!(tokens[1].value, "say \"hi\"");
}

#[test]
fn test_unterminated_string_returns_partial_content() {
    let mut lexer = Lexer::new("let s = \"abc");

    let kinds: Vec<TokenKind> = lexer
        .by_ref()
        .map(|t| t.unwrap().kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::String,
            TokenKind::EOF
        ]
    );

    let errors = lexer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(
        errors[0].get_error(),
        &ErrorImpl::UnterminatedString { delimiter: '"' }
    );
    // Reported at the opening quote
    assert_eq!(errors[0].get_position().line, 0);
    assert_eq!(errors[0].get_position().column, 9);
}

#[test]
fn test_unterminated_string_partial_value() {
    let mut lexer = Lexer::new("\"abc");
    let token = lexer.next_token().unwrap();

    assert_eq!(token.kind, TokenKind::String);
    assert_eq!(token.value, "abc");
    assert!(tokenize("\"abc").is_err());
}

#[test]
fn test_tokenize_operators() {
    assert_eq!(
        kinds("+ - * / % == != < > <= >= = -> ?"),
        vec![
            TokenKind::Plus,
            TokenKind::Dash,
            TokenKind::Star,
            TokenKind::Slash,
            TokenKind::Percent,
            TokenKind::Equals,
            TokenKind::NotEquals,
            TokenKind::Less,
            TokenKind::Greater,
            TokenKind::LessEquals,
            TokenKind::GreaterEquals,
            TokenKind::Assignment,
            TokenKind::Arrow,
            TokenKind::Question,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_adjacent_two_character_operators() {
    assert_eq!(
        kinds("a->b<=c"),
        vec![
            TokenKind::Identifier,
            TokenKind::Arrow,
            TokenKind::Identifier,
            TokenKind::LessEquals,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
    assert_eq!(
        kinds("a - >b"),
        vec![
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Greater,
            TokenKind::Identifier,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_punctuation() {
    assert_eq!(
        kinds("( ) { } [ ] . , ; :"),
        vec![
            TokenKind::OpenParen,
            TokenKind::CloseParen,
            TokenKind::OpenCurly,
            TokenKind::CloseCurly,
            TokenKind::OpenBracket,
            TokenKind::CloseBracket,
            TokenKind::Dot,
            TokenKind::Comma,
            TokenKind::Semicolon,
            TokenKind::Colon,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_tokenize_line_comments() {
    let tokens = tokenize("let x = 5 // this is a comment\nlet y = 10").unwrap();

    assert_eq!(tokens[3].value, "5");
    assert_eq!(tokens[4].kind, TokenKind::Let);
    assert_eq!(tokens[4].line, 1);
    assert_eq!(tokens[7].value, "10");
    assert_eq!(tokens[8].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_block_comments() {
    let tokens = tokenize("a /* one\ntwo\nthree */ b/**/c").unwrap();

    assert_eq!(tokens.len(), 4);
    assert_eq!(tokens[1].value, "b");
    assert_eq!(tokens[1].line, 2);
    assert_eq!(tokens[1].column, 10);
    assert_eq!(tokens[2].value, "c");
}

#[test]
fn test_unterminated_block_comment() {
    let mut lexer = Lexer::new("x /* never closed");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::EOF);

    let errors = lexer.take_errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_error(), &ErrorImpl::UnterminatedComment);
    assert_eq!(errors[0].get_position().column, 3);
}

#[test]
fn test_token_positions_mark_token_end() {
    let tokens = tokenize("let x = 5;").unwrap();

    let ends: Vec<(u32, u32)> = tokens.iter().map(|t| (t.line, t.column)).collect();
    assert_eq!(ends[..5], [(0, 3), (0, 5), (0, 7), (0, 9), (0, 10)]);

    assert_eq!(tokens[0].length, 3);
    assert_eq!(tokens[0].start.column, 1);
    assert_eq!(tokens[4].length, 1);
}

#[test]
fn test_positions_across_lines() {
    let tokens = tokenize("a\n  bb\n\nccc").unwrap();

    assert_eq!((tokens[0].line, tokens[0].column), (0, 1));
    assert_eq!((tokens[1].line, tokens[1].column), (1, 4));
    assert_eq!(tokens[1].start.column, 3);
    assert_eq!((tokens[2].line, tokens[2].column), (3, 3));
}

#[test]
fn test_multiline_string_start_position() {
    let tokens = tokenize("  \"a\nb\"").unwrap();

    assert_eq!(tokens[0].start.line, 0);
    assert_eq!(tokens[0].start.column, 3);
    assert_eq!(tokens[0].line, 1);
    assert_eq!(tokens[0].column, 2);
    assert_eq!(tokens[0].value, "a\nb");
}

#[test]
fn test_illegal_character_is_an_error() {
    let result = tokenize("let x = @");
    let error = result.unwrap_err();

    assert_eq!(error.get_error(), &ErrorImpl::IllegalCharacter { character: '@' });
    assert_eq!(error.get_position().column, 9);
}

#[test]
fn test_lexer_continues_after_illegal_character() {
    let mut lexer = Lexer::new("a # b");

    assert_eq!(lexer.next_token().unwrap().value, "a");
    assert!(lexer.next_token().is_err());
    assert_eq!(lexer.next_token().unwrap().value, "b");
}

#[test]
fn test_lone_bang_is_illegal() {
    assert!(tokenize("!x").is_err());
}

#[test]
fn test_eof_is_idempotent() {
    let mut lexer = Lexer::new("x");

    assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Identifier);
    for _ in 0..3 {
        let token = lexer.next_token().unwrap();
        assert_eq!(token.kind, TokenKind::EOF);
        assert_eq!(token.length, 0);
    }
}

#[test]
fn test_eof_column_is_one_based() {
    let tokens = tokenize("").unwrap();
    assert_eq!((tokens[0].line, tokens[0].column), (0, 1));

    let tokens = tokenize("a\n").unwrap();
    assert_eq!(tokens[1].kind, TokenKind::EOF);
    assert_eq!((tokens[1].line, tokens[1].column), (1, 1));
    assert_eq!(tokens[1].start, tokens[1].end());
}

#[test]
fn test_iterator_stops_after_eof() {
    let lexer = Lexer::new("a b");

    assert_eq!(lexer.count(), 3);
}

#[test]
fn test_tokenize_whitespace_handling() {
    assert_eq!(
        kinds("  let \t  x \r\n  =   42  "),
        vec![
            TokenKind::Let,
            TokenKind::Identifier,
            TokenKind::Assignment,
            TokenKind::Number,
            TokenKind::EOF
        ]
    );
}

#[test]
fn test_tokenize_empty_string_literal() {
    let tokens = tokenize(r#""""#).unwrap();

    assert_eq!(tokens[0].kind, TokenKind::String);
    assert_eq!(tokens[0].value, "");
    assert_eq!(tokens[1].kind, TokenKind::EOF);
}

#[test]
fn test_tokenize_mixed_expression() {
    assert_eq!(
        kinds("x + 5 * (y - 3)"),
        vec![
            TokenKind::Identifier,
            TokenKind::Plus,
            TokenKind::Number,
            TokenKind::Star,
            TokenKind::OpenParen,
            TokenKind::Identifier,
            TokenKind::Dash,
            TokenKind::Number,
            TokenKind::CloseParen,
            TokenKind::EOF,
        ]
    );
}

#[test]
fn test_keyword_table_matches_kinds() {
    assert!(TokenKind::Syscall.is_keyword());
    assert!(!TokenKind::Identifier.is_keyword());
    assert_eq!(TokenKind::Arrow.lexeme(), "->");
}
