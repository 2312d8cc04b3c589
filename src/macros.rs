//! Utility macros for the front end.
//!
//! - `MK_TOKEN!` - Creates a Token ending at the lexer's current position
//! - `MK_SIMPLE_TOKEN!` - Consumes a fixed lexeme and creates its Token
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance that ends at the lexer's current position.
///
/// # Arguments
///
/// * `$lexer` - The lexer (its `line`/`column` mark the end of the token)
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$start` - Position of the first character of the token
/// * `$length` - Number of source characters consumed
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(lexer, TokenKind::Number, "42".to_string(), start, 2);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($lexer:expr, $kind:expr, $value:expr, $start:expr, $length:expr) => {
        Token {
            kind: $kind,
            value: $value,
            line: $lexer.line,
            column: $lexer.column,
            length: $length as u32,
            start: $start,
        }
    };
}

/// Consumes a fixed operator or delimiter lexeme and creates its Token.
///
/// # Example
///
/// ```ignore
/// '+' => MK_SIMPLE_TOKEN!(self, TokenKind::Plus, "+"),
/// ```
#[macro_export]
macro_rules! MK_SIMPLE_TOKEN {
    ($lexer:expr, $kind:expr, $value:literal) => {{
        let start = $lexer.next_position();
        $lexer.advance_n($value.chars().count());
        MK_TOKEN!($lexer, $kind, String::from($value), start, $value.chars().count())
    }};
}
