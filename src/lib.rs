#![allow(clippy::module_inception)]

use std::fmt::Display;

use crate::errors::errors::{Error, ErrorTip};

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in the source text.
///
/// `line` is 0-based, `column` is 1-based and counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn null() -> Self {
        Position { line: 0, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, position {}", self.line + 1, self.column)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: Position, end: Position) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

/// Returns the 1-based line number, the text of the line and the 0-based
/// character offset of `position` inside that line.
pub fn get_line_at_position(source: &str, position: Position) -> Option<(usize, String, usize)> {
    let line = source.split('\n').nth(position.line as usize)?;
    let line = line.strip_suffix('\r').unwrap_or(line);
    let line_pos = (position.column as usize).saturating_sub(1);

    Some((position.line as usize + 1, line.to_string(), line_pos))
}

/// Renders a diagnostic with a source excerpt and a caret under the offending column.
pub fn render_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: UnexpectedToken (expected next token to be Semicolon, got Let instead)
        -> final.lang
           |
         2 | let y = 10;
           | ^
    */

    let mut out = String::new();

    if let ErrorTip::None = error.get_tip() {
        out.push_str(&format!("Error: {} ({})\n", error.get_error_name(), error));
    } else {
        out.push_str(&format!(
            "Error: {} ({}) - {}\n",
            error.get_error_name(),
            error,
            error.get_tip()
        ));
    }
    out.push_str(&format!("-> {}\n", file));

    let Some((line, line_text, line_pos)) = get_line_at_position(source, *error.get_position()) else {
        return out;
    };

    let line_string = line.to_string();
    let padding = line_string.len() + 2;
    out.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' || c == '\t' {
            start += 1;
        } else {
            break;
        }
    }

    (string.chars().skip(start).collect(), start)
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::errors::{Error, ErrorImpl},
        lexer::tokens::TokenKind,
        Position,
    };

    #[test]
    fn test_get_line_at_position() {
        let source = "Hello, world!\nsecond\nthird line\nTesting { }\n";

        let (line_number, line, line_pos) =
            super::get_line_at_position(source, Position::new(0, 11)).unwrap();
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) =
            super::get_line_at_position(source, Position::new(3, 9)).unwrap();
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_past_end() {
        assert!(super::get_line_at_position("one line", Position::new(4, 1)).is_none());
    }

    #[test]
    fn test_render_error_points_at_column() {
        let source = "main() -> {\n    let x = 5\n    let y = 10;\n}";
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                expected: TokenKind::Semicolon,
                got: TokenKind::Let,
            },
            Position::new(2, 7),
        );

        let rendered = super::render_error(&error, source, "test.lang");
        let lines: Vec<&str> = rendered.lines().collect();

        assert!(lines[0].starts_with("Error: UnexpectedToken"));
        assert_eq!(lines[1], "-> test.lang");
        assert_eq!(lines[3], "3 | let y = 10;");
        assert_eq!(lines[4], "  | --^");
    }

    #[test]
    fn test_position_display_is_one_based_line() {
        assert_eq!(Position::new(0, 3).to_string(), "line 1, position 3");
    }
}
