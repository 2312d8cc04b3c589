//! Parser engine.
//!
//! The parser pulls tokens from a streaming [`Lexer`] into a small
//! fixed-capacity lookahead buffer and owns:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//! - The diagnostics collected so far
//!
//! Productions return `Result` and propagate failures with `?`. Only the
//! statement, class member and top-level loops record a diagnostic and
//! resynchronise, so every failure is reported exactly once.

use std::collections::{HashMap, VecDeque};

use tracing::debug;

use crate::{
    ast::ast::{Expr, Program, Stmt},
    errors::errors::{Error, ErrorImpl},
    lexer::{
        lexer::Lexer,
        tokens::{Token, TokenKind},
    },
    Position, Span,
};

use super::{
    decl::parse_program,
    expr::parse_expr,
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler, NUDLookup,
        StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
    types::{
        create_token_type_lookups, TypeBPLookup, TypeLEDHandler, TypeLEDLookup, TypeNUDHandler,
        TypeNUDLookup,
    },
};

/// Number of tokens the parser may look at without consuming them,
/// the current token included.
pub const LOOKAHEAD: usize = 4;

/// Tokens at which error recovery stops skipping.
pub const RECOVERY_POINTS: [TokenKind; 10] = [
    TokenKind::Semicolon,
    TokenKind::CloseCurly,
    TokenKind::EOF,
    TokenKind::Let,
    TokenKind::If,
    TokenKind::Return,
    TokenKind::Function,
    TokenKind::Type,
    TokenKind::Data,
    TokenKind::Import,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Deepest allowed recursion of `parse_expr` before `NestingTooDeep`.
    pub max_nesting_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_nesting_depth: 256,
        }
    }
}

/// The main parser structure that maintains parsing state.
pub struct Parser {
    /// Token source
    lexer: Lexer,
    /// Prefetched tokens, the front one is the current token
    lookahead: VecDeque<Token>,
    /// Most recently consumed token
    previous: Option<Token>,
    /// Number of tokens consumed so far
    consumed: usize,
    /// Diagnostics in the order they were found
    diagnostics: Vec<Error>,
    options: ParserOptions,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    /// Lookup table for type null denotation handlers
    type_nud_lookup: TypeNUDLookup,
    /// Lookup table for type left denotation handlers
    type_led_lookup: TypeLEDLookup,
    /// Lookup table for type binding powers
    type_binding_power_lookup: TypeBPLookup,
    /// Counter for synthetic lambda names
    lambda_count: usize,
    /// Current `parse_expr` recursion depth
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Parser::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &str, options: ParserOptions) -> Self {
        let mut parser = Parser {
            lexer: Lexer::new(source),
            lookahead: VecDeque::with_capacity(LOOKAHEAD),
            previous: None,
            consumed: 0,
            diagnostics: vec![],
            options,
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
            lambda_count: 0,
            depth: 0,
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser.fill(1);

        parser
    }

    /// Pulls tokens until `count` are buffered.
    ///
    /// Lexical errors are recorded as diagnostics; an illegal character is
    /// skipped and the next token is tried.
    fn fill(&mut self, count: usize) {
        while self.lookahead.len() < count {
            match self.lexer.next_token() {
                Ok(token) => {
                    self.diagnostics.extend(self.lexer.take_errors());
                    self.lookahead.push_back(token);
                }
                Err(error) => {
                    debug!(%error, "skipping illegal character");
                    self.diagnostics.push(error);
                    self.diagnostics.extend(self.lexer.take_errors());
                }
            }
        }
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.lookahead[0]
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current_token().kind
    }

    /// Returns the kind of the token `k` places after the current one.
    pub fn peek_kind(&mut self, k: usize) -> TokenKind {
        debug_assert!(k < LOOKAHEAD, "lookahead is bounded to {} tokens", LOOKAHEAD);
        self.fill(k + 1);
        self.lookahead[k].kind
    }

    /// Advances to the next token and returns the consumed one.
    ///
    /// At end of input the `EOF` token is returned again on every call.
    pub fn advance(&mut self) -> Token {
        let token = match self.lookahead.pop_front() {
            Some(token) => token,
            None => unreachable!("lookahead always holds the current token"),
        };
        self.fill(1);

        self.consumed += 1;
        self.previous = Some(token.clone());
        token
    }

    /// Expects a token of the specified kind, with optional custom error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        let kind = self.current_token_kind();
        if kind != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(Error::new(
                    ErrorImpl::UnexpectedToken {
                        expected: expected_kind,
                        got: kind,
                    },
                    self.get_position(),
                )),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind with default error message.
    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.expect_error(expected_kind, None)
    }

    /// Consumes the current token if it is of `kind`.
    pub fn eat(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Error for a token that cannot appear here.
    pub fn unexpected(&self, expected: TokenKind) -> Error {
        Error::new(
            ErrorImpl::UnexpectedToken {
                expected,
                got: self.current_token_kind(),
            },
            self.get_position(),
        )
    }

    /// Checks if there are more tokens to parse.
    pub fn has_tokens(&self) -> bool {
        self.current_token_kind() != TokenKind::EOF
    }

    /// Position of the current token (where it ends).
    pub fn get_position(&self) -> Position {
        self.current_token().end()
    }

    /// End of the most recently consumed token.
    pub fn previous_end(&self) -> Position {
        match &self.previous {
            Some(token) => token.end(),
            None => Position::null(),
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.previous_end())
    }

    /// Whether the current token starts on the line the previous one ended on.
    pub fn current_on_previous_line(&self) -> bool {
        match &self.previous {
            Some(token) => token.line == self.current_token().start.line,
            None => false,
        }
    }

    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn record_error(&mut self, error: Error) {
        debug!(%error, "syntax error");
        self.diagnostics.push(error);
    }

    /// Skips tokens until one of [`RECOVERY_POINTS`] is current.
    pub fn advance_to_recovery_point(&mut self) {
        while !self.current_token().is_one_of_many(&RECOVERY_POINTS) {
            let skipped = self.advance();
            debug!(kind = %skipped.kind, line = skipped.line, column = skipped.column, "recovery skipped token");
        }
    }

    /// Recovery after a failed production that started when `consumed_before`
    /// tokens had been consumed. A failure that consumed nothing skips one
    /// token first, so the calling loop always makes progress.
    pub fn recover_from(&mut self, consumed_before: usize) {
        if self.consumed == consumed_before && self.has_tokens() {
            self.advance();
        }
        self.advance_to_recovery_point();
    }

    /// Enters one level of expression nesting.
    pub fn enter_nesting(&mut self) -> Result<(), Error> {
        if self.depth >= self.options.max_nesting_depth {
            return Err(Error::new(
                ErrorImpl::NestingTooDeep {
                    limit: self.options.max_nesting_depth,
                },
                self.get_position(),
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn leave_nesting(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Hands out the next synthetic lambda name.
    pub fn next_lambda_name(&mut self) -> String {
        let name = format!("__lambda_{}", self.lambda_count);
        self.lambda_count += 1;
        name
    }

    /// Diagnostics rendered as text, in the order they were found.
    pub fn errors(&self) -> Vec<String> {
        self.diagnostics.iter().map(|error| error.to_string()).collect()
    }

    pub fn diagnostics(&self) -> &[Error] {
        &self.diagnostics
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Returns a reference to the statement lookup table.
    pub fn get_stmt_lookup(&self) -> &StmtLookup {
        &self.stmt_lookup
    }

    /// Returns a reference to the NUD (null denotation) lookup table.
    pub fn get_nud_lookup(&self) -> &NUDLookup {
        &self.nud_lookup
    }

    /// Returns a reference to the LED (left denotation) lookup table.
    pub fn get_led_lookup(&self) -> &LEDLookup {
        &self.led_lookup
    }

    /// Returns a reference to the binding power lookup table.
    pub fn get_bp_lookup(&self) -> &BPLookup {
        &self.binding_power_lookup
    }

    /// Returns a reference to the type binding power lookup table.
    pub fn get_type_bp_lookup(&self) -> &TypeBPLookup {
        &self.type_binding_power_lookup
    }

    /// Returns a reference to the type NUD lookup table.
    pub fn get_type_nud_lookup(&self) -> &TypeNUDLookup {
        &self.type_nud_lookup
    }

    /// Returns a reference to the type LED lookup table.
    pub fn get_type_led_lookup(&self) -> &TypeLEDLookup {
        &self.type_led_lookup
    }

    /// Registers a left denotation (infix) handler for a token.
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves binding powers alone: a token such as `-`
    /// or `(` keeps the power of its infix role.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    pub fn type_led(
        &mut self,
        kind: TokenKind,
        binding_power: BindingPower,
        led_fn: TypeLEDHandler,
    ) {
        self.type_binding_power_lookup.insert(kind, binding_power);
        self.type_led_lookup.insert(kind, led_fn);
    }

    /// Registers a type null denotation handler.
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses a whole source file into a [`Program`].
///
/// This is the main entry point for parsing. The returned parser holds the
/// diagnostics; the program is whatever could be built around them.
pub fn parse(source: &str) -> (Parser, Program) {
    parse_with_options(source, ParserOptions::default())
}

pub fn parse_with_options(source: &str, options: ParserOptions) -> (Parser, Program) {
    let mut parser = Parser::with_options(source, options);
    let program = parse_program(&mut parser);

    (parser, program)
}

/// Parses a single expression, optionally followed by `;`.
///
/// Input left over after the expression is reported as an error.
pub fn parse_expression(source: &str) -> (Parser, Option<Expr>) {
    let mut parser = Parser::new(source);

    let expr = match parse_expr(&mut parser, BindingPower::Default) {
        Ok(expr) => Some(expr),
        Err(error) => {
            parser.record_error(error);
            return (parser, None);
        }
    };

    parser.eat(TokenKind::Semicolon);
    if parser.has_tokens() {
        let error = parser.unexpected(TokenKind::EOF);
        parser.record_error(error);
    }

    (parser, expr)
}

/// Parses a sequence of statements, as found inside a block.
pub fn parse_statements(source: &str) -> (Parser, Vec<Stmt>) {
    let mut parser = Parser::new(source);
    let mut statements = vec![];

    while parser.has_tokens() {
        if parser.eat(TokenKind::Semicolon) {
            continue;
        }

        let consumed = parser.consumed();
        match parse_stmt(&mut parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.record_error(error);
                parser.recover_from(consumed);
            }
        }
    }

    (parser, statements)
}
