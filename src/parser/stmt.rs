use crate::{
    ast::{
        ast::{Node, Stmt},
        statements::{BlockStatement, ExpressionStatement, ImportStatement, LetStatement, ReturnStatement},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::{expr::identifier_from, parser::Parser, types::parse_type};

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if let Some(handler) = parser
        .get_stmt_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        return handler(parser);
    }

    let expression = parse_expr(parser, BindingPower::Default)?;
    parser.eat(TokenKind::Semicolon);

    Ok(Stmt::Expression(ExpressionStatement {
        span: expression.span(),
        expression,
    }))
}

/// Parses `{ statements }`.
///
/// A statement that fails is reported, skipped up to a recovery point and
/// left out of the block. Running into end of input reports the missing
/// `}` and returns what was collected.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStatement, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?.start;
    let mut statements = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => {
                let error = parser.unexpected(TokenKind::CloseCurly);
                parser.record_error(error);

                return Ok(BlockStatement {
                    statements,
                    span: parser.span_from(start),
                });
            }
            TokenKind::Semicolon => {
                parser.advance();
                continue;
            }
            _ => {}
        }

        let consumed = parser.consumed();
        match parse_stmt(parser) {
            Ok(stmt) => statements.push(stmt),
            Err(error) => {
                parser.record_error(error);
                parser.recover_from(consumed);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(BlockStatement {
        statements,
        span: parser.span_from(start),
    })
}

/// `let name [(Type)] [= value]`, without the terminator.
pub fn parse_let_binding(parser: &mut Parser) -> Result<LetStatement, Error> {
    let start = parser.expect(TokenKind::Let)?.start;
    let name = identifier_from(parser.expect(TokenKind::Identifier)?);

    let type_annotation = if parser.eat(TokenKind::OpenParen) {
        let type_annotation = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        Some(type_annotation)
    } else {
        None
    };

    let value = if parser.eat(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else if type_annotation.is_none() {
        return Err(parser.unexpected(TokenKind::Assignment));
    } else {
        None
    };

    Ok(LetStatement {
        name,
        type_annotation,
        value,
        span: parser.span_from(start),
    })
}

/// Consumes the end of a `let` declaration: a `;`, or nothing before `}`
/// and end of input.
pub fn expect_let_terminator(parser: &mut Parser) -> Result<(), Error> {
    match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            Ok(())
        }
        TokenKind::CloseCurly | TokenKind::EOF => Ok(()),
        _ => Err(parser.unexpected(TokenKind::Semicolon)),
    }
}

pub fn parse_let_declaration(parser: &mut Parser) -> Result<LetStatement, Error> {
    let mut binding = parse_let_binding(parser)?;
    expect_let_terminator(parser)?;
    binding.span = parser.span_from(binding.span.start);

    Ok(binding)
}

pub fn parse_let_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Let(parse_let_declaration(parser)?))
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let start = parser.expect(TokenKind::Return)?.start;

    let value = if parser.current_token().is_one_of_many(&[
        TokenKind::Semicolon,
        TokenKind::CloseCurly,
        TokenKind::EOF,
        TokenKind::Case,
        TokenKind::Default,
    ]) {
        None
    } else {
        Some(parse_expr(parser, BindingPower::Default)?)
    };

    parser.eat(TokenKind::Semicolon);

    Ok(Stmt::Return(ReturnStatement {
        value,
        span: parser.span_from(start),
    }))
}

/// `import "path"` or `import a.b.c`, with an optional `;`.
///
/// The path is kept verbatim for the module resolver.
pub fn parse_import(parser: &mut Parser) -> Result<ImportStatement, Error> {
    let start = parser.expect(TokenKind::Import)?.start;

    let path = match parser.current_token_kind() {
        TokenKind::String => parser.advance().value,
        TokenKind::Identifier => {
            let mut path = parser.advance().value;
            while parser.current_token_kind() == TokenKind::Dot {
                parser.advance();
                path.push('.');
                path.push_str(&parser.expect(TokenKind::Identifier)?.value);
            }
            path
        }
        _ => return Err(parser.unexpected(TokenKind::String)),
    };

    parser.eat(TokenKind::Semicolon);

    Ok(ImportStatement {
        path,
        span: parser.span_from(start),
    })
}

pub fn parse_import_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Import(parse_import(parser)?))
}
