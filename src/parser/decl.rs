//! Top-level declarations: functions, classes, data structures and imports.

use tracing::debug;

use crate::{
    ast::{
        ast::{Node, Program},
        declarations::{
            ClassDeclaration, ClassMember, ClassStyle, DataField, DataStructure, DataStyle,
            FunctionDefinition, Parameter,
        },
        expressions::Identifier,
        statements::LetStatement,
        types::TypeAnnotation,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::{
    expr::{identifier_from, parse_expr},
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_import, parse_let_declaration},
    types::parse_type,
};

const MAIN_FUNCTION: &str = "main";

/// Top-level loop. Tokens that cannot start a declaration are skipped.
pub fn parse_program(parser: &mut Parser) -> Program {
    let mut program = Program::default();
    let mut functions = vec![];

    while parser.has_tokens() {
        let consumed = parser.consumed();

        let result = match (parser.current_token_kind(), parser.peek_kind(1)) {
            (TokenKind::Import, _) => {
                parse_import(parser).map(|import| program.import_statements.push(import))
            }
            (TokenKind::Function, _) | (TokenKind::Identifier, TokenKind::OpenParen) => {
                parse_function_definition(parser).map(|function| functions.push(function))
            }
            (TokenKind::Type, _) | (TokenKind::Identifier, TokenKind::Arrow) => {
                parse_class_declaration(parser).map(|class| program.class_declarations.push(class))
            }
            (TokenKind::Data, _) | (TokenKind::Identifier, _) => {
                parse_data_structure(parser).map(|data| program.data_structures.push(data))
            }
            (kind, _) => {
                let token = parser.advance();
                debug!(%kind, line = token.line, column = token.column, "skipping top-level token");
                Ok(())
            }
        };

        if let Err(error) = result {
            parser.record_error(error);
            parser.recover_from(consumed);
        }
    }

    for function in functions {
        if function.name.value != MAIN_FUNCTION {
            program.functions.push(function);
        } else if program.main_function.is_none() {
            program.main_function = Some(function);
        } else {
            parser.record_error(Error::new(
                ErrorImpl::DuplicateFunction {
                    function: function.name.value.clone(),
                },
                function.name.span.end,
            ));
        }
    }

    debug!(
        functions = program.functions.len(),
        has_main = program.main_function.is_some(),
        classes = program.class_declarations.len(),
        data_structures = program.data_structures.len(),
        imports = program.import_statements.len(),
        diagnostics = parser.diagnostics().len(),
        "parsed program"
    );

    program
}

/// `name` or `name (Type)`
pub fn parse_parameter(parser: &mut Parser) -> Result<Parameter, Error> {
    if parser.current_token_kind() != TokenKind::Identifier {
        return Err(Error::new(
            ErrorImpl::InvalidParameter {
                found: parser.current_token().value.clone(),
            },
            parser.get_position(),
        ));
    }

    let name = identifier_from(parser.advance());
    let type_annotation = if parser.eat(TokenKind::OpenParen) {
        let type_annotation = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        Some(type_annotation)
    } else {
        None
    };

    Ok(Parameter {
        span: parser.span_from(name.span.start),
        name,
        type_annotation,
    })
}

/// `( [param {, param}] )`. A trailing comma is an error.
pub fn parse_parameters(parser: &mut Parser) -> Result<Vec<Parameter>, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let mut parameters = vec![];

    if parser.eat(TokenKind::CloseParen) {
        return Ok(parameters);
    }

    loop {
        parameters.push(parse_parameter(parser)?);

        match parser.current_token_kind() {
            TokenKind::Comma => {
                parser.advance();
                if parser.current_token_kind() == TokenKind::CloseParen {
                    return Err(Error::new(
                        ErrorImpl::TrailingComma {
                            closing: TokenKind::CloseParen,
                        },
                        parser.get_position(),
                    ));
                }
            }
            TokenKind::CloseParen => {
                parser.advance();
                return Ok(parameters);
            }
            _ => return Err(parser.unexpected(TokenKind::CloseParen)),
        }
    }
}

/// `[function] name(params) [->] [Type] { body }`
pub fn parse_function_definition(parser: &mut Parser) -> Result<FunctionDefinition, Error> {
    let start = parser.current_token().start;
    parser.eat(TokenKind::Function);

    let name = identifier_from(parser.expect(TokenKind::Identifier)?);
    parse_function_rest(parser, name, start)
}

fn parse_function_rest(
    parser: &mut Parser,
    name: Identifier,
    start: Position,
) -> Result<FunctionDefinition, Error> {
    let parameters = parse_parameters(parser)?;
    function_from_parameters(parser, name, parameters, start)
}

fn function_from_parameters(
    parser: &mut Parser,
    name: Identifier,
    parameters: Vec<Parameter>,
    start: Position,
) -> Result<FunctionDefinition, Error> {
    parser.eat(TokenKind::Arrow);

    let return_type = if parser.current_token_kind() == TokenKind::Identifier {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let body = parse_block(parser)?;

    Ok(FunctionDefinition {
        name,
        parameters,
        return_type,
        body,
        span: parser.span_from(start),
    })
}

/// `Name -> { members }` or `type Name { members }`
pub fn parse_class_declaration(parser: &mut Parser) -> Result<ClassDeclaration, Error> {
    let start = parser.current_token().start;

    let style = if parser.eat(TokenKind::Type) {
        ClassStyle::Brace
    } else {
        ClassStyle::Arrow
    };

    let name = identifier_from(parser.expect(TokenKind::Identifier)?);
    if style == ClassStyle::Arrow {
        parser.expect(TokenKind::Arrow)?;
    }

    let members = parse_class_body(parser)?;

    Ok(ClassDeclaration {
        name,
        style,
        members,
        span: parser.span_from(start),
    })
}

fn parse_class_body(parser: &mut Parser) -> Result<Vec<ClassMember>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut members = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::CloseCurly => break,
            TokenKind::EOF => {
                let error = parser.unexpected(TokenKind::CloseCurly);
                parser.record_error(error);
                return Ok(members);
            }
            TokenKind::Semicolon => {
                parser.advance();
                continue;
            }
            _ => {}
        }

        let consumed = parser.consumed();
        match parse_class_member(parser) {
            Ok(member) => members.push(member),
            Err(error) => {
                parser.record_error(error);
                parser.recover_from(consumed);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(members)
}

/// A field (`let x = 1;`, `x (int) = 1;`, `x;`) or a method (`area() -> { .. }`).
///
/// `name(...)` is a method when a body follows the parenthesised list,
/// otherwise the single name inside the parentheses is the field's type.
fn parse_class_member(parser: &mut Parser) -> Result<ClassMember, Error> {
    match parser.current_token_kind() {
        TokenKind::Let => return Ok(ClassMember::Field(parse_let_declaration(parser)?)),
        TokenKind::Identifier => {}
        _ => return Err(parser.unexpected(TokenKind::Identifier)),
    }

    let start = parser.current_token().start;

    // `x (int[])` can only be a field
    let array_typed_field = parser.peek_kind(1) == TokenKind::OpenParen
        && parser.peek_kind(2) == TokenKind::Identifier
        && parser.peek_kind(3) == TokenKind::OpenBracket;

    let name = identifier_from(parser.advance());

    let type_annotation = if parser.current_token_kind() != TokenKind::OpenParen {
        None
    } else if array_typed_field {
        parser.advance();
        let type_annotation = parse_type(parser, BindingPower::Default)?;
        parser.expect(TokenKind::CloseParen)?;
        Some(type_annotation)
    } else {
        let parameters = parse_parameters(parser)?;

        if parser.current_token().is_one_of_many(&[TokenKind::Arrow, TokenKind::OpenCurly]) {
            let method = function_from_parameters(parser, name, parameters, start)?;
            return Ok(ClassMember::Method(method));
        }

        match parameters.as_slice() {
            [Parameter {
                name: type_name,
                type_annotation: None,
                ..
            }] => Some(TypeAnnotation::Named {
                name: type_name.value.clone(),
                span: type_name.span,
            }),
            _ => return Err(parser.unexpected(TokenKind::OpenCurly)),
        }
    };

    let value = if parser.eat(TokenKind::Assignment) {
        Some(parse_expr(parser, BindingPower::Default)?)
    } else {
        None
    };
    parser.eat(TokenKind::Semicolon);

    Ok(ClassMember::Field(LetStatement {
        name,
        type_annotation,
        value,
        span: parser.span_from(start),
    }))
}

/// `[data] Name = (fields)` or `[data] Name = { field: Type, ... }`
pub fn parse_data_structure(parser: &mut Parser) -> Result<DataStructure, Error> {
    let start = parser.current_token().start;
    parser.eat(TokenKind::Data);

    let name = identifier_from(parser.expect(TokenKind::Identifier)?);
    parser.expect(TokenKind::Assignment)?;

    let (style, fields) = match parser.current_token_kind() {
        TokenKind::OpenParen => {
            let fields = parse_parameters(parser)?
                .into_iter()
                .map(|parameter| DataField {
                    name: parameter.name,
                    type_annotation: parameter.type_annotation,
                    span: parameter.span,
                })
                .collect();
            (DataStyle::Tuple, fields)
        }
        TokenKind::OpenCurly => (DataStyle::Record, parse_record_fields(parser)?),
        _ => return Err(parser.unexpected(TokenKind::OpenCurly)),
    };

    parser.eat(TokenKind::Semicolon);

    Ok(DataStructure {
        name,
        style,
        fields,
        span: parser.span_from(start),
    })
}

fn parse_record_fields(parser: &mut Parser) -> Result<Vec<DataField>, Error> {
    parser.expect(TokenKind::OpenCurly)?;
    let mut fields = vec![];

    while !parser
        .current_token()
        .is_one_of_many(&[TokenKind::CloseCurly, TokenKind::EOF])
    {
        let name = identifier_from(parser.expect(TokenKind::Identifier)?);
        parser.expect(TokenKind::Colon)?;
        let type_annotation = parse_type(parser, BindingPower::Default)?;

        fields.push(DataField {
            span: name.span.to(&type_annotation.span()),
            name,
            type_annotation: Some(type_annotation),
        });

        if !parser.eat(TokenKind::Comma)
            && !parser.eat(TokenKind::Semicolon)
            && parser.current_token_kind() != TokenKind::CloseCurly
        {
            return Err(parser.unexpected(TokenKind::CloseCurly));
        }
    }

    parser.expect(TokenKind::CloseCurly)?;
    Ok(fields)
}
