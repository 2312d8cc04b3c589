use crate::{
    ast::{
        ast::{Expr, Node, Stmt},
        declarations::Parameter,
        expressions::{
            ArrayLiteral, AssemblyExpression, AssignmentExpression, CallExpression,
            DoWhileExpression, ElseBranch, ForExpression, Identifier, IfStatement,
            IndexExpression, InfixExpression, LambdaExpression, MemberAccessExpression,
            NumberLiteral, PrefixExpression, RangeExpression, StringLiteral, SwitchCase,
            SwitchExpression, SyscallExpression, TernaryExpression, WhileExpression,
        },
        statements::{BlockStatement, ExpressionStatement},
        types::TypeAnnotation,
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, Span,
};

use super::{
    decl::parse_parameters,
    lookups::BindingPower,
    parser::Parser,
    stmt::{parse_block, parse_let_binding, parse_stmt},
};

const MAX_SYSCALL_ARGUMENTS: usize = 6;

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    parser.enter_nesting()?;
    let result = parse_expr_inner(parser, bp);
    parser.leave_nesting();

    result
}

fn parse_expr_inner(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud_lookup().get(&token_kind).copied() else {
        return Err(Error::new(
            ErrorImpl::NoPrefixParse { kind: token_kind },
            parser.get_position(),
        ));
    };

    let mut left = nud(parser)?;
    if ends_with_block(&left) {
        return Ok(left);
    }

    // While the current token binds tighter than `bp`, keep extending lhs
    loop {
        let token_kind = parser.current_token_kind();
        let Some(next_bp) = parser.get_bp_lookup().get(&token_kind).copied() else {
            break;
        };
        if next_bp <= bp {
            break;
        }
        // A postfix `if` must share a line with its value
        if token_kind == TokenKind::If && !parser.current_on_previous_line() {
            break;
        }
        let Some(led) = parser.get_led_lookup().get(&token_kind).copied() else {
            break;
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Number => {
            let value = match parser.current_token().value.parse::<f64>() {
                Ok(value) => value,
                Err(_) => {
                    return Err(Error::new(
                        ErrorImpl::NumberParseError {
                            token: parser.current_token().value.clone(),
                        },
                        parser.get_position(),
                    ))
                }
            };
            let token = parser.advance();

            Ok(Expr::Number(NumberLiteral {
                span: token.span(),
                literal: token.value,
                value,
            }))
        }
        TokenKind::Identifier => Ok(Expr::Identifier(identifier_from(parser.advance()))),
        TokenKind::String => {
            let token = parser.advance();

            Ok(Expr::String(StringLiteral {
                span: token.span(),
                value: token.value,
            }))
        }
        kind => Err(Error::new(
            ErrorImpl::NoPrefixParse { kind },
            parser.get_position(),
        )),
    }
}

pub fn identifier_from(token: Token) -> Identifier {
    Identifier {
        span: token.span(),
        value: token.value,
    }
}

/// Expressions closed by a `}` end their statement; nothing extends them.
fn ends_with_block(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::If(_) | Expr::While(_) | Expr::For(_) | Expr::Switch(_) | Expr::Block(_)
    )
}

pub fn parse_binary_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Infix(InfixExpression {
        span: left.span().to(&right.span()),
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, BindingPower::Prefix)?;

    Ok(Expr::Prefix(PrefixExpression {
        span: Span::new(operator_token.start, right.span().end),
        operator: operator_token,
        right: Box::new(right),
    }))
}

/// `=` is an ordinary left-associative infix; the target is not validated.
pub fn parse_assignment_expr(
    parser: &mut Parser,
    left: Expr,
    bp: BindingPower,
) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Assignment(AssignmentExpression {
        span: left.span().to(&right.span()),
        left: Box::new(left),
        operator: operator_token,
        right: Box::new(right),
    }))
}

/// `cond ? a : b` and `cond -> a : b`
pub fn parse_ternary_expr(
    parser: &mut Parser,
    condition: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    let operator = parser.advance();
    let true_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Colon)?;
    let false_expr = parse_expr(parser, BindingPower::Assignment)?;

    let ternary = TernaryExpression {
        span: condition.span().to(&false_expr.span()),
        condition: Box::new(condition),
        true_expr: Box::new(true_expr),
        false_expr: Box::new(false_expr),
    };

    match operator.kind {
        TokenKind::Arrow => Ok(Expr::ArrowTernary(ternary)),
        _ => Ok(Expr::Ternary(ternary)),
    }
}

/// `value if cond else other`
pub fn parse_postfix_if_expr(
    parser: &mut Parser,
    value: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::If)?;
    let condition = parse_expr(parser, BindingPower::Ternary)?;
    parser.expect(TokenKind::Else)?;
    let other = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::IfThenElse(TernaryExpression {
        span: value.span().to(&other.span()),
        condition: Box::new(condition),
        true_expr: Box::new(value),
        false_expr: Box::new(other),
    }))
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let arguments = parse_expression_list(parser, TokenKind::CloseParen)?;

    Ok(Expr::Call(CallExpression {
        span: parser.span_from(left.span().start),
        callee: Box::new(left),
        arguments,
    }))
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseBracket)?;

    Ok(Expr::Index(IndexExpression {
        span: parser.span_from(left.span().start),
        left: Box::new(left),
        index: Box::new(index),
    }))
}

pub fn parse_member_expr(
    parser: &mut Parser,
    left: Expr,
    _bp: BindingPower,
) -> Result<Expr, Error> {
    parser.advance();
    let member = identifier_from(parser.expect(TokenKind::Identifier)?);

    Ok(Expr::Member(MemberAccessExpression {
        span: left.span().to(&member.span),
        left: Box::new(left),
        member,
    }))
}

/// Parses `item, item, ...` up to and including `closing`. The opening
/// delimiter has already been consumed. A comma right before `closing`
/// is an error.
pub fn parse_expression_list(parser: &mut Parser, closing: TokenKind) -> Result<Vec<Expr>, Error> {
    let mut items = vec![];

    if parser.eat(closing) {
        return Ok(items);
    }

    loop {
        items.push(parse_expr(parser, BindingPower::Default)?);

        if parser.eat(TokenKind::Comma) {
            if parser.current_token_kind() == closing {
                return Err(Error::new(
                    ErrorImpl::TrailingComma { closing },
                    parser.get_position(),
                ));
            }
            continue;
        }

        parser.expect(closing)?;
        return Ok(items);
    }
}

pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let elements = parse_expression_list(parser, TokenKind::CloseBracket)?;

    Ok(Expr::Array(ArrayLiteral {
        elements,
        span: parser.span_from(start),
    }))
}

/// `( ... )` is a grouping, or the parameter list of a lambda when `->`
/// follows and every item is `name` or `name(Type)`.
pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let items = parse_expression_list(parser, TokenKind::CloseParen)?;

    if parser.current_token_kind() == TokenKind::Arrow {
        if let Some(parameters) = as_parameters(&items) {
            parser.advance();
            return parse_lambda_body(parser, parameters, start, false);
        }
    }

    if items.len() == 1 {
        if let Some(expr) = items.into_iter().next() {
            return Ok(expr);
        }
    }

    Err(parser.unexpected(TokenKind::Arrow))
}

fn as_parameters(items: &[Expr]) -> Option<Vec<Parameter>> {
    items
        .iter()
        .map(|item| match item {
            Expr::Identifier(name) => Some(Parameter {
                name: name.clone(),
                type_annotation: None,
                span: name.span,
            }),
            Expr::Call(call) => match (call.callee.as_ref(), call.arguments.as_slice()) {
                (Expr::Identifier(name), [Expr::Identifier(type_name)]) => Some(Parameter {
                    name: name.clone(),
                    type_annotation: Some(TypeAnnotation::Named {
                        name: type_name.value.clone(),
                        span: type_name.span,
                    }),
                    span: call.span,
                }),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

fn parse_lambda_body(
    parser: &mut Parser,
    parameters: Vec<Parameter>,
    start: Position,
    uses_keyword: bool,
) -> Result<Expr, Error> {
    let body = parse_expr(parser, BindingPower::Default)?;

    Ok(Expr::Lambda(LambdaExpression {
        name: parser.next_lambda_name(),
        parameters,
        body: Box::new(body),
        uses_keyword,
        span: parser.span_from(start),
    }))
}

/// `function (params) -> body`
pub fn parse_function_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let parameters = parse_parameters(parser)?;
    parser.expect(TokenKind::Arrow)?;

    parse_lambda_body(parser, parameters, start, true)
}

pub fn parse_block_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Block(parse_block(parser)?))
}

pub fn parse_let_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Let(Box::new(parse_let_binding(parser)?)))
}

/// Both `if` forms.
///
/// `if (c) { .. } else ..` builds an [`IfStatement`]; `if c then a else b`
/// and `if (c) then a else b` build the if/then/else ternary.
pub fn parse_if_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;

    if parser.current_token_kind() != TokenKind::OpenParen {
        let condition = parse_expr(parser, BindingPower::Ternary)?;
        return parse_then_else(parser, start, condition);
    }

    parser.advance();
    let condition = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    if parser.current_token_kind() == TokenKind::Then {
        return parse_then_else(parser, start, condition);
    }

    let consequence = parse_block(parser)?;

    let alternative = if parser.eat(TokenKind::Else) {
        if parser.current_token_kind() == TokenKind::If {
            let nested_start = parser.current_token().start;
            parser.enter_nesting()?;
            let nested = parse_if_expr(parser);
            parser.leave_nesting();
            match nested? {
                Expr::If(nested) => Some(ElseBranch::If(Box::new(nested))),
                other => Some(ElseBranch::Block(BlockStatement {
                    span: parser.span_from(nested_start),
                    statements: vec![Stmt::Expression(ExpressionStatement {
                        span: other.span(),
                        expression: other,
                    })],
                })),
            }
        } else {
            Some(ElseBranch::Block(parse_block(parser)?))
        }
    } else {
        None
    };

    Ok(Expr::If(IfStatement {
        condition: Box::new(condition),
        consequence,
        alternative,
        span: parser.span_from(start),
    }))
}

fn parse_then_else(parser: &mut Parser, start: Position, condition: Expr) -> Result<Expr, Error> {
    parser.expect(TokenKind::Then)?;
    let true_expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Else)?;
    let false_expr = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::IfThenElse(TernaryExpression {
        condition: Box::new(condition),
        true_expr: Box::new(true_expr),
        false_expr: Box::new(false_expr),
        span: parser.span_from(start),
    }))
}

fn parse_parenthesized(parser: &mut Parser) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen)?;
    let expr = parse_expr(parser, BindingPower::Default)?;
    parser.expect(TokenKind::CloseParen)?;

    Ok(expr)
}

pub fn parse_while_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let condition = parse_parenthesized(parser)?;
    let body = parse_block(parser)?;

    Ok(Expr::While(WhileExpression {
        condition: Box::new(condition),
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_do_while_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let body = parse_block(parser)?;
    parser.expect(TokenKind::While)?;
    let condition = parse_parenthesized(parser)?;

    Ok(Expr::DoWhile(DoWhileExpression {
        body,
        condition: Box::new(condition),
        span: parser.span_from(start),
    }))
}

/// `for (x in iterable [-> predicate]) { .. }`
pub fn parse_for_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    parser.expect(TokenKind::OpenParen)?;
    let variable = identifier_from(parser.expect(TokenKind::Identifier)?);
    parser.expect(TokenKind::In)?;

    // Parsed above the ternary tier so that `->` is left for the predicate
    let iterable = parse_expr(parser, BindingPower::Ternary)?;
    let predicate = if parser.eat(TokenKind::Arrow) {
        Some(Box::new(parse_expr(parser, BindingPower::Default)?))
    } else {
        None
    };

    parser.expect(TokenKind::CloseParen)?;
    let body = parse_block(parser)?;

    Ok(Expr::For(ForExpression {
        variable,
        iterable: Box::new(iterable),
        predicate,
        body,
        span: parser.span_from(start),
    }))
}

pub fn parse_range_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start_token = parser.advance();
    parser.expect(TokenKind::OpenParen)?;
    let arguments = parse_expression_list(parser, TokenKind::CloseParen)?;

    let received = arguments.len();
    let mut arguments = arguments.into_iter();
    let (Some(start), Some(end), step, None) = (
        arguments.next(),
        arguments.next(),
        arguments.next(),
        arguments.next(),
    ) else {
        return Err(Error::new(
            ErrorImpl::InvalidArgumentCount {
                construct: "range",
                expected: "2 or 3",
                received,
            },
            start_token.end(),
        ));
    };

    Ok(Expr::Range(RangeExpression {
        start: Box::new(start),
        end: Box::new(end),
        step: step.map(Box::new),
        span: parser.span_from(start_token.start),
    }))
}

/// Statements of a `case` or `default` arm, up to the next arm or `}`.
fn parse_case_body(parser: &mut Parser) -> Result<Vec<Stmt>, Error> {
    let mut body = vec![];

    while !parser.current_token().is_one_of_many(&[
        TokenKind::Case,
        TokenKind::Default,
        TokenKind::CloseCurly,
        TokenKind::EOF,
    ]) {
        if parser.eat(TokenKind::Semicolon) {
            continue;
        }
        body.push(parse_stmt(parser)?);
    }

    Ok(body)
}

/// `switch (subject) { case v: .. default: .. }`
pub fn parse_switch_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    let subject = parse_parenthesized(parser)?;
    parser.expect(TokenKind::OpenCurly)?;

    let mut cases = vec![];
    let mut default = None;

    loop {
        match parser.current_token_kind() {
            TokenKind::Case => {
                let case_start = parser.advance().start;
                let value = parse_expr(parser, BindingPower::Default)?;
                parser.expect(TokenKind::Colon)?;
                let body = parse_case_body(parser)?;

                cases.push(SwitchCase {
                    value,
                    body,
                    span: parser.span_from(case_start),
                });
            }
            TokenKind::Default => {
                parser.advance();
                parser.expect(TokenKind::Colon)?;
                default = Some(parse_case_body(parser)?);
            }
            TokenKind::CloseCurly => break,
            _ => return Err(parser.unexpected(TokenKind::CloseCurly)),
        }
    }

    parser.expect(TokenKind::CloseCurly)?;

    Ok(Expr::Switch(SwitchExpression {
        subject: Box::new(subject),
        cases,
        default,
        span: parser.span_from(start),
    }))
}

/// `syscall(number, args...)`
pub fn parse_syscall_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start_token = parser.advance();
    parser.expect(TokenKind::OpenParen)?;
    let mut arguments = parse_expression_list(parser, TokenKind::CloseParen)?;

    if arguments.is_empty() || arguments.len() > MAX_SYSCALL_ARGUMENTS + 1 {
        return Err(Error::new(
            ErrorImpl::InvalidArgumentCount {
                construct: "syscall",
                expected: "1 to 7",
                received: arguments.len(),
            },
            start_token.end(),
        ));
    }

    let number = arguments.remove(0);

    Ok(Expr::Syscall(SyscallExpression {
        number: Box::new(number),
        arguments,
        span: parser.span_from(start_token.start),
    }))
}

/// `asm("code", args...)`
pub fn parse_asm_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let start = parser.advance().start;
    parser.expect(TokenKind::OpenParen)?;
    let code = parser.expect(TokenKind::String)?.value;

    let arguments = if parser.eat(TokenKind::Comma) {
        if parser.current_token_kind() == TokenKind::CloseParen {
            return Err(Error::new(
                ErrorImpl::TrailingComma {
                    closing: TokenKind::CloseParen,
                },
                parser.get_position(),
            ));
        }
        parse_expression_list(parser, TokenKind::CloseParen)?
    } else {
        parser.expect(TokenKind::CloseParen)?;
        vec![]
    };

    Ok(Expr::Assembly(AssemblyExpression {
        code,
        arguments,
        span: parser.span_from(start),
    }))
}
