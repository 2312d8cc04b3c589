//! Type annotation parsing.
//!
//! Annotations are a name followed by any number of `[]` suffixes
//! (`int`, `string[][]`). Like expressions they are parsed with NUD/LED
//! handlers and binding powers.

use std::collections::HashMap;

use crate::{
    ast::types::TypeAnnotation,
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{lookups::BindingPower, parser::Parser};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeAnnotation, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler =
    fn(&mut Parser, TypeAnnotation, BindingPower) -> Result<TypeAnnotation, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::Identifier, parse_named_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Call, parse_array_type);
}

pub fn parse_named_type(parser: &mut Parser) -> Result<TypeAnnotation, Error> {
    let token = parser.expect(TokenKind::Identifier)?;

    Ok(TypeAnnotation::Named {
        span: token.span(),
        name: token.value,
    })
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeAnnotation,
    _bp: BindingPower,
) -> Result<TypeAnnotation, Error> {
    parser.expect(TokenKind::OpenBracket)?;
    let close = parser.expect(TokenKind::CloseBracket)?;

    Ok(TypeAnnotation::Array {
        span: left.span_to(close.end()),
        element: Box::new(left),
    })
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeAnnotation, Error> {
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_type_nud_lookup().get(&token_kind).copied() else {
        return Err(parser.unexpected(TokenKind::Identifier));
    };

    let mut left = nud(parser)?;

    while let Some(next_bp) = parser
        .get_type_bp_lookup()
        .get(&parser.current_token_kind())
        .copied()
    {
        if next_bp <= bp {
            break;
        }

        let Some(led) = parser
            .get_type_led_lookup()
            .get(&parser.current_token_kind())
            .copied()
        else {
            break;
        };

        left = led(parser, left, next_bp)?;
    }

    Ok(left)
}
