//! Type parsing implementation.
//!
//! This module handles parsing of type annotations. It supports:
//!
//! - Primitive keywords and named or namespace-qualified types
//! - Templates (`Map<K, V>`) and smart pointers (`#shared<T>`)
//! - Function types (`function(int, float): void`)
//! - Postfix pointers (`T@`, `T@#unsafe`, `T@#aligned(16)`, `T@safe`),
//!   arrays (`T[]`, `T[4]`) and references (`T&`)
//! - Unions (`A | B`)
//!
//! Similar to expression parsing, it uses NUD/LED handlers with
//! binding powers for parsing complex type expressions.

use std::collections::HashMap;

use crate::{
    ast::types::{PointerKind, PrimitiveKind, SmartPointerKind, TypeNode},
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    expr::{parse_alignment, parse_expression},
    lookups::BindingPower,
    parser::Parser,
};

/// Type alias for type null denotation handler functions.
pub type TypeNUDHandler = fn(&mut Parser) -> Result<TypeNode, Error>;

/// Type alias for type left denotation handler functions.
pub type TypeLEDHandler = fn(&mut Parser, TypeNode, BindingPower) -> Result<TypeNode, Error>;

/// Type alias for type NUD lookup table.
pub type TypeNUDLookup = HashMap<TokenKind, TypeNUDHandler>;

/// Type alias for type LED lookup table.
pub type TypeLEDLookup = HashMap<TokenKind, TypeLEDHandler>;

/// Type alias for type binding power lookup table.
pub type TypeBPLookup = HashMap<TokenKind, BindingPower>;

/// Initializes the type parsing lookup tables.
///
/// Registers NUD and LED handlers for parsing type expressions.
///
/// # Arguments
///
/// * `parser` - Mutable reference to the parser to initialize
pub fn create_token_type_lookups(parser: &mut Parser) {
    parser.type_nud(TokenKind::VoidType, parse_primitive_type);
    parser.type_nud(TokenKind::IntType, parse_primitive_type);
    parser.type_nud(TokenKind::FloatType, parse_primitive_type);
    parser.type_nud(TokenKind::BooleanType, parse_primitive_type);
    parser.type_nud(TokenKind::StringType, parse_primitive_type);
    parser.type_nud(TokenKind::Identifier, parse_symbol_type);
    parser.type_nud(TokenKind::Function, parse_function_type);
    parser.type_nud(TokenKind::Shared, parse_smart_pointer_type);
    parser.type_nud(TokenKind::Unique, parse_smart_pointer_type);
    parser.type_nud(TokenKind::Weak, parse_smart_pointer_type);

    parser.type_led(TokenKind::At, BindingPower::Member, parse_pointer_type);
    parser.type_led(TokenKind::OpenBracket, BindingPower::Member, parse_array_type);
    parser.type_led(TokenKind::Ampersand, BindingPower::Member, parse_reference_type);
    parser.type_led(TokenKind::Pipe, BindingPower::LogicalOr, parse_union_type);
}

pub fn parse_type(parser: &mut Parser, bp: BindingPower) -> Result<TypeNode, Error> {
    // First parse NUD
    let nud = match parser.get_type_nud_handler(parser.current_token_kind()) {
        Some(nud) => nud,
        None => return Err(parser.error_here("Expected type name or primitive type")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let kind = parser.current_token_kind();
        let token_bp = parser.get_type_bp(kind);

        if token_bp <= bp {
            break;
        }

        let led = match parser.get_type_led_handler(kind) {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

/// Parses a single identifier or primitive keyword and returns its spelling.
pub fn parse_type_name(parser: &mut Parser, message: &str) -> Result<String, Error> {
    let kind = parser.current_token_kind();

    if kind == TokenKind::Identifier || kind.is_primitive_type() {
        Ok(parser.advance().value)
    } else {
        Err(parser.error_here(message))
    }
}

pub fn parse_primitive_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let token = parser.advance();

    let kind = match token.kind {
        TokenKind::VoidType => PrimitiveKind::Void,
        TokenKind::IntType => PrimitiveKind::Int,
        TokenKind::FloatType => PrimitiveKind::Float,
        TokenKind::BooleanType => PrimitiveKind::Boolean,
        _ => PrimitiveKind::String,
    };

    Ok(TypeNode::Primitive {
        kind,
        location: token.span.start,
    })
}

/// `Name`, `ns.Name` or `Name<Args>`.
pub fn parse_symbol_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let token = parser.advance();
    let location = token.span.start.clone();
    let mut path = vec![token.value];

    while parser.current_token_kind() == TokenKind::Dot
        && parser.peek_kind(1) == TokenKind::Identifier
    {
        parser.advance();
        path.push(parser.advance().value);
    }

    let base = if path.len() == 1 {
        TypeNode::Named {
            name: path.remove(0),
            location: location.clone(),
        }
    } else {
        TypeNode::Qualified {
            path,
            location: location.clone(),
        }
    };

    if parser.current_token_kind() != TokenKind::Less {
        return Ok(base);
    }

    parser.advance();
    let args = parse_type_arguments(parser, "Expected '>' after template arguments")?;

    Ok(TypeNode::Template {
        base: Box::new(base),
        args,
        location,
    })
}

/// Parses `T (, T)* >` after an opening `<`, splitting a `>>` if needed.
fn parse_type_arguments(parser: &mut Parser, close_message: &str) -> Result<Vec<TypeNode>, Error> {
    let mut args = vec![];

    loop {
        args.push(parse_type(parser, BindingPower::Default)?);
        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.tokens_mut().split_shift_right();
    parser.expect(TokenKind::Greater, close_message)?;

    Ok(args)
}

pub fn parse_function_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'function' in type")?;

    let mut params = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parse_type(parser, BindingPower::Default)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "Expected ')' after function type parameters")?;
    parser.expect(TokenKind::Colon, "Expected ':' before function return type")?;
    let return_type = parse_type(parser, BindingPower::Default)?;

    Ok(TypeNode::Function {
        params,
        return_type: Box::new(return_type),
        location,
    })
}

pub fn parse_smart_pointer_type(parser: &mut Parser) -> Result<TypeNode, Error> {
    let token = parser.advance();

    let kind = match token.kind {
        TokenKind::Shared => SmartPointerKind::Shared,
        TokenKind::Unique => SmartPointerKind::Unique,
        _ => SmartPointerKind::Weak,
    };

    parser.expect(TokenKind::Less, "Expected '<' after smart pointer type")?;
    let pointee = parse_type(parser, BindingPower::Default)?;
    parser.tokens_mut().split_shift_right();
    parser.expect(TokenKind::Greater, "Expected '>' after smart pointer type")?;

    Ok(TypeNode::SmartPointer {
        pointee: Box::new(pointee),
        kind,
        location: token.span.start,
    })
}

pub fn parse_pointer_type(
    parser: &mut Parser,
    left: TypeNode,
    _bp: BindingPower,
) -> Result<TypeNode, Error> {
    parser.advance();
    let location = left.location().clone();

    let (kind, alignment) = match parser.current_token_kind() {
        TokenKind::Unsafe => {
            parser.advance();
            (PointerKind::Unsafe, None)
        }
        TokenKind::Aligned => {
            parser.advance();
            (PointerKind::Aligned, Some(parse_alignment(parser)?))
        }
        TokenKind::Identifier if parser.current_token().value == "safe" => {
            parser.advance();
            (PointerKind::Safe, None)
        }
        _ => (PointerKind::Raw, None),
    };

    Ok(TypeNode::Pointer {
        base: Box::new(left),
        kind,
        alignment,
        location,
    })
}

pub fn parse_array_type(
    parser: &mut Parser,
    left: TypeNode,
    _bp: BindingPower,
) -> Result<TypeNode, Error> {
    parser.advance();

    let size = if parser.current_token_kind() != TokenKind::CloseBracket {
        Some(Box::new(parse_expression(parser)?))
    } else {
        None
    };

    parser.expect(TokenKind::CloseBracket, "Expected ']' after array type")?;

    Ok(TypeNode::Array {
        location: left.location().clone(),
        element: Box::new(left),
        size,
    })
}

pub fn parse_reference_type(
    parser: &mut Parser,
    left: TypeNode,
    _bp: BindingPower,
) -> Result<TypeNode, Error> {
    parser.advance();

    Ok(TypeNode::Reference {
        location: left.location().clone(),
        base: Box::new(left),
    })
}

pub fn parse_union_type(
    parser: &mut Parser,
    left: TypeNode,
    bp: BindingPower,
) -> Result<TypeNode, Error> {
    parser.advance();
    let right = parse_type(parser, bp)?;

    Ok(TypeNode::Union {
        location: left.location().clone(),
        left: Box::new(left),
        right: Box::new(right),
    })
}
