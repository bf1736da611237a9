//! Class and interface parsing.
//!
//! Member lists are recovery points: a malformed member is recorded and the
//! parser skips ahead to the next plausible member, so one bad field does
//! not hide the rest of the class.

use tracing::trace;

use crate::{
    ast::{
        declarations::{AccessModifier, Decl, Parameter, PropertyKind},
        expressions::Attribute,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    SourceLocation,
};

use super::{
    decl::{
        parse_function_modifiers, parse_generic_params, parse_parameter, parse_parameter_list,
        parse_throws_clause,
    },
    expr::{parse_attribute, parse_expression},
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_block,
    types::parse_type,
};

const MEMBER_RESUME: [TokenKind; 11] = [
    TokenKind::Class,
    TokenKind::Function,
    TokenKind::Constructor,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::Public,
    TokenKind::Private,
    TokenKind::Protected,
    TokenKind::Get,
    TokenKind::Set,
    TokenKind::CloseCurly,
];

pub fn access_modifier(kind: TokenKind) -> AccessModifier {
    match kind {
        TokenKind::Private => AccessModifier::Private,
        TokenKind::Protected => AccessModifier::Protected,
        _ => AccessModifier::Public,
    }
}

/// Records a member error and skips to the next member. Stops in front of
/// the closing `}` so the enclosing body can still consume it.
fn recover_member(parser: &mut Parser, error: Error) {
    parser.record(error);

    if parser.current_token_kind() != TokenKind::CloseCurly {
        trace!("resynchronizing member list at {}", parser.location());
        parser.synchronize(&MEMBER_RESUME);
    }
}

/// `class Name [<G>] [extends T] [implements T, ...] { members }`
pub fn parse_class(parser: &mut Parser, modifiers: Vec<Attribute>) -> Result<Decl, Error> {
    let location = modifiers
        .first()
        .map(|modifier| modifier.location.clone())
        .unwrap_or_else(|| parser.location());

    parser.expect(TokenKind::Class, "Expected 'class'")?;
    let name = parser
        .expect(TokenKind::Identifier, "Expected class name after 'class'")?
        .value;

    let generic_params = if parser.current_token_kind() == TokenKind::Less {
        parse_generic_params(parser)?
    } else {
        vec![]
    };

    let base_class = if parser.matches(TokenKind::Extends) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let mut interfaces = vec![];
    if parser.matches(TokenKind::Implements) {
        loop {
            interfaces.push(parse_type(parser, BindingPower::Default)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::OpenCurly, "Expected '{' before class body")?;

    let mut members = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        match parse_class_member(parser) {
            Ok(member) => members.push(member),
            Err(error) => recover_member(parser, error),
        }
    }

    parser.expect(
        TokenKind::CloseCurly,
        "Expected '}' at end of class declaration",
    )?;

    Ok(Decl::Class {
        name,
        modifiers,
        base_class,
        interfaces,
        members,
        generic_params,
        location,
    })
}

fn parse_class_member(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.location();
    let modifiers = parse_function_modifiers(parser)?;

    let access = if parser.current_token_kind().is_access_modifier() {
        access_modifier(parser.advance().kind)
    } else {
        AccessModifier::Public
    };

    match parser.current_token_kind() {
        TokenKind::Constructor => parse_constructor(parser, access),
        TokenKind::Function => {
            parser.advance();
            let name = parser
                .expect(TokenKind::Identifier, "Expected method name after 'function'")?
                .value;
            parse_method(parser, name, access, modifiers, location)
        }
        TokenKind::Let | TokenKind::Const => parse_field(parser, access),
        TokenKind::Get | TokenKind::Set => parse_property(parser, access),
        TokenKind::Class => parse_class(parser, vec![]),
        kind if kind.is_class_modifier() => {
            let mut class_modifiers = vec![];
            while parser.current_token_kind().is_class_modifier() {
                class_modifiers.push(parse_attribute(parser)?);
            }
            if parser.current_token_kind() != TokenKind::Class {
                return Err(parser.error_here("Expected 'class' after class modifiers"));
            }
            parse_class(parser, class_modifiers)
        }
        TokenKind::Identifier if parser.peek_kind(1) == TokenKind::OpenParen => {
            let name = parser.advance().value;
            parse_method(parser, name, access, modifiers, location)
        }
        _ => {
            let found = parser.current_token().value.clone();
            Err(parser.error_here(&format!(
                "Expected class member declaration, found: {}",
                found
            )))
        }
    }
}

/// `constructor(params) { body }`
pub fn parse_constructor(parser: &mut Parser, access: AccessModifier) -> Result<Decl, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'constructor'")?;
    let params = parse_parameter_list(parser, "Expected ')' after constructor parameters")?;

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.error_here("Expected '{' before constructor body"));
    }
    let body = parse_block(parser)?;

    Ok(Decl::Constructor {
        access,
        params,
        body,
        location,
    })
}

/// The part of a method after its name: `(params) [: R] [throws ..] { body }`.
pub fn parse_method(
    parser: &mut Parser,
    name: String,
    access: AccessModifier,
    modifiers: Vec<Attribute>,
    location: SourceLocation,
) -> Result<Decl, Error> {
    parser.expect(TokenKind::OpenParen, "Expected '(' after method name")?;
    let params = parse_parameter_list(parser, "Expected ')' after parameters")?;

    let return_type = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let throws = parse_throws_clause(parser)?;

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.error_here("Expected '{' before method body"));
    }
    let body = parse_block(parser)?;

    Ok(Decl::Method {
        name,
        access,
        params,
        return_type,
        throws,
        modifiers,
        body,
        location,
    })
}

/// `let|const name [: T] [= init];` inside a class.
pub fn parse_field(parser: &mut Parser, access: AccessModifier) -> Result<Decl, Error> {
    let start = parser.advance();
    let is_const = start.kind == TokenKind::Const;

    let name = parser
        .expect(TokenKind::Identifier, "Expected field name")?
        .value;

    let type_annotation = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let initializer = if parser.matches(TokenKind::Assignment) {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "Expected ';' after field declaration")?;

    Ok(Decl::Field {
        name,
        access,
        is_const,
        type_annotation,
        initializer,
        location: start.span.start,
    })
}

/// `get name[()]: T { body }` or `set name(value: T) { body }`.
pub fn parse_property(parser: &mut Parser, access: AccessModifier) -> Result<Decl, Error> {
    let start = parser.advance();

    if start.kind == TokenKind::Get {
        let name = parser
            .expect(TokenKind::Identifier, "Expected property name after 'get'")?
            .value;

        if parser.matches(TokenKind::OpenParen) {
            parser.expect(
                TokenKind::CloseParen,
                "Expected empty parameter list for getter",
            )?;
        }

        parser.expect(TokenKind::Colon, "Expected ':' after property name")?;
        let property_type = parse_type(parser, BindingPower::Default)?;

        if parser.current_token_kind() != TokenKind::OpenCurly {
            return Err(parser.error_here("Expected '{' after property getter declaration"));
        }
        let body = parse_block(parser)?;

        return Ok(Decl::Property {
            name,
            access,
            kind: PropertyKind::Getter,
            property_type,
            parameter: None,
            body,
            location: start.span.start,
        });
    }

    let name = parser
        .expect(TokenKind::Identifier, "Expected property name after 'set'")?
        .value;
    parser.expect(TokenKind::OpenParen, "Expected '(' after property setter name")?;

    let param_token = parser.expect(TokenKind::Identifier, "Expected parameter name in setter")?;
    parser.expect(TokenKind::Colon, "Expected ':' after parameter name")?;
    let param_type = parse_type(parser, BindingPower::Default)?;

    parser.expect(TokenKind::CloseParen, "Expected ')' after setter parameter")?;

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.error_here("Expected '{' after setter parameter list"));
    }
    let body = parse_block(parser)?;

    Ok(Decl::Property {
        name,
        access,
        kind: PropertyKind::Setter,
        property_type: param_type.clone(),
        parameter: Some(Parameter {
            name: param_token.value,
            param_type,
            default: None,
            is_ref: false,
            is_const: false,
            location: param_token.span.start,
        }),
        body,
        location: start.span.start,
    })
}

/// `[#zerocast] interface Name [<G>] [extends T, ...] { members }`
pub fn parse_interface(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.location();

    let is_zero_cast = parser.matches(TokenKind::ZeroCast);
    parser.expect(TokenKind::Interface, "Expected 'interface' keyword")?;

    let name = parser
        .expect(TokenKind::Identifier, "Expected interface name")?
        .value;

    let generic_params = if parser.current_token_kind() == TokenKind::Less {
        parse_generic_params(parser)?
    } else {
        vec![]
    };

    let mut extends = vec![];
    if parser.matches(TokenKind::Extends) {
        loop {
            extends.push(parse_type(parser, BindingPower::Default)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(
        TokenKind::OpenCurly,
        "Expected '{' after interface declaration",
    )?;

    let mut members = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        match parse_interface_member(parser) {
            Ok(member) => members.push(member),
            Err(error) => recover_member(parser, error),
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after interface body")?;

    Ok(Decl::Interface {
        name,
        extends,
        members,
        is_zero_cast,
        generic_params,
        location,
    })
}

fn parse_interface_member(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.location();

    let access = if parser.current_token_kind().is_access_modifier() {
        access_modifier(parser.advance().kind)
    } else {
        AccessModifier::Public
    };

    match parser.current_token_kind() {
        TokenKind::Get | TokenKind::Set => parse_property_signature(parser, access, location),
        TokenKind::Identifier => {
            let name = parser.advance().value;

            parser.expect(TokenKind::OpenParen, "Expected '(' after method name")?;
            let params = parse_parameter_list(parser, "Expected ')' after parameters")?;
            parser.expect(TokenKind::Colon, "Expected ':' after method parameters")?;
            let return_type = parse_type(parser, BindingPower::Default)?;
            let throws = parse_throws_clause(parser)?;
            parser.expect(TokenKind::Semicolon, "Expected ';' after method signature")?;

            Ok(Decl::MethodSignature {
                name,
                access,
                params,
                return_type: Some(return_type),
                throws,
                location,
            })
        }
        _ => Err(parser.error_here("Expected interface member (method or property)")),
    }
}

fn parse_property_signature(
    parser: &mut Parser,
    access: AccessModifier,
    location: SourceLocation,
) -> Result<Decl, Error> {
    let has_setter = parser.advance().kind == TokenKind::Set;

    let name = parser
        .expect(TokenKind::Identifier, "Expected property name")?
        .value;

    if has_setter {
        parser.expect(
            TokenKind::OpenParen,
            "Expected '(' after setter property name",
        )?;
        parse_parameter(parser)?;
        parser.expect(TokenKind::CloseParen, "Expected ')' after setter parameter")?;
    }

    parser.expect(TokenKind::Colon, "Expected ':' after property name")?;
    let property_type = parse_type(parser, BindingPower::Default)?;
    parser.expect(
        TokenKind::Semicolon,
        "Expected ';' after property signature",
    )?;

    Ok(Decl::PropertySignature {
        name,
        access,
        property_type,
        has_getter: !has_setter,
        has_setter,
        location,
    })
}
