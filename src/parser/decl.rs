//! Declaration parsing: variables, functions, generics, parameters, enums,
//! namespaces and typedefs, plus the top-level declaration dispatch.
//! Classes and interfaces live in `class.rs`.

use crate::{
    ast::{
        declarations::{AccessModifier, Decl, EnumMember, Parameter, StorageClass, WhereClause},
        expressions::Attribute,
        types::{GenericParam, TypeNode},
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    class::{
        access_modifier, parse_class, parse_constructor, parse_field, parse_interface,
        parse_method, parse_property,
    },
    expr::{parse_attribute, parse_expression},
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_block,
    types::parse_type,
};

/// Constraint names that resolve to a built-in constraint rather than a type.
const BUILTIN_CONSTRAINTS: [&str; 6] = [
    "number",
    "comparable",
    "equatable",
    "default",
    "constructible",
    "copyable",
];

const NAMESPACE_RESUME: [TokenKind; 8] = [
    TokenKind::Class,
    TokenKind::Function,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::Interface,
    TokenKind::Enum,
    TokenKind::Namespace,
    TokenKind::CloseCurly,
];

/// Decides whether the current token opens a declaration.
pub fn is_declaration_start(parser: &Parser) -> bool {
    let kind = parser.current_token_kind();

    match kind {
        TokenKind::Function => parser.peek_kind(1) == TokenKind::Identifier,
        TokenKind::Let
        | TokenKind::Const
        | TokenKind::Async
        | TokenKind::Class
        | TokenKind::Interface
        | TokenKind::Enum
        | TokenKind::Namespace
        | TokenKind::Typedef
        | TokenKind::ZeroCast
        | TokenKind::Constructor
        | TokenKind::Get
        | TokenKind::Set => true,
        _ => {
            kind.is_storage_class()
                || kind.is_class_modifier()
                || kind.is_access_modifier()
                || kind.is_function_modifier()
        }
    }
}

pub fn parse_decl(parser: &mut Parser) -> Result<Decl, Error> {
    let kind = parser.current_token_kind();

    match kind {
        TokenKind::Namespace => return parse_namespace(parser),
        TokenKind::Interface | TokenKind::ZeroCast => return parse_interface(parser),
        TokenKind::Enum => return parse_enum(parser),
        TokenKind::Typedef => return parse_typedef(parser),
        _ => {}
    }

    if kind.is_access_modifier() {
        let location = parser.location();
        let access = access_modifier(parser.advance().kind);

        return match parser.current_token_kind() {
            TokenKind::Function => {
                parser.advance();
                let name = parser
                    .expect(TokenKind::Identifier, "Expected method name after 'function'")?
                    .value;
                parse_method(parser, name, access, vec![], location)
            }
            TokenKind::Get | TokenKind::Set => parse_property(parser, access),
            TokenKind::Let | TokenKind::Const => parse_field(parser, access),
            _ => Err(parser.error_here("Expected class member declaration after access modifier")),
        };
    }

    match kind {
        TokenKind::Constructor => return parse_constructor(parser, AccessModifier::Public),
        TokenKind::Get | TokenKind::Set => return parse_property(parser, AccessModifier::Public),
        _ => {}
    }

    if kind.is_storage_class() {
        let storage_class = match parser.advance().kind {
            TokenKind::Stack => StorageClass::Stack,
            TokenKind::Heap => StorageClass::Heap,
            TokenKind::Static => StorageClass::Static,
            _ => StorageClass::Weak,
        };

        if !matches!(parser.current_token_kind(), TokenKind::Let | TokenKind::Const) {
            return Err(parser.error_here("Expected variable declaration after storage class"));
        }

        return parse_var_decl(parser, Some(storage_class));
    }

    if kind.is_class_modifier() {
        let mut modifiers = vec![];
        while parser.current_token_kind().is_class_modifier() {
            modifiers.push(parse_attribute(parser)?);
        }

        if parser.current_token_kind() != TokenKind::Class {
            return Err(parser.error_here("Expected 'class' after class modifiers"));
        }

        return parse_class(parser, modifiers);
    }

    if kind.is_function_modifier() {
        let modifiers = parse_function_modifiers(parser)?;

        if !matches!(
            parser.current_token_kind(),
            TokenKind::Function | TokenKind::Async
        ) {
            return Err(parser.error_here("Expected 'function' after function modifiers"));
        }

        return parse_function(parser, modifiers);
    }

    match kind {
        TokenKind::Async | TokenKind::Function => parse_function(parser, vec![]),
        TokenKind::Class => parse_class(parser, vec![]),
        TokenKind::Let | TokenKind::Const => parse_var_decl(parser, None),
        _ => Err(parser.error_here("Expected declaration")),
    }
}

/// Collects `#inline`, `#virtual`, `#unsafe`, `#simd`, `#target(...)` and
/// custom attributes in front of a function or method.
pub fn parse_function_modifiers(parser: &mut Parser) -> Result<Vec<Attribute>, Error> {
    let mut modifiers = vec![];

    while parser.current_token_kind().is_function_modifier() {
        modifiers.push(parse_attribute(parser)?);
    }

    Ok(modifiers)
}

/// `let|const name [: T] [= init];`
pub fn parse_var_decl(
    parser: &mut Parser,
    storage_class: Option<StorageClass>,
) -> Result<Decl, Error> {
    let start_token = parser.advance();
    let is_const = start_token.kind == TokenKind::Const;

    let name = parser
        .expect(TokenKind::Identifier, "Expected variable name")?
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

    if is_const && initializer.is_none() {
        return Err(parser.error_here("Const declarations must have an initializer"));
    }

    parser.expect(
        TokenKind::Semicolon,
        "Expected ';' after variable declaration",
    )?;

    Ok(Decl::Var {
        name,
        type_annotation,
        initializer,
        storage_class,
        is_const,
        location: start_token.span.start,
    })
}

/// `[async] function name [<G>] (params) [: R] [where ..] [throws ..] { body }`
pub fn parse_function(parser: &mut Parser, modifiers: Vec<Attribute>) -> Result<Decl, Error> {
    let location = modifiers
        .first()
        .map(|modifier| modifier.location.clone())
        .unwrap_or_else(|| parser.location());

    let is_async = parser.matches(TokenKind::Async);
    parser.expect(TokenKind::Function, "Expected 'function' after 'async'")?;

    let name = parser
        .expect(TokenKind::Identifier, "Expected function name")?
        .value;

    let generic_params = if parser.current_token_kind() == TokenKind::Less {
        parse_generic_params(parser)?
    } else {
        vec![]
    };

    parser.expect(TokenKind::OpenParen, "Expected '(' after function name")?;
    let params = parse_parameter_list(parser, "Expected ')' after parameters")?;

    let return_type = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    let where_clauses = if parser.matches(TokenKind::Where) {
        parse_where_clauses(parser)?
    } else {
        vec![]
    };

    let throws = parse_throws_clause(parser)?;

    let body = if parser.matches(TokenKind::Semicolon) {
        None
    } else if parser.current_token_kind() == TokenKind::OpenCurly {
        Some(parse_block(parser)?)
    } else {
        return Err(parser.error_here("Expected '{' before function body"));
    };

    Ok(Decl::Function {
        name,
        params,
        return_type,
        throws,
        modifiers,
        body,
        is_async,
        generic_params,
        where_clauses,
        location,
    })
}

fn parse_where_clauses(parser: &mut Parser) -> Result<Vec<WhereClause>, Error> {
    let mut clauses = vec![];

    loop {
        let token = parser.expect(
            TokenKind::Identifier,
            "Expected type parameter name in constraint",
        )?;
        parser.expect(TokenKind::Colon, "Expected ':' after type parameter")?;
        let constraint = parse_type(parser, BindingPower::Default)?;

        clauses.push(WhereClause {
            param: token.value,
            constraint,
            location: token.span.start,
        });

        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    Ok(clauses)
}

/// Optional `throws T, U`.
pub fn parse_throws_clause(parser: &mut Parser) -> Result<Vec<TypeNode>, Error> {
    let mut throws = vec![];

    if parser.matches(TokenKind::Throws) {
        loop {
            throws.push(parse_type(parser, BindingPower::Default)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    Ok(throws)
}

/// `<T extends A & B, U>` starting at the `<`.
pub fn parse_generic_params(parser: &mut Parser) -> Result<Vec<GenericParam>, Error> {
    parser.advance();
    let mut params = vec![];

    loop {
        let token = parser.expect(TokenKind::Identifier, "Expected generic parameter name")?;
        let mut constraints = vec![];

        if parser.matches(TokenKind::Extends) {
            constraints.push(parse_constraint(
                parser,
                "Expected constraint type after 'extends'",
            )?);

            while parser.matches(TokenKind::Ampersand) {
                constraints.push(parse_constraint(
                    parser,
                    "Expected constraint type after '&'",
                )?);
            }
        }

        params.push(GenericParam {
            name: token.value,
            constraints,
            location: token.span.start,
        });

        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.tokens_mut().split_shift_right();
    parser.expect(TokenKind::Greater, "Expected '>' after generic parameters")?;

    Ok(params)
}

/// A single constraint. Parsed above the `&` binding power so that `&`
/// separates constraints instead of forming a reference type.
fn parse_constraint(parser: &mut Parser, message: &str) -> Result<TypeNode, Error> {
    let kind = parser.current_token_kind();
    let is_builtin = kind == TokenKind::Identifier
        && BUILTIN_CONSTRAINTS.contains(&parser.current_token().value.as_str());

    if is_builtin {
        let token = parser.advance();
        return Ok(TypeNode::BuiltinConstraint {
            name: token.value,
            location: token.span.start,
        });
    }

    if parser.get_type_nud_handler(kind).is_none() {
        return Err(parser.error_here(message));
    }

    parse_type(parser, BindingPower::Member)
}

/// Parses parameters after an opening `(`, through the closing `)`.
pub fn parse_parameter_list(
    parser: &mut Parser,
    close_message: &str,
) -> Result<Vec<Parameter>, Error> {
    let mut params = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            params.push(parse_parameter(parser)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, close_message)?;
    Ok(params)
}

/// `[ref|const] name : T [= default]`
pub fn parse_parameter(parser: &mut Parser) -> Result<Parameter, Error> {
    let location = parser.location();

    let is_ref = parser.matches(TokenKind::Ref);
    let is_const = !is_ref && parser.matches(TokenKind::Const);

    let name = parser
        .expect(TokenKind::Identifier, "Expected parameter name")?
        .value;
    parser.expect(TokenKind::Colon, "Expected ':' after parameter name")?;
    let param_type = parse_type(parser, BindingPower::Default)?;

    let default = if parser.matches(TokenKind::Assignment) {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    Ok(Parameter {
        name,
        param_type,
        default,
        is_ref,
        is_const,
        location,
    })
}

/// `enum Name [: T] { A [= e], B } [;]`
pub fn parse_enum(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.advance().span.start;

    let name = parser
        .expect(TokenKind::Identifier, "Expected enum name")?
        .value;

    let underlying_type = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly, "Expected '{' after enum declaration")?;

    let mut members = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        let token = parser.expect(TokenKind::Identifier, "Expected enum member name")?;

        let value = if parser.matches(TokenKind::Assignment) {
            Some(parse_expression(parser)?)
        } else {
            None
        };

        members.push(EnumMember {
            name: token.value,
            value,
            location: token.span.start,
        });

        if parser.matches(TokenKind::Comma) || parser.matches(TokenKind::Semicolon) {
            continue;
        }

        if parser.current_token_kind() != TokenKind::CloseCurly {
            return Err(parser.error_here("Expected ',' or ';' after enum member"));
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after enum body")?;
    parser.matches(TokenKind::Semicolon);

    Ok(Decl::Enum {
        name,
        underlying_type,
        members,
        location,
    })
}

/// `namespace Name { declarations }`
pub fn parse_namespace(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.advance().span.start;

    let name = parser
        .expect(TokenKind::Identifier, "Expected namespace name")?
        .value;
    parser.expect(TokenKind::OpenCurly, "Expected '{' after namespace name")?;

    let mut declarations = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        match parse_decl(parser) {
            Ok(declaration) => declarations.push(declaration),
            Err(error) => {
                parser.record(error);
                if parser.current_token_kind() == TokenKind::CloseCurly {
                    break;
                }
                parser.synchronize(&NAMESPACE_RESUME);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after namespace body")?;

    Ok(Decl::Namespace {
        name,
        declarations,
        location,
    })
}

/// `typedef Name = T;`
pub fn parse_typedef(parser: &mut Parser) -> Result<Decl, Error> {
    let location = parser.advance().span.start;

    let name = parser
        .expect(TokenKind::Identifier, "Expected type alias name")?
        .value;
    parser.expect(TokenKind::Assignment, "Expected '=' after type alias name")?;
    let aliased_type = parse_type(parser, BindingPower::Default)?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after typedef declaration")?;

    Ok(Decl::Typedef {
        name,
        aliased_type,
        location,
    })
}
