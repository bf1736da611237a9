use crate::{
    ast::{
        expressions::{Attribute, CompileTimeKind, Expr, FunctionExpr, LiteralKind},
        types::PointerKind,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{
    decl::parse_parameter_list,
    lookups::BindingPower,
    parser::Parser,
    stmt::parse_block,
    types::{parse_type, parse_type_name},
};

pub fn parse_expr(parser: &mut Parser, bp: BindingPower) -> Result<Expr, Error> {
    // First parse NUD
    let nud = match parser.get_nud_handler(parser.current_token_kind()) {
        Some(nud) => nud,
        None => return Err(parser.error_here("Expected expression")),
    };

    let mut left = nud(parser)?;

    // While LED and current BP is less than BP of current token, continue parsing lhs
    loop {
        let kind = parser.current_token_kind();
        let token_bp = parser.get_bp(kind);

        if token_bp <= bp {
            break;
        }

        let led = match parser.get_led_handler(kind) {
            Some(led) => led,
            None => break,
        };

        left = led(parser, left, token_bp)?;
    }

    Ok(left)
}

/// Parses a full expression, assignment included.
pub fn parse_expression(parser: &mut Parser) -> Result<Expr, Error> {
    parse_expr(parser, BindingPower::Default)
}

pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let location = token.span.start.clone();

    let kind = match token.kind {
        TokenKind::This => return Ok(Expr::This { location }),
        TokenKind::Number => LiteralKind::Number,
        TokenKind::String => LiteralKind::String,
        TokenKind::True => LiteralKind::True,
        TokenKind::False => LiteralKind::False,
        TokenKind::NullValue => LiteralKind::Null,
        TokenKind::Undefined => LiteralKind::Undefined,
        _ => return Err(parser.error_here("Expected expression")),
    };

    Ok(Expr::Literal {
        kind,
        value: token.value,
        location,
    })
}

/// Identifier, generic call `f<T>(...)` or template specialization `Box<T>.x`.
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let location = token.span.start.clone();

    if parser.current_token_kind() == TokenKind::Less {
        if let Some(scan) = parser.tokens().scan_generic_args() {
            let follower = parser.tokens().token_at(scan.resume_at).kind;

            if follower == TokenKind::OpenParen {
                let type_args = parse_generic_type_args(parser)?;
                parser.expect(
                    TokenKind::OpenParen,
                    "Expected '(' after generic type arguments",
                )?;
                let args = parse_arguments(parser)?;

                return Ok(Expr::Call {
                    callee: Box::new(Expr::Identifier {
                        name: token.value,
                        location: location.clone(),
                    }),
                    args,
                    type_args,
                    location,
                });
            }

            if follower == TokenKind::Dot {
                let type_args = parse_generic_type_args(parser)?;
                return Ok(Expr::TemplateSpecialization {
                    base: token.value,
                    type_args,
                    location,
                });
            }
        }
    }

    Ok(Expr::Identifier {
        name: token.value,
        location,
    })
}

/// Consumes `< T (, T)* >` and returns the type names.
fn parse_generic_type_args(parser: &mut Parser) -> Result<Vec<String>, Error> {
    parser.advance();
    let mut type_args = vec![];

    loop {
        let kind = parser.current_token_kind();
        if kind != TokenKind::Identifier && !kind.is_primitive_type() {
            return Err(parser.error_here("Expected type name in generic type arguments"));
        }
        type_args.push(parser.advance().value);

        if !parser.matches(TokenKind::Comma) {
            break;
        }
    }

    parser.expect(
        TokenKind::Greater,
        "Expected '>' after generic type arguments",
    )?;

    Ok(type_args)
}

/// Parses call arguments after the opening `(`, through the closing `)`.
fn parse_arguments(parser: &mut Parser) -> Result<Vec<Expr>, Error> {
    let mut args = vec![];

    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseParen, "Expected ')' after function arguments")?;
    Ok(args)
}

pub fn parse_binary_expr(parser: &mut Parser, left: Expr, bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let right = parse_expr(parser, bp)?;

    Ok(Expr::Binary {
        op: operator_token.kind,
        location: left.location().clone(),
        left: Box::new(left),
        right: Box::new(right),
    })
}

pub fn parse_prefix_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    let location = operator_token.span.start.clone();

    if operator_token.kind == TokenKind::At {
        match parser.current_token_kind() {
            TokenKind::Unsafe => {
                parser.advance();
                let operand = parse_expr(parser, BindingPower::Unary)?;
                return Ok(Expr::Pointer {
                    operand: Box::new(operand),
                    kind: PointerKind::Unsafe,
                    alignment: None,
                    location,
                });
            }
            TokenKind::Aligned => {
                parser.advance();
                let alignment = parse_alignment(parser)?;
                let operand = parse_expr(parser, BindingPower::Unary)?;
                return Ok(Expr::Pointer {
                    operand: Box::new(operand),
                    kind: PointerKind::Aligned,
                    alignment: Some(alignment),
                    location,
                });
            }
            _ => {}
        }
    }

    let rhs = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Unary {
        op: operator_token.kind,
        operand: Box::new(rhs),
        is_prefix: true,
        location,
    })
}

/// Parses `( N )` after `#aligned`.
pub fn parse_alignment(parser: &mut Parser) -> Result<u32, Error> {
    parser.expect(TokenKind::OpenParen, "Expected '(' after aligned")?;

    if parser.current_token_kind() != TokenKind::Number {
        return Err(parser.error_here("Expected alignment value"));
    }
    let alignment = match parser.current_token().value.parse::<u32>() {
        Ok(alignment) => alignment,
        Err(_) => return Err(parser.error_here("Expected alignment value")),
    };
    parser.advance();

    parser.expect(TokenKind::CloseParen, "Expected ')' after alignment value")?;
    Ok(alignment)
}

pub fn parse_postfix_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();

    Ok(Expr::Unary {
        op: operator_token.kind,
        location: left.location().clone(),
        operand: Box::new(left),
        is_prefix: false,
    })
}

pub fn parse_assignment_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator_token = parser.advance();
    // Comma sits just below assignment, so `a = b = c` nests to the right.
    let rhs = parse_expr(parser, BindingPower::Comma)?;

    Ok(Expr::Assignment {
        op: operator_token.kind,
        location: left.location().clone(),
        target: Box::new(left),
        value: Box::new(rhs),
    })
}

pub fn parse_conditional_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let then_branch = parse_expr(parser, BindingPower::Comma)?;

    parser.expect(TokenKind::Colon, "Expected ':' in conditional expression")?;
    let else_branch = parse_expr(parser, BindingPower::Assignment)?;

    Ok(Expr::Conditional {
        location: left.location().clone(),
        condition: Box::new(left),
        then_branch: Box::new(then_branch),
        else_branch: Box::new(else_branch),
    })
}

pub fn parse_grouping_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after expression")?;

    Ok(expr)
}

pub fn parse_array_literal_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.advance().span.start;
    let mut elements = vec![];

    if parser.current_token_kind() != TokenKind::CloseBracket {
        loop {
            elements.push(parse_expression(parser)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(TokenKind::CloseBracket, "Expected ']' after array elements")?;

    Ok(Expr::ArrayLiteral { elements, location })
}

pub fn parse_call_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let args = parse_arguments(parser)?;

    Ok(Expr::Call {
        location: left.location().clone(),
        callee: Box::new(left),
        args,
        type_args: vec![],
    })
}

pub fn parse_index_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    parser.advance();
    let index = parse_expression(parser)?;
    parser.expect(TokenKind::CloseBracket, "Expected ']' after array index")?;

    Ok(Expr::Index {
        location: left.location().clone(),
        array: Box::new(left),
        index: Box::new(index),
    })
}

pub fn parse_member_expr(parser: &mut Parser, left: Expr, _bp: BindingPower) -> Result<Expr, Error> {
    let operator = parser.advance();
    let is_pointer_access = operator.kind == TokenKind::At;

    let message = if is_pointer_access {
        "Expected property name after '@'"
    } else {
        "Expected property name after '.'"
    };
    let name = parser.expect(TokenKind::Identifier, message)?.value;

    Ok(Expr::Member {
        location: left.location().clone(),
        object: Box::new(left),
        name,
        is_pointer_access,
    })
}

pub fn parse_new_expr(parser: &mut Parser) -> Result<Expr, Error> {
    // new Point(1, 2)
    let location = parser.advance().span.start;

    let class_name = parser
        .expect(TokenKind::Identifier, "Expected class name after 'new'")?
        .value;

    parser.expect(TokenKind::OpenParen, "Expected '(' after class name")?;

    let mut args = vec![];
    if parser.current_token_kind() != TokenKind::CloseParen {
        loop {
            args.push(parse_expression(parser)?);
            if !parser.matches(TokenKind::Comma) {
                break;
            }
        }
    }

    parser.expect(
        TokenKind::CloseParen,
        "Expected ')' after constructor arguments",
    )?;

    Ok(Expr::New {
        class_name,
        args,
        location,
    })
}

pub fn parse_cast_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::Less, "Expected '<' after 'cast'")?;
    let target_type = parse_type_name(parser, "Expected type name in cast")?;
    parser.expect(TokenKind::Greater, "Expected '>' after cast type")?;

    let expr = parse_expr(parser, BindingPower::Unary)?;

    Ok(Expr::Cast {
        target_type,
        expr: Box::new(expr),
        location,
    })
}

pub fn parse_compile_time_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let token = parser.advance();
    let location = token.span.start.clone();

    let kind = match token.kind {
        TokenKind::SizeOf => CompileTimeKind::SizeOf,
        TokenKind::AlignOf => CompileTimeKind::AlignOf,
        TokenKind::TypeOf => CompileTimeKind::TypeOf,
        _ => CompileTimeKind::Const,
    };

    parser.expect(
        TokenKind::OpenParen,
        &format!("Expected '(' after '{}'", kind.keyword()),
    )?;
    // A primitive type keyword stands for the type itself.
    let names_primitive = kind != CompileTimeKind::Const
        && parser.current_token_kind().is_primitive_type()
        && parser.peek_kind(1) == TokenKind::CloseParen;
    let operand = if names_primitive {
        let type_token = parser.advance();
        Expr::Identifier {
            name: type_token.value,
            location: type_token.span.start,
        }
    } else {
        parse_expression(parser)?
    };
    parser.expect(
        TokenKind::CloseParen,
        &format!("Expected ')' after '{}' operand", kind.keyword()),
    )?;

    Ok(Expr::CompileTime {
        kind,
        operand: Box::new(operand),
        location,
    })
}

pub fn parse_function_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'function'")?;
    let params = parse_parameter_list(parser, "Expected ')' after parameters")?;

    let return_type = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    if parser.current_token_kind() != TokenKind::OpenCurly {
        return Err(parser.error_here("Expected '{' before function body"));
    }
    let body = parse_block(parser)?;

    Ok(Expr::Function(FunctionExpr {
        params,
        return_type,
        body,
        location,
    }))
}

pub fn parse_attribute_expr(parser: &mut Parser) -> Result<Expr, Error> {
    Ok(Expr::Attribute(parse_attribute(parser)?))
}

/// Parses `#name` or `#name(arg)` from the current modifier token.
pub fn parse_attribute(parser: &mut Parser) -> Result<Attribute, Error> {
    let token = parser.advance();
    let name = token.value.trim_start_matches('#').to_string();

    let argument = if parser.matches(TokenKind::OpenParen) {
        let argument = parse_expression(parser)?;
        parser.expect(TokenKind::CloseParen, "Expected ')' after attribute argument")?;
        Some(Box::new(argument))
    } else {
        None
    };

    Ok(Attribute {
        name,
        argument,
        location: token.span.start,
    })
}
