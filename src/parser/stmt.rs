use tracing::trace;

use crate::{
    ast::{
        declarations::Decl,
        expressions::Expr,
        statements::{BlockStmt, CatchClause, DeclarationStmt, Stmt, SwitchCase},
        types::TypeNode,
    },
    errors::errors::Error,
    lexer::tokens::TokenKind,
    SourceLocation,
};

use super::{
    decl::{is_declaration_start, parse_decl, parse_var_decl},
    expr::parse_expression,
    lookups::BindingPower,
    parser::Parser,
    types::parse_type,
};

/// Tokens a failed statement inside a block resumes in front of.
const BLOCK_RESUME: [TokenKind; 9] = [
    TokenKind::Class,
    TokenKind::Function,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
    TokenKind::CloseCurly,
    TokenKind::OpenCurly,
];

pub fn parse_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    if parser.current_token_kind() == TokenKind::Identifier && parser.peek_kind(1) == TokenKind::Colon
    {
        return parse_labeled_stmt(parser);
    }

    if is_declaration_start(parser) {
        let declaration = parse_decl(parser)?;
        return Ok(declaration_stmt(declaration));
    }

    if let Some(handler) = parser.get_stmt_handler(parser.current_token_kind()) {
        return handler(parser);
    }

    parse_expression_stmt(parser)
}

fn declaration_stmt(declaration: Decl) -> Stmt {
    Stmt::Declaration(DeclarationStmt {
        location: declaration.location().clone(),
        declaration: Box::new(declaration),
    })
}

pub fn parse_expression_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after expression")?;

    Ok(Stmt::Expression {
        location: expr.location().clone(),
        expr,
    })
}

fn parse_labeled_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let label = parser.advance();
    parser.advance();
    let statement = parse_stmt(parser)?;

    Ok(Stmt::Labeled {
        label: label.value,
        statement: Box::new(statement),
        location: label.span.start,
    })
}

pub fn parse_block_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    Ok(Stmt::Block(parse_block(parser)?))
}

/// Parses `{ stmts }`. A failing statement is recorded and skipped so the
/// rest of the block still parses.
pub fn parse_block(parser: &mut Parser) -> Result<BlockStmt, Error> {
    let location = parser.expect(TokenKind::OpenCurly, "Expected '{'")?.span.start;
    let mut body = vec![];

    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        match parse_stmt(parser) {
            Ok(stmt) => body.push(stmt),
            Err(error) => {
                parser.record(error);
                if parser.current_token_kind() == TokenKind::CloseCurly {
                    break;
                }
                trace!("resynchronizing block at {}", parser.location());
                parser.synchronize(&BLOCK_RESUME);
            }
        }
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after block")?;

    Ok(BlockStmt { body, location })
}

/// Parses `( expr )` around a condition.
fn parse_condition(
    parser: &mut Parser,
    open_message: &str,
    close_message: &str,
) -> Result<Expr, Error> {
    parser.expect(TokenKind::OpenParen, open_message)?;
    let condition = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, close_message)?;
    Ok(condition)
}

pub fn parse_if_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;

    let condition = parse_condition(
        parser,
        "Expected '(' after 'if'",
        "Expected ')' after if condition",
    )?;
    let then_branch = parse_stmt(parser)?;

    let else_branch = if parser.matches(TokenKind::Else) {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    Ok(Stmt::If {
        condition,
        then_branch: Box::new(then_branch),
        else_branch,
        location,
    })
}

pub fn parse_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;

    let condition = parse_condition(
        parser,
        "Expected '(' after 'while'",
        "Expected ')' after while condition",
    )?;
    let body = parse_stmt(parser)?;

    Ok(Stmt::While {
        condition,
        body: Box::new(body),
        location,
    })
}

pub fn parse_do_while_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    let body = parse_stmt(parser)?;

    parser.expect(TokenKind::While, "Expected 'while' after do block")?;
    let condition = parse_condition(
        parser,
        "Expected '(' after 'while'",
        "Expected ')' after condition",
    )?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after do-while statement")?;

    Ok(Stmt::DoWhile {
        body: Box::new(body),
        condition,
        location,
    })
}

/// `for (init; cond; incr) s` or `for (let x of xs) s`.
pub fn parse_for_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    parser.expect(TokenKind::OpenParen, "Expected '(' after 'for'")?;

    if is_for_of(parser) {
        return parse_for_of_rest(parser, location);
    }

    let initializer = match parser.current_token_kind() {
        TokenKind::Semicolon => {
            parser.advance();
            None
        }
        TokenKind::Let | TokenKind::Const => Some(Box::new(declaration_stmt(parse_var_decl(
            parser, None,
        )?))),
        _ => {
            let expr = parse_expression(parser)?;
            parser.expect(
                TokenKind::Semicolon,
                "Expected ';' after for loop initializer",
            )?;
            Some(Box::new(Stmt::Expression {
                location: expr.location().clone(),
                expr,
            }))
        }
    };

    let condition = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::Semicolon, "Expected ';' after for loop condition")?;

    let increment = if parser.current_token_kind() != TokenKind::CloseParen {
        Some(parse_expression(parser)?)
    } else {
        None
    };
    parser.expect(TokenKind::CloseParen, "Expected ')' after for clauses")?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::For {
        initializer,
        condition,
        increment,
        body: Box::new(body),
        location,
    })
}

/// Looks ahead for `[let|const] ident [: T] of` without consuming anything.
fn is_for_of(parser: &Parser) -> bool {
    let tokens = parser.tokens();
    let mut index = tokens.position();

    if matches!(tokens.token_at(index).kind, TokenKind::Let | TokenKind::Const) {
        index += 1;
    }

    if tokens.token_at(index).kind != TokenKind::Identifier {
        return false;
    }
    index += 1;

    match tokens.token_at(index).kind {
        TokenKind::Of => true,
        TokenKind::Colon => {
            // Skip the annotation up to `of`, bailing out at anything that
            // can only belong to a C-style header.
            while index < tokens.len() {
                match tokens.token_at(index).kind {
                    TokenKind::Of => return true,
                    TokenKind::Semicolon
                    | TokenKind::Assignment
                    | TokenKind::CloseParen
                    | TokenKind::EOF => return false,
                    _ => index += 1,
                }
            }
            false
        }
        _ => false,
    }
}

fn parse_for_of_rest(parser: &mut Parser, location: SourceLocation) -> Result<Stmt, Error> {
    let is_const = match parser.current_token_kind() {
        TokenKind::Const => {
            parser.advance();
            true
        }
        TokenKind::Let => {
            parser.advance();
            false
        }
        _ => false,
    };

    let identifier = parser
        .expect(TokenKind::Identifier, "Expected variable name in for loop")?
        .value;

    let declared_type: Option<TypeNode> = if parser.matches(TokenKind::Colon) {
        Some(parse_type(parser, BindingPower::Default)?)
    } else {
        None
    };

    parser.expect(TokenKind::Of, "Expected 'of' in for-of loop")?;
    let iterable = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after for-of clause")?;

    let body = parse_stmt(parser)?;

    Ok(Stmt::ForOf {
        is_const,
        identifier,
        declared_type,
        iterable,
        body: Box::new(body),
        location,
    })
}

pub fn parse_try_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    let try_block = parse_stmt(parser)?;

    let mut catch_clauses = vec![];
    while parser.current_token_kind() == TokenKind::Catch {
        let catch_location = parser.advance().span.start;

        parser.expect(TokenKind::OpenParen, "Expected '(' after 'catch'")?;
        let parameter = parser
            .expect(TokenKind::Identifier, "Expected catch parameter name")?
            .value;

        let parameter_type = if parser.matches(TokenKind::Colon) {
            Some(parse_type(parser, BindingPower::Default)?)
        } else {
            None
        };

        parser.expect(TokenKind::CloseParen, "Expected ')' after catch parameter")?;
        let body = parse_stmt(parser)?;

        catch_clauses.push(CatchClause {
            parameter,
            parameter_type,
            body: Box::new(body),
            location: catch_location,
        });
    }

    let finally = if parser.matches(TokenKind::Finally) {
        Some(Box::new(parse_stmt(parser)?))
    } else {
        None
    };

    if catch_clauses.is_empty() && finally.is_none() {
        return Err(parser.error_here(
            "Try statement must have at least one catch or finally clause",
        ));
    }

    Ok(Stmt::Try {
        try_block: Box::new(try_block),
        catch_clauses,
        finally,
        location,
    })
}

pub fn parse_switch_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen, "Expected '(' after 'switch'")?;
    let expr = parse_expression(parser)?;
    parser.expect(TokenKind::CloseParen, "Expected ')' after switch expression")?;
    parser.expect(TokenKind::OpenCurly, "Expected '{' after switch expression")?;

    let mut cases = vec![];
    let mut has_default = false;

    while parser.current_token_kind() != TokenKind::CloseCurly && parser.has_tokens() {
        let case_location = parser.location();

        let (is_default, value) = match parser.current_token_kind() {
            TokenKind::Case => {
                parser.advance();
                let value = parse_expression(parser)?;
                parser.expect(TokenKind::Colon, "Expected ':' after case expression")?;
                (false, Some(value))
            }
            TokenKind::Default => {
                if has_default {
                    return Err(
                        parser.error_here("Multiple default clauses in switch statement")
                    );
                }
                parser.advance();
                parser.expect(TokenKind::Colon, "Expected ':' after 'default'")?;
                has_default = true;
                (true, None)
            }
            _ => {
                return Err(parser.error_here("Expected 'case' or 'default' in switch statement"))
            }
        };

        let mut body = vec![];
        while !matches!(
            parser.current_token_kind(),
            TokenKind::Case | TokenKind::Default | TokenKind::CloseCurly | TokenKind::EOF
        ) {
            body.push(parse_stmt(parser)?);
        }

        cases.push(SwitchCase {
            is_default,
            value,
            body,
            location: case_location,
        });
    }

    parser.expect(TokenKind::CloseCurly, "Expected '}' after switch cases")?;

    Ok(Stmt::Switch {
        expr,
        cases,
        location,
    })
}

/// Optional label after `break` / `continue`.
fn parse_jump_label(parser: &mut Parser) -> Option<String> {
    if parser.current_token_kind() == TokenKind::Identifier {
        Some(parser.advance().value)
    } else {
        None
    }
}

pub fn parse_break_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    let label = parse_jump_label(parser);
    parser.expect(TokenKind::Semicolon, "Expected ';' after break statement")?;

    Ok(Stmt::Break { label, location })
}

pub fn parse_continue_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    let label = parse_jump_label(parser);
    parser.expect(TokenKind::Semicolon, "Expected ';' after continue statement")?;

    Ok(Stmt::Continue { label, location })
}

pub fn parse_return_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;

    let value = if parser.current_token_kind() != TokenKind::Semicolon {
        Some(parse_expression(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::Semicolon, "Expected ';' after return statement")?;

    Ok(Stmt::Return { value, location })
}

pub fn parse_throw_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;
    let value = parse_expression(parser)?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after throw statement")?;

    Ok(Stmt::Throw { value, location })
}

/// `#asm("code", "constraint", ...);`
pub fn parse_assembly_stmt(parser: &mut Parser) -> Result<Stmt, Error> {
    let location = parser.advance().span.start;

    parser.expect(TokenKind::OpenParen, "Expected '(' after '#asm'")?;
    let code = parser
        .expect(
            TokenKind::String,
            "Expected string literal containing assembly code",
        )?
        .value;

    let mut constraints = vec![];
    while parser.matches(TokenKind::Comma) {
        constraints.push(
            parser
                .expect(TokenKind::String, "Expected constraint string")?
                .value,
        );
    }

    parser.expect(TokenKind::CloseParen, "Expected ')' after assembly code")?;
    parser.expect(TokenKind::Semicolon, "Expected ';' after assembly statement")?;

    Ok(Stmt::Assembly {
        code,
        constraints,
        location,
    })
}
