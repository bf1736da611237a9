//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct, the token helpers every
//! sub-parser shares, and the driver loop. The parser uses a Pratt parser
//! approach with NUD/LED handlers for expressions and types, and a
//! keyword-indexed table for statements.
//!
//! It maintains lookup tables for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix and postfix expressions
//! - Binding powers for operator precedence
//! - Type parsing handlers
//!
//! Sub-parsers never record diagnostics themselves. They return
//! `Err(Error)` and the error travels up with `?` until it reaches a
//! recovery point (the driver loop, a block, a class or interface body),
//! which records it and resynchronizes.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::{
    ast::ast::{Ast, Node},
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::{
        stream::TokenStream,
        tokens::{Token, TokenKind},
    },
    SourceLocation,
};

use super::{
    decl::{is_declaration_start, parse_decl},
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

/// Tokens that end a synchronization run when they are up next.
const TOP_LEVEL_RESUME: [TokenKind; 7] = [
    TokenKind::Class,
    TokenKind::Function,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::If,
    TokenKind::While,
    TokenKind::Return,
];

/// The main parser structure that maintains parsing state.
///
/// This struct holds the token stream and maintains lookup tables for
/// parsing statements, expressions, and types. Errors caught at a recovery
/// point are queued in `errors` in the order they were found.
pub struct Parser {
    /// The token cursor
    tokens: TokenStream,
    /// Errors recorded at recovery points
    errors: Vec<Error>,
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
}

impl Parser {
    /// Creates a new Parser instance with every lookup table registered.
    ///
    /// # Arguments
    ///
    /// * `tokens` - Vector of tokens to parse. A trailing EOF is added if missing.
    ///
    /// # Returns
    ///
    /// A new Parser instance ready to parse the token stream.
    pub fn new(tokens: Vec<Token>) -> Self {
        let mut parser = Parser {
            tokens: TokenStream::new(tokens),
            errors: vec![],
            stmt_lookup: HashMap::new(),
            nud_lookup: HashMap::new(),
            led_lookup: HashMap::new(),
            binding_power_lookup: HashMap::new(),
            type_nud_lookup: HashMap::new(),
            type_led_lookup: HashMap::new(),
            type_binding_power_lookup: HashMap::new(),
        };

        create_token_lookups(&mut parser);
        create_token_type_lookups(&mut parser);
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        self.tokens.peek()
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens.peek().kind
    }

    /// Returns the kind of the token `n` places ahead of the current one.
    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens.peek_next(n).kind
    }

    /// Returns the most recently consumed token.
    pub fn previous_token(&self) -> &Token {
        self.tokens.previous()
    }

    /// Start location of the current token.
    pub fn location(&self) -> SourceLocation {
        self.tokens.peek().span.start.clone()
    }

    pub fn tokens(&self) -> &TokenStream {
        &self.tokens
    }

    pub fn tokens_mut(&mut self) -> &mut TokenStream {
        &mut self.tokens
    }

    /// Advances to the next token and returns the consumed one.
    pub fn advance(&mut self) -> Token {
        self.tokens.advance()
    }

    /// Consumes the current token if it has the given kind.
    ///
    /// # Returns
    ///
    /// Returns true if a token was consumed.
    pub fn matches(&mut self, kind: TokenKind) -> bool {
        if self.current_token_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Builds a parse error at the current token.
    pub fn error_here(&self, message: &str) -> Error {
        let token = self.current_token();
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                message: message.to_string(),
            },
            token.span.start.clone(),
        )
    }

    /// Expects a token of the specified kind, with optional custom error.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `error` - Optional custom error to return if expectation fails
    ///
    /// # Returns
    ///
    /// Returns Ok(Token) if the current token matches, otherwise returns an Error.
    pub fn expect_error(
        &mut self,
        expected_kind: TokenKind,
        error: Option<Error>,
    ) -> Result<Token, Error> {
        if self.current_token_kind() != expected_kind {
            match error {
                Some(error) => Err(error),
                None => Err(self.error_here(&format!(
                    "Expected {}, found {}",
                    expected_kind,
                    self.current_token().kind
                ))),
            }
        } else {
            Ok(self.advance())
        }
    }

    /// Expects a token of the specified kind, failing with `message`.
    ///
    /// # Arguments
    ///
    /// * `expected_kind` - The expected TokenKind
    /// * `message` - The diagnostic text used on a mismatch
    pub fn expect(&mut self, expected_kind: TokenKind, message: &str) -> Result<Token, Error> {
        let error = self.error_here(message);
        self.expect_error(expected_kind, Some(error))
    }

    /// Checks if there are more tokens to parse.
    ///
    /// # Returns
    ///
    /// Returns true if the current token is not EOF.
    pub fn has_tokens(&self) -> bool {
        !self.tokens.is_at_end()
    }

    /// Queues an error caught at a recovery point.
    pub fn record(&mut self, error: Error) {
        debug!("parse error recorded: {}", error);
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Skips tokens until a likely statement boundary.
    ///
    /// Always advances at least once, then stops after a `;` or in front of
    /// any of `resume_before`.
    pub fn synchronize(&mut self, resume_before: &[TokenKind]) {
        self.advance();

        while self.has_tokens() {
            if self.previous_token().kind == TokenKind::Semicolon {
                return;
            }

            if resume_before.contains(&self.current_token_kind()) {
                return;
            }

            self.advance();
        }
    }

    /// Returns the statement handler registered for `kind`, if any.
    pub fn get_stmt_handler(&self, kind: TokenKind) -> Option<StmtHandler> {
        self.stmt_lookup.get(&kind).copied()
    }

    /// Returns the NUD (null denotation) handler registered for `kind`.
    pub fn get_nud_handler(&self, kind: TokenKind) -> Option<NUDHandler> {
        self.nud_lookup.get(&kind).copied()
    }

    /// Returns the LED (left denotation) handler registered for `kind`.
    pub fn get_led_handler(&self, kind: TokenKind) -> Option<LEDHandler> {
        self.led_lookup.get(&kind).copied()
    }

    /// Returns the binding power of `kind` as an infix or postfix operator.
    pub fn get_bp(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns the type binding power of `kind`.
    pub fn get_type_bp(&self, kind: TokenKind) -> BindingPower {
        self.type_binding_power_lookup
            .get(&kind)
            .copied()
            .unwrap_or(BindingPower::Default)
    }

    /// Returns the type NUD handler registered for `kind`.
    pub fn get_type_nud_handler(&self, kind: TokenKind) -> Option<TypeNUDHandler> {
        self.type_nud_lookup.get(&kind).copied()
    }

    /// Returns the type LED handler registered for `kind`.
    pub fn get_type_led_handler(&self, kind: TokenKind) -> Option<TypeLEDHandler> {
        self.type_led_lookup.get(&kind).copied()
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler) {
        self.binding_power_lookup.insert(kind, binding_power);
        self.led_lookup.insert(kind, led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Prefix registration leaves the binding power table alone, so a token
    /// such as `-` keeps the power of its infix form.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `nud_fn` - The handler function for this prefix operator
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler) {
        self.nud_lookup.insert(kind, nud_fn);
    }

    /// Registers a statement handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `stmt_fn` - The handler function for this statement type
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler) {
        self.stmt_lookup.insert(kind, stmt_fn);
    }

    /// Registers a type left denotation handler.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this type operator
    /// * `led_fn` - The handler function for this type operator
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
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `nud_fn` - The handler function for this type
    pub fn type_nud(&mut self, kind: TokenKind, nud_fn: TypeNUDHandler) {
        self.type_nud_lookup.insert(kind, nud_fn);
    }
}

/// Parses one top-level item: a declaration or a statement.
fn parse_node(parser: &mut Parser) -> Result<Node, Error> {
    if is_declaration_start(parser) {
        Ok(Node::Decl(parse_decl(parser)?))
    } else {
        Ok(Node::Stmt(parse_stmt(parser)?))
    }
}

/// Parses a stream of tokens into an Abstract Syntax Tree.
///
/// This is the main entry point for parsing. It creates a parser instance,
/// initializes all lookup tables, and parses top-level items until EOF.
/// Every malformed item becomes one diagnostic in `diagnostics`; the items
/// that parsed are returned in source order.
///
/// # Arguments
///
/// * `tokens` - Vector of tokens to parse
/// * `diagnostics` - The sink that receives parse errors
///
/// # Returns
///
/// The parsed compilation unit.
pub fn parse(tokens: Vec<Token>, diagnostics: &mut Diagnostics) -> Ast {
    let mut parser = Parser::new(tokens);
    let mut nodes = vec![];

    debug!("parsing {} tokens", parser.tokens().len());

    while parser.has_tokens() {
        match parse_node(&mut parser) {
            Ok(node) => {
                trace!("parsed top-level item at {}", node.location());
                nodes.push(node);
            }
            Err(error) => {
                parser.record(error);
                parser.synchronize(&TOP_LEVEL_RESUME);
            }
        }
    }

    for error in parser.errors.drain(..) {
        diagnostics.report(error);
    }

    debug!("parsed {} top-level items", nodes.len());
    Ast::new(nodes)
}
