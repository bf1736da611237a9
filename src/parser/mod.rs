//! Parser module for building an Abstract Syntax Tree (AST).
//!
//! This module contains the parser that transforms a stream of tokens
//! into an Abstract Syntax Tree. It uses a Pratt parser for expressions
//! and type annotations with proper operator precedence and handles:
//!
//! - Statement parsing (control flow, blocks, labels, inline assembly)
//! - Declaration parsing (variables, functions, classes, interfaces,
//!   enums, namespaces, typedefs)
//! - Expression parsing (binary ops, calls, generic calls, literals)
//! - Type parsing for type annotations
//! - Error recovery and reporting
//!
//! The parser uses NUD (null denotation) and LED (left denotation) functions
//! for expression parsing with binding power for precedence handling.
//! Parse errors are collected rather than fatal: each malformed construct
//! yields one diagnostic and parsing resumes at the next statement boundary.

pub mod class;
pub mod decl;
pub mod expr;
pub mod lookups;
pub mod parser;
pub mod stmt;
pub mod types;

#[cfg(test)]
mod tests;
