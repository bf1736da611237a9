//! Lexical analysis module for the front end.
//!
//! This module contains the lexer (tokenizer) that converts source code
//! into a stream of tokens for parsing. It handles:
//!
//! - Tokenization of source code using regex patterns
//! - Recognition of keywords, `#` modifiers, identifiers, literals, and operators
//! - Line and column tracking for error reporting
//! - Comments and whitespace handling
//!
//! The [`stream::TokenStream`] cursor is what the parser reads from.

pub mod lexer;
pub mod stream;
pub mod tokens;
