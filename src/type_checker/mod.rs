//! Type checking and semantic analysis module.
//!
//! This module validates a parsed unit without rewriting it. It:
//!
//! - Resolves type annotations into `ResolvedType` values
//! - Hoists nominal types, member tables and function signatures
//! - Verifies declarations, statements and expressions
//! - Manages nested scopes through a frame stack
//!
//! Every failure becomes a diagnostic and yields the `Error` type, which is
//! compatible with everything so a single mistake is reported once.

pub mod expr;
pub mod members;
pub mod resolved_type;
pub mod scope;
pub mod stmt;
pub mod type_checker;
pub mod types;

#[cfg(test)]
mod tests;
