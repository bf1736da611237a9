//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout the compilation
//! process. It includes:
//!
//! - Error structures with source location information
//! - Specific error variants for tokenizing, parsing and type checking
//! - The diagnostic sink that collects recoverable errors and warnings
//! - Helpful error messages and suggestions

pub mod diagnostics;
pub mod errors;

#[cfg(test)]
mod tests;
