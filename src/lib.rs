#![allow(clippy::module_inception)]

use std::{
    any::Any,
    fmt::Display,
    panic::{self, AssertUnwindSafe},
    rc::Rc,
};

use crate::{
    ast::ast::Ast,
    errors::{
        diagnostics::Diagnostics,
        errors::{Error, ErrorImpl},
    },
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

pub mod ast;
pub mod config;
pub mod errors;
pub mod lexer;
pub mod logger;
pub mod macros;
pub mod parser;
pub mod type_checker;

extern crate regex;

/// A point in a source file. Lines and columns start at 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: Rc<String>,
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: Rc<String>, line: u32, column: u32) -> Self {
        SourceLocation { file, line, column }
    }

    pub fn null() -> Self {
        SourceLocation::new(Rc::new(String::from("<null>")), 0, 0)
    }
}

impl Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

/// Everything the front end produces for one compilation unit.
#[derive(Debug)]
pub struct CheckOutput {
    pub ast: Ast,
    pub diagnostics: Diagnostics,
}

impl CheckOutput {
    pub fn is_success(&self) -> bool {
        !self.diagnostics.has_errors()
    }
}

/// Runs the tokenizer, parser and type checker over `source`.
///
/// Lexer failures are returned as `Err`. Parse and type errors never are:
/// they end up in `CheckOutput::diagnostics`. A panic raised while parsing
/// or checking is caught here and reported as a single diagnostic.
///
/// # Arguments
///
/// * `source` - The source text of the unit
/// * `file` - The file name used in source locations
pub fn check_source(source: &str, file: &str) -> Result<CheckOutput, Error> {
    let tokens = tokenize(source.to_string(), Some(file.to_string()))?;
    let file_location = tokens
        .first()
        .map(|token| token.span.start.clone())
        .unwrap_or_else(SourceLocation::null);

    let mut diagnostics = Diagnostics::new();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let ast = parse(tokens, &mut diagnostics);
        type_check(&ast, &mut diagnostics);
        ast
    }));

    let ast = match outcome {
        Ok(ast) => ast,
        Err(payload) => {
            report_fault(&mut diagnostics, file_location, payload.as_ref());
            Ast::default()
        }
    };

    Ok(CheckOutput { ast, diagnostics })
}

/// Turns a caught panic into a single `InternalFault` diagnostic.
fn report_fault(diagnostics: &mut Diagnostics, location: SourceLocation, payload: &(dyn Any + Send)) {
    let message = panic_message(payload);
    tracing::error!("internal fault: {}", message);
    diagnostics.report(Error::new(ErrorImpl::InternalFault { message }, location));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        String::from("unknown fault")
    }
}

#[cfg(test)]
mod tests {
    use std::panic;

    use super::{check_source, report_fault};
    use crate::{errors::diagnostics::Diagnostics, SourceLocation};

    #[test]
    fn test_check_source_success() {
        let output = check_source("let a = 42;", "test.tspp").unwrap();
        assert!(output.is_success());
        assert_eq!(output.ast.nodes.len(), 1);
    }

    #[test]
    fn test_check_source_lexer_error() {
        let result = check_source("let a = $;", "test.tspp");
        assert!(result.is_err());
    }

    #[test]
    fn test_check_source_collects_diagnostics() {
        let output = check_source("let ; let y = 2;", "test.tspp").unwrap();
        assert!(!output.is_success());
        assert_eq!(output.diagnostics.error_count(), 1);
    }

    #[test]
    fn test_fault_becomes_one_diagnostic() {
        let payload = panic::catch_unwind(|| panic!("stack exhausted")).unwrap_err();
        let mut diagnostics = Diagnostics::new();
        report_fault(&mut diagnostics, SourceLocation::null(), payload.as_ref());

        assert_eq!(diagnostics.error_count(), 1);
        let diagnostic = &diagnostics.diagnostics()[0];
        assert_eq!(diagnostic.code.as_deref(), Some("InternalFault"));
        assert_eq!(
            diagnostic.message,
            "Unexpected error during compilation: stack exhausted"
        );
    }
}
