//! Unit tests for error handling.
//!
//! This module contains tests for error types and the diagnostic sink.

use crate::errors::diagnostics::{Diagnostics, Severity};
use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::SourceLocation;
use std::rc::Rc;

fn location(line: u32, column: u32) -> SourceLocation {
    SourceLocation::new(Rc::new("test.tspp".to_string()), line, column)
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "$".to_string(),
        },
        location(1, 10),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: ";".to_string(),
            message: "Expected expression".to_string(),
        },
        location(3, 42),
    );

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 42);
}

#[test]
fn test_unexpected_token_message() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: ";".to_string(),
            message: "Expected expression".to_string(),
        },
        location(1, 1),
    );

    assert_eq!(error.message(), "Expected expression");
    assert!(matches!(error.get_tip(), ErrorTip::Suggestion(_)));
}

#[test]
fn test_type_mismatch_message() {
    let error = Error::new(
        ErrorImpl::TypeMatchError {
            expected: "int".to_string(),
            received: "string".to_string(),
        },
        location(1, 1),
    );

    assert_eq!(error.get_error_name(), "TypeMatchError");
    assert_eq!(error.message(), "Cannot assign string to int");
}

#[test]
fn test_argument_count_message() {
    let error = Error::new(
        ErrorImpl::ArgumentCountMismatch {
            expected: 2,
            received: 3,
        },
        location(1, 1),
    );

    assert_eq!(
        error.message(),
        "Wrong number of arguments: expected 2, received 3"
    );
}

#[test]
fn test_condition_message() {
    let error = Error::new(
        ErrorImpl::ConditionNotBoolean {
            construct: "While".to_string(),
            received: "string".to_string(),
        },
        location(1, 1),
    );

    assert_eq!(
        error.message(),
        "While condition must be convertible to boolean"
    );
}

#[test]
fn test_error_display_includes_location() {
    let error = Error::new(
        ErrorImpl::UndefinedIdentifier {
            name: "x".to_string(),
        },
        location(2, 5),
    );

    assert_eq!(error.to_string(), "test.tspp:2:5: Undefined identifier: x");
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this".to_string());
    assert_eq!(tip.to_string(), "Try this");

    let none = ErrorTip::None;
    assert_eq!(none.to_string(), "");
}

#[test]
fn test_diagnostics_counts() {
    let mut diagnostics = Diagnostics::new();
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.is_empty());

    diagnostics.warning(location(1, 1), "For-of requires an iterable type");
    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);

    diagnostics.error(location(2, 1), "Expected expression");
    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.len(), 2);
}

#[test]
fn test_diagnostics_preserve_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.error(location(1, 1), "first");
    diagnostics.warning(location(2, 1), "second");
    diagnostics.error(location(3, 1), "third");

    let messages: Vec<&str> = diagnostics
        .diagnostics()
        .iter()
        .map(|d| d.message.as_str())
        .collect();
    assert_eq!(messages, vec!["first", "second", "third"]);
    assert_eq!(diagnostics.diagnostics()[1].severity, Severity::Warning);
}

#[test]
fn test_diagnostics_report_keeps_error_name() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report(Error::new(ErrorImpl::BreakOutsideLoop, location(4, 3)));

    let diagnostic = &diagnostics.diagnostics()[0];
    assert!(diagnostic.is_error());
    assert_eq!(diagnostic.code.as_deref(), Some("BreakOutsideLoop"));
    assert_eq!(
        diagnostic.to_string(),
        "test.tspp:4:3: error: Break statement must be inside a loop or switch"
    );
}

#[test]
fn test_diagnostics_report_warning() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.report_warning(Error::new(
        ErrorImpl::NonIterable {
            received: "int".to_string(),
        },
        location(1, 1),
    ));

    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.warning_count(), 1);
}

#[test]
fn test_diagnostics_clear() {
    let mut diagnostics = Diagnostics::new();
    diagnostics.error(location(1, 1), "boom");
    diagnostics.clear();

    assert!(!diagnostics.has_errors());
    assert!(diagnostics.diagnostics().is_empty());
}
