//! The diagnostic sink shared by the parser and the type checker.
//!
//! Neither stage ever aborts on a user error. Each failure is turned into a
//! [`Diagnostic`] and appended here, in the order it was found; callers
//! decide afterwards whether the unit succeeded by asking [`Diagnostics::has_errors`].

use std::fmt::Display;

use tracing::debug;

use crate::SourceLocation;

use super::errors::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub location: SourceLocation,
    pub message: String,
    /// Name of the structured error this came from, when there was one.
    pub code: Option<String>,
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}: {}", self.location, self.severity, self.message)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
    error_count: usize,
}

impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics::default()
    }

    pub fn error(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Error, location, message.into(), None);
    }

    pub fn warning(&mut self, location: SourceLocation, message: impl Into<String>) {
        self.push(Severity::Warning, location, message.into(), None);
    }

    /// Records a structured error as an error diagnostic.
    pub fn report(&mut self, error: Error) {
        let code = Some(error.get_error_name().to_string());
        self.push(
            Severity::Error,
            error.get_position().clone(),
            error.message(),
            code,
        );
    }

    /// Records a structured error as a warning diagnostic.
    pub fn report_warning(&mut self, error: Error) {
        let code = Some(error.get_error_name().to_string());
        self.push(
            Severity::Warning,
            error.get_position().clone(),
            error.message(),
            code,
        );
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.entries.len() - self.error_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.error_count = 0;
    }

    fn push(
        &mut self,
        severity: Severity,
        location: SourceLocation,
        message: String,
        code: Option<String>,
    ) {
        debug!("{} at {}: {}", severity, location, message);

        if severity == Severity::Error {
            self.error_count += 1;
        }

        self.entries.push(Diagnostic {
            severity,
            location,
            message,
            code,
        });
    }
}
