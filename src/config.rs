//! Options for one front-end run.

use std::env;

use tracing::warn;

use crate::logger::LogLevel;

/// Environment variable that overrides the default log level.
pub const LOG_ENV_VAR: &str = "TSPP_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerOptions {
    /// Extension (without the dot) that input files must carry.
    pub source_extension: String,
    pub dump_ast: bool,
    /// Treat any warning as a failed unit.
    pub warnings_as_errors: bool,
    pub log_level: LogLevel,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        CompilerOptions {
            source_extension: String::from("tspp"),
            dump_ast: false,
            warnings_as_errors: false,
            log_level: LogLevel::default(),
        }
    }
}

impl CompilerOptions {
    /// Defaults, with the log level taken from `TSPP_LOG` when it is set.
    pub fn from_env() -> Self {
        CompilerOptions::default().with_log_override(env::var(LOG_ENV_VAR).ok().as_deref())
    }

    /// Applies a log level given as text. Unparseable values keep the current level.
    pub fn with_log_override(mut self, value: Option<&str>) -> Self {
        if let Some(value) = value {
            match value.parse::<LogLevel>() {
                Ok(level) => self.log_level = level,
                Err(message) => warn!("ignoring {}: {}", LOG_ENV_VAR, message),
            }
        }
        self
    }

    /// Whether `path` carries the configured source extension.
    pub fn accepts_file(&self, path: &std::path::Path) -> bool {
        path.extension()
            .and_then(|extension| extension.to_str())
            .is_some_and(|extension| extension == self.source_extension)
    }

    /// Whether a unit with these diagnostic counts should be reported as failed.
    pub fn is_failure(&self, error_count: usize, warning_count: usize) -> bool {
        error_count > 0 || (self.warnings_as_errors && warning_count > 0)
    }
}
