//! Command-line driver: checks one `.tspp` file and prints its diagnostics.

use std::{fs::read_to_string, path::{Path, PathBuf}, process::ExitCode, time::Instant};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{debug, info};

use tspp_frontend::{
    ast::printer::dump,
    check_source,
    config::CompilerOptions,
    errors::diagnostics::Diagnostic,
    logger::{self, LogLevel},
    SourceLocation,
};

/// Parse and type-check a TSPP source file
#[derive(Parser, Debug)]
#[command(name = "tspp-frontend")]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Print the parsed AST
    #[arg(long)]
    dump_ast: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    /// Fail when any warning is reported
    #[arg(long)]
    warnings_as_errors: bool,
}

impl Args {
    fn options(&self) -> CompilerOptions {
        let mut options = CompilerOptions::from_env();
        options.dump_ast = self.dump_ast;
        options.warnings_as_errors = self.warnings_as_errors;
        if self.verbose {
            options.log_level = LogLevel::Debug;
        }
        if let Some(level) = self.log_level {
            options.log_level = level;
        }
        options
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let options = args.options();
    logger::init_with_level(options.log_level);

    match run(&args.file, &options) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the unit passed.
fn run(file: &Path, options: &CompilerOptions) -> Result<bool> {
    if !options.accepts_file(file) {
        bail!("File must have .{} extension", options.source_extension);
    }

    let source = read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let file_name = file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    let start = Instant::now();
    let output = match check_source(&source, &file_name) {
        Ok(output) => output,
        Err(error) => {
            display_error(&source, error.get_position(), "error", &error.message());
            return Ok(false);
        }
    };
    info!("checked {} in {:?}", file_name, start.elapsed());

    if options.dump_ast {
        println!("{}", dump(&output.ast));
    }

    for diagnostic in output.diagnostics.diagnostics() {
        display_diagnostic(&source, diagnostic);
    }

    let errors = output.diagnostics.error_count();
    let warnings = output.diagnostics.warning_count();
    debug!("{} error(s), {} warning(s)", errors, warnings);

    if errors > 0 || warnings > 0 {
        eprintln!("{} error(s), {} warning(s)", errors, warnings);
    }

    Ok(!options.is_failure(errors, warnings))
}

fn display_diagnostic(source: &str, diagnostic: &Diagnostic) {
    display_error(
        source,
        &diagnostic.location,
        &diagnostic.severity.to_string(),
        &diagnostic.message,
    );
}

/*
    main.tspp:2:9: error: message
       |
     2 | let a = #;
       |         ^
*/
fn display_error(source: &str, location: &SourceLocation, severity: &str, message: &str) {
    eprintln!("{}: {}: {}", location, severity, message);

    let line_index = (location.line as usize).saturating_sub(1);
    let Some(line_text) = source.lines().nth(line_index) else {
        return;
    };

    let line_str = location.line.to_string();
    let padding = line_str.len() + 2;
    let caret = (location.column as usize).max(1);

    eprintln!("{:>padding$}", "|");
    eprintln!("{} | {}", line_str, line_text);
    eprintln!("{:>padding$} {:>caret$}", "|", "^");
}
