//! Error types for cliface.
//!
//! Uses thiserror for derive macros. Each concern gets its own enum so that
//! callers can recover at the right boundary:
//! - `SchemaError` is fatal at startup
//! - `ValidationError` aborts a single submit attempt
//! - `RunnerError` is reported after execution and never ends the program

use crate::exit_codes;
use std::path::PathBuf;
use thiserror::Error;

/// The schema file could not be read, parsed, or failed its load-time checks.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("failed to read schema file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse schema: {0}")]
    Parse(String),

    #[error("invalid schema: {0}")]
    Invalid(String),
}

/// A single field failed validation.
///
/// `label` is the field's display label, or its name when no label is set.
/// The rendered messages are shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{label} is required")]
    Required { label: String },

    #[error("invalid regex for {label}")]
    InvalidPattern { label: String, pattern: String },

    #[error("{label} format invalid")]
    FormatInvalid { label: String },

    #[error("{label} must be a number")]
    NotANumber { label: String },

    #[error("{label} must be >= {min}")]
    BelowMin { label: String, min: f64 },

    #[error("{label} must be <= {max}")]
    AboveMax { label: String, max: f64 },
}

impl ValidationError {
    /// Label of the field that failed.
    pub fn label(&self) -> &str {
        match self {
            ValidationError::Required { label }
            | ValidationError::InvalidPattern { label, .. }
            | ValidationError::FormatInvalid { label }
            | ValidationError::NotANumber { label }
            | ValidationError::BelowMin { label, .. }
            | ValidationError::AboveMax { label, .. } => label,
        }
    }
}

/// The external process could not be started or did not finish cleanly.
#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("failed to execute '{program}': {source}\nFix: ensure the command is installed and in PATH.")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running '{program}': {source}")]
    Io {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("'{program}' exited with {}", describe_exit(.code))]
    Exited {
        program: String,
        code: Option<i32>,
        output: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

/// Failure of a submit attempt: either the form was rejected before anything
/// ran, or the runner reported a problem.
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Runner(#[from] RunnerError),
}

/// Top-level error for the cliface binary.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Reading from or writing to the terminal failed.
    #[error("console I/O failed: {0}")]
    Console(#[from] std::io::Error),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Schema(_) => exit_codes::SCHEMA_ERROR,
            CliError::Console(_) => exit_codes::CONSOLE_ERROR,
        }
    }
}

/// Result type alias for top-level operations.
pub type Result<T> = std::result::Result<T, CliError>;
