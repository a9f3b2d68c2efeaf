//! CLI argument parsing for cliface.
//!
//! Uses clap derive macros for declarative argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// File name looked up next to the executable when no schema path is given.
pub const DEFAULT_SCHEMA_FILE: &str = "config.toml";

/// cliface: turn a declarative schema into a form for a command-line tool.
///
/// The schema lists one or more commands and the fields that feed their
/// arguments. Fill in the form, preview the command line, and run it.
#[derive(Parser, Debug)]
#[command(name = "cliface")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Schema file (TOML, or YAML with a .yaml/.yml extension).
    ///
    /// Defaults to config.toml in the directory of the executable.
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parse CLI arguments from the environment.
    pub fn parse_args() -> Self {
        Cli::parse()
    }

    /// The schema path to load: the explicit one, or the default location.
    pub fn schema_path(&self) -> PathBuf {
        match &self.config {
            Some(path) => path.clone(),
            None => default_schema_path(),
        }
    }
}

fn default_schema_path() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(DEFAULT_SCHEMA_FILE)))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SCHEMA_FILE))
}
