//! cliface: schema-driven forms for command-line tools.
//!
//! This is the main entry point for the `cliface` binary. It parses
//! arguments, loads the schema, runs the interactive console session, and
//! maps errors to exit codes.

mod binding;
mod cli;
mod console;
pub mod error;
pub mod exit_codes;
mod form;
mod rules;
mod runner;
pub mod schema;

#[cfg(test)]
mod test_support;

use cli::Cli;
use console::Console;
use error::Result;
use runner::SystemRunner;
use schema::Schema;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Initialize logging (stderr, WARN unless RUST_LOG is set)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(()) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(err) => {
            // Print user-actionable error message to stderr
            eprintln!("Error: {}", err);

            // Return appropriate exit code
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let schema = Schema::load(cli.schema_path())?;

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    let mut runner = SystemRunner::new(io::stdout());
    console.run(&schema, &mut runner)?;

    Ok(())
}
