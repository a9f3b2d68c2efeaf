//! External command execution.
//!
//! This module runs the command an app describes:
//!
//! - Environment overrides on top of the inherited environment
//! - Dialog output: block and capture combined stdout and stderr
//! - Realtime output: stream lines as they arrive, keeping a bounded tail
//! - Console output: inherit the host's stdio between `>>>` and `<<<` markers
//! - Visible mode: launch detached and return immediately

mod buffer;
mod executor;

pub use buffer::OutputBuffer;
pub use executor::SystemRunner;

use crate::error::RunnerError;
use crate::schema::{CommandSpec, ExecMode, OutputMode};
use std::collections::BTreeMap;

/// Everything needed to start one process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunRequest {
    pub program: String,
    pub args: Vec<String>,
    /// Added to the inherited environment; wins on conflicts.
    pub env: BTreeMap<String, String>,
    pub mode: ExecMode,
    pub output: OutputMode,
}

impl RunRequest {
    /// Request for `command` with an already-built argument vector.
    pub fn from_command(command: &CommandSpec, args: Vec<String>) -> Self {
        Self {
            program: command.path.clone(),
            args,
            env: command.env.clone(),
            mode: command.mode,
            output: command.output,
        }
    }

    /// `program arg...` joined with single spaces, as echoed by console runs.
    pub fn display(&self) -> String {
        let mut line = self.program.clone();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// What a finished (or launched) run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Dialog mode: combined stdout and stderr.
    Captured(String),
    /// Realtime mode: the retained tail of the stream.
    Streamed(OutputBuffer),
    /// Console mode: output went straight to the terminal.
    Console,
    /// Visible mode: the process was started and left running.
    Detached { pid: u32 },
}

/// Starts processes for submitted forms.
///
/// The seam between the form and the operating system; tests substitute a
/// recording implementation.
pub trait ProcessRunner {
    fn run(&mut self, request: &RunRequest) -> Result<RunOutcome, RunnerError>;
}
