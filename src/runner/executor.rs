//! Process execution backed by `std::process`.

use super::buffer::{MAX_OUTPUT_LINES, OutputBuffer};
use super::{ProcessRunner, RunOutcome, RunRequest};
use crate::error::RunnerError;
use crate::schema::{ExecMode, OutputMode};
use std::io::{BufRead, BufReader, Read, Write};
use std::process::{Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Sender};
use std::thread::{self, JoinHandle};

type Result<T> = std::result::Result<T, RunnerError>;

/// Runs requests as real processes.
///
/// Streamed lines and console markers are written to `sink`.
pub struct SystemRunner<W> {
    sink: W,
    capacity: usize,
}

impl<W: Write> SystemRunner<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            capacity: MAX_OUTPUT_LINES,
        }
    }

    fn run_captured(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        let output = build_command(request)
            .stdin(Stdio::null())
            .output()
            .map_err(|source| spawn_error(request, source))?;

        let text = combine_output(&output.stdout, &output.stderr);
        check_status(request, output.status, text).map(RunOutcome::Captured)
    }

    fn run_streamed(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        let mut child = build_command(request)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| spawn_error(request, source))?;

        let (tx, rx) = mpsc::channel();
        let mut readers = Vec::with_capacity(2);
        if let Some(stdout) = child.stdout.take() {
            readers.push(spawn_line_reader(stdout, tx.clone()));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(spawn_line_reader(stderr, tx.clone()));
        }
        drop(tx);

        // Keep draining after a sink failure so the child never blocks on a full pipe.
        let mut buffer = OutputBuffer::with_capacity(self.capacity);
        let mut sink_error = None;
        for line in rx {
            if sink_error.is_none()
                && let Err(e) = writeln!(self.sink, "{}", line)
            {
                sink_error = Some(e);
            }
            buffer.push(line);
        }
        for reader in readers {
            let _ = reader.join();
        }

        let status = child.wait().map_err(|source| io_error(request, source))?;
        if let Some(source) = sink_error {
            return Err(io_error(request, source));
        }
        if buffer.dropped() > 0 {
            tracing::debug!(dropped = buffer.dropped(), "streamed output truncated");
        }
        let text = buffer.text();
        check_status(request, status, text).map(|_| RunOutcome::Streamed(buffer))
    }

    fn run_console(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        writeln!(self.sink, ">>> {}", request.display())
            .and_then(|_| self.sink.flush())
            .map_err(|source| io_error(request, source))?;

        let status = build_command(request)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        // The closing marker is written even when the command never started.
        writeln!(self.sink, "<<< done").map_err(|source| io_error(request, source))?;
        let status = status.map_err(|source| spawn_error(request, source))?;
        check_status(request, status, String::new()).map(|_| RunOutcome::Console)
    }

    fn launch_detached(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        let child = build_command(request)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| spawn_error(request, source))?;

        let pid = child.id();
        // Reap once it exits.
        thread::spawn(move || {
            let mut child = child;
            if let Err(e) = child.wait() {
                tracing::debug!(pid, error = %e, "failed to reap detached process");
            }
        });
        Ok(RunOutcome::Detached { pid })
    }
}

impl<W: Write> ProcessRunner for SystemRunner<W> {
    fn run(&mut self, request: &RunRequest) -> Result<RunOutcome> {
        tracing::info!(
            program = %request.program,
            argc = request.args.len(),
            mode = ?request.mode,
            output = ?request.output,
            "starting command"
        );

        match (request.mode, request.output) {
            (ExecMode::Visible, _) => self.launch_detached(request),
            (ExecMode::Hidden, OutputMode::Dialog) => self.run_captured(request),
            (ExecMode::Hidden, OutputMode::Realtime) => self.run_streamed(request),
            (ExecMode::Hidden, OutputMode::RealtimeConsole) => self.run_console(request),
        }
    }
}

fn build_command(request: &RunRequest) -> Command {
    let mut command = Command::new(&request.program);
    command.args(&request.args);

    // Merge environment variables
    for (key, value) in &request.env {
        command.env(key, value);
    }
    command
}

/// Forward every line of `reader` until EOF or until the receiver is gone.
fn spawn_line_reader<R: Read + Send + 'static>(reader: R, tx: Sender<String>) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut reader = BufReader::new(reader);
        let mut raw = Vec::new();
        loop {
            raw.clear();
            match reader.read_until(b'\n', &mut raw) {
                Ok(0) | Err(_) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&raw);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    if tx.send(line).is_err() {
                        break;
                    }
                }
            }
        }
    })
}

/// Stdout followed by stderr, separated by a newline when both are present.
fn combine_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(stdout).into_owned();
    let err = String::from_utf8_lossy(stderr);
    if !err.is_empty() {
        if !text.is_empty() && !text.ends_with('\n') {
            text.push('\n');
        }
        text.push_str(&err);
    }
    text
}

fn check_status(request: &RunRequest, status: ExitStatus, output: String) -> Result<String> {
    if status.success() {
        return Ok(output);
    }
    tracing::warn!(program = %request.program, code = ?status.code(), "command failed");
    Err(RunnerError::Exited {
        program: request.program.clone(),
        code: status.code(),
        output,
    })
}

fn spawn_error(request: &RunRequest, source: std::io::Error) -> RunnerError {
    RunnerError::Spawn {
        program: request.program.clone(),
        source,
    }
}

fn io_error(request: &RunRequest, source: std::io::Error) -> RunnerError {
    RunnerError::Io {
        program: request.program.clone(),
        source,
    }
}
