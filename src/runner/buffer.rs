//! Bounded line buffer for streamed output.

use std::collections::VecDeque;

/// Number of most recent lines kept for realtime output.
pub const MAX_OUTPUT_LINES: usize = 500;

/// Keeps the last `capacity` lines pushed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputBuffer {
    lines: VecDeque<String>,
    capacity: usize,
    dropped: usize,
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::with_capacity(MAX_OUTPUT_LINES)
    }
}

impl OutputBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lines: VecDeque::with_capacity(capacity.min(MAX_OUTPUT_LINES)),
            capacity: capacity.max(1),
            dropped: 0,
        }
    }

    /// Append a line, evicting the oldest one when full.
    pub fn push(&mut self, line: impl Into<String>) {
        if self.lines.len() == self.capacity {
            self.lines.pop_front();
            self.dropped += 1;
        }
        self.lines.push_back(line.into());
    }

    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(String::as_str)
    }

    /// Lines evicted so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Every line pushed, retained or not.
    pub fn total(&self) -> usize {
        self.lines.len() + self.dropped
    }

    /// Retained lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines().collect::<Vec<_>>().join("\n")
    }
}
