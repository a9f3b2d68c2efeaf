//! Exit code constants for the cliface binary.
//!
//! - 0: Success
//! - 1: Schema file missing, unparsable, or invalid
//! - 2: Terminal I/O failure while driving the form

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// The schema could not be loaded. Fatal at startup.
pub const SCHEMA_ERROR: i32 = 1;

/// Reading input or writing output on the terminal failed.
pub const CONSOLE_ERROR: i32 = 2;
