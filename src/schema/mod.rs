//! Schema model for cliface.
//!
//! This module defines the declarative form description: window settings,
//! the commands to run, and the ordered list of labels and fields per command.
//! Schemas are read once at startup and never change afterwards.

mod model;
mod operations;
pub mod types;


// Re-export public API
pub use model::{App, CommandSpec, Field, Item, Schema};
pub use types::{
    DefaultValue, ExecMode, FieldType, Importance, OutputMode, PickerKind, Separator,
};
