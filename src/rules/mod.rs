//! The schema-driven rule engine.
//!
//! - `condition`: parse and evaluate `field OP value` gates
//! - `extract`: normalize binding state into strings
//! - `graph`: re-evaluate dependents when a referenced field changes
//! - `args`: serialize enabled fields into an argument vector
//! - `validate`: required and format/range checks before submit
//!
//! Every operation is synchronous and reads the current binding state, so
//! results never depend on the order in which changes were observed.

pub mod args;
pub mod condition;
pub mod extract;
pub mod graph;
pub mod validate;


pub use args::{QuoteStyle, build_args, render_command_line};
pub use condition::Condition;
pub use extract::extract_value;
pub use graph::DependencyGraph;
pub use validate::validate;
