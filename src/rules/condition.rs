//! Condition parsing and evaluation.
//!
//! A condition gates a field on another field's current value:
//!
//! ```text
//! mode=advanced     enabled when mode is "advanced"
//! skip!=true        enabled unless skip is checked
//! source            enabled when source is non-empty
//! ```

use super::extract::extract_value;
use crate::binding::{BindingRegistry, FieldBinding};
use crate::schema::{App, Field};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
}

/// A parsed `field OP expected` gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub field: String,
    pub op: Operator,
    pub expected: String,
}

impl Condition {
    /// Parse a condition expression. Never fails.
    ///
    /// `!=` is searched first, then `=`. An operator only counts when at least
    /// one character precedes it. Without an operator the whole expression is
    /// the field name and the condition holds whenever that field is non-empty.
    pub fn parse(expr: &str) -> Self {
        if let Some(i) = expr.find("!=").filter(|&i| i > 0) {
            return Self {
                field: expr[..i].to_string(),
                op: Operator::Ne,
                expected: expr[i + 2..].to_string(),
            };
        }
        if let Some(i) = expr.find('=').filter(|&i| i > 0) {
            return Self {
                field: expr[..i].to_string(),
                op: Operator::Eq,
                expected: expr[i + 1..].to_string(),
            };
        }
        Self {
            field: expr.to_string(),
            op: Operator::Ne,
            expected: String::new(),
        }
    }

    /// Compare an extracted value against the expectation.
    pub fn holds_for(&self, actual: &str) -> bool {
        match self.op {
            Operator::Eq => actual == self.expected,
            Operator::Ne => actual != self.expected,
        }
    }
}

/// Whether `field`'s condition currently holds.
///
/// Fail-open: no condition, a reference to a field the app does not declare,
/// or a field without a binding all evaluate to `true`.
pub fn evaluate<B: FieldBinding>(field: &Field, app: &App, registry: &BindingRegistry<B>) -> bool {
    let Some(condition) = &field.condition else {
        return true;
    };
    let Some(referenced) = app.field(&condition.field) else {
        return true;
    };
    let Some(binding) = registry.get(&condition.field) else {
        return true;
    };

    condition.holds_for(&extract_value(referenced, binding))
}
