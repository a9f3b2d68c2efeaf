//! Field bindings: the live value and enabled state behind each field.
//!
//! The rule engine never touches controls directly. It reads values and
//! toggles enabled state through the [`FieldBinding`] trait, looked up by
//! field name in a [`BindingRegistry`] that is passed explicitly to every
//! operation.
//!
//! [`MemoryBinding`] is the crate's own implementation, used by the console
//! front-end and by tests.

use crate::schema::{App, Field, FieldType, PickerKind};
use std::collections::HashMap;

/// Raw state reported by a binding, before per-type normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundValue {
    /// Text entry content (string and number fields).
    Text(String),
    /// Checkbox state (bool fields).
    Checked(bool),
    /// Selected option, if any (choice fields).
    Selected(Option<String>),
    /// Entries of a multi-valued field, in the order they were added.
    Entries(Vec<String>),
}

/// Something that can be enabled or disabled, such as the browse button of a
/// picker.
pub trait Toggle {
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// Live accessor for one field.
///
/// A composite control (an entry plus a picker button, for example) exposes
/// its primary value through `value` and its extra controls through
/// `auxiliaries`. Enabled state is applied to the primary and to every
/// auxiliary.
pub trait FieldBinding {
    fn value(&self) -> BoundValue;

    fn is_enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    fn auxiliaries(&mut self) -> Vec<&mut dyn Toggle> {
        Vec::new()
    }
}

/// Field name → binding.
#[derive(Debug, Clone)]
pub struct BindingRegistry<B> {
    bindings: HashMap<String, B>,
}

impl<B> Default for BindingRegistry<B> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<B: FieldBinding> BindingRegistry<B> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding, replacing any previous binding of the same name.
    pub fn insert(&mut self, name: impl Into<String>, binding: B) {
        self.bindings.insert(name.into(), binding);
    }

    pub fn get(&self, name: &str) -> Option<&B> {
        self.bindings.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut B> {
        self.bindings.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

}

/// An auxiliary control of a composite binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auxiliary {
    pub label: String,
    pub enabled: bool,
}

impl Toggle for Auxiliary {
    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// In-memory binding holding a value, an enabled flag and any auxiliary
/// controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBinding {
    value: BoundValue,
    enabled: bool,
    auxiliaries: Vec<Auxiliary>,
}

impl MemoryBinding {
    pub fn new(value: BoundValue) -> Self {
        Self {
            value,
            enabled: true,
            auxiliaries: Vec::new(),
        }
    }

    /// Build a binding seeded from a field's type and configured default.
    ///
    /// - multi fields start with no entries
    /// - bool fields are checked only by a boolean `true` default
    /// - choice fields select the default only if it is one of the choices
    /// - picker fields get a browse control as auxiliary
    pub fn for_field(field: &Field) -> Self {
        if field.multi {
            return Self::new(BoundValue::Entries(Vec::new()));
        }

        let value = match field.field_type {
            FieldType::String | FieldType::Number => BoundValue::Text(
                field
                    .default
                    .as_ref()
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
            ),
            FieldType::Bool => BoundValue::Checked(
                field
                    .default
                    .as_ref()
                    .and_then(|d| d.as_bool())
                    .unwrap_or(false),
            ),
            FieldType::Choice => BoundValue::Selected(
                field
                    .default
                    .as_ref()
                    .map(|d| d.to_string())
                    .filter(|d| field.choices.iter().any(|c| c == d)),
            ),
        };

        let mut binding = Self::new(value);
        if matches!(field.picker, Some(PickerKind::File | PickerKind::Directory)) {
            binding.auxiliaries.push(Auxiliary {
                label: field.picker_label().to_string(),
                enabled: true,
            });
        }
        binding
    }

    /// Replace the current value.
    pub fn set(&mut self, value: BoundValue) {
        self.value = value;
    }

    pub fn auxiliary_controls(&self) -> &[Auxiliary] {
        &self.auxiliaries
    }
}

impl FieldBinding for MemoryBinding {
    fn value(&self) -> BoundValue {
        self.value.clone()
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn auxiliaries(&mut self) -> Vec<&mut dyn Toggle> {
        self.auxiliaries
            .iter_mut()
            .map(|aux| aux as &mut dyn Toggle)
            .collect()
    }
}

impl BindingRegistry<MemoryBinding> {
    /// Create one seeded binding per field of the app.
    pub fn for_app(app: &App) -> Self {
        let mut registry = Self::new();
        for field in app.fields() {
            registry.insert(field.name.clone(), MemoryBinding::for_field(field));
        }
        registry
    }
}
