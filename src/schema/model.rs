//! Schema struct definitions.
//!
//! `Schema` mirrors the on-disk document. Items are read through a flat
//! `ItemDef` and converted into the `Item` enum, so the rest of the crate
//! never has to guess whether an entry is a label or a field.

use super::types::*;
use crate::rules::Condition;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A whole schema document: window settings plus one or more apps.
#[derive(Debug, Clone, Deserialize)]
pub struct Schema {
    /// Window title. Empty means "derive from the apps".
    #[serde(default)]
    pub title: String,

    #[serde(default = "default_width")]
    pub width: f32,

    #[serde(default = "default_height")]
    pub height: f32,

    #[serde(default)]
    pub apps: Vec<App>,
}

/// One runnable command and the form fields that feed it.
#[derive(Debug, Clone, Deserialize)]
pub struct App {
    pub command: CommandSpec,

    #[serde(default)]
    pub items: Vec<Item>,
}

impl App {
    /// Iterate over the fields of this app in declaration order, skipping labels.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.items.iter().filter_map(Item::as_field)
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields().find(|f| f.name == name)
    }
}

/// The external command an app runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CommandSpec {
    /// Executable path or name resolved through PATH.
    pub path: String,

    /// Display name (tab title when there are several apps).
    pub name: String,

    /// Static arguments placed before any field arguments.
    pub args: Vec<String>,

    pub mode: ExecMode,

    pub output: OutputMode,

    /// Offer the "show command" action.
    pub debug: bool,

    pub run_text: String,
    pub run_color: String,
    pub debug_text: String,
    pub debug_color: String,

    /// Environment overrides added on top of the inherited environment.
    pub env: BTreeMap<String, String>,
}

impl CommandSpec {
    pub fn run_label(&self) -> &str {
        non_empty_or(&self.run_text, DEFAULT_RUN_TEXT)
    }

    pub fn debug_label(&self) -> &str {
        non_empty_or(&self.debug_text, DEFAULT_DEBUG_TEXT)
    }

    pub fn run_importance(&self) -> Importance {
        Importance::parse(&self.run_color)
    }

    pub fn debug_importance(&self) -> Importance {
        Importance::parse(&self.debug_color)
    }
}

fn non_empty_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.is_empty() { fallback } else { value }
}

/// One schema entry: decorative text or an interactive field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ItemDef")]
pub enum Item {
    Label(String),
    Field(Box<Field>),
}

impl Item {
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Item::Field(field) => Some(field),
            Item::Label(_) => None,
        }
    }

    pub fn is_label(&self) -> bool {
        matches!(self, Item::Label(_))
    }
}

/// A configured form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Field {
    /// Flag name; unique within an app.
    pub name: String,
    pub field_type: FieldType,
    /// Display label; empty falls back to `name`.
    pub label: String,
    pub description: String,
    pub default: Option<DefaultValue>,
    pub choices: Vec<String>,
    pub placeholder: String,
    pub picker: Option<PickerKind>,
    pub picker_text: String,
    pub separator: Separator,
    pub required: bool,
    /// Emit the bare value instead of a flag.
    pub positional: bool,
    /// Use `-name` instead of `--name`.
    pub short: bool,
    /// Accept any number of values, each emitted as its own flag group.
    pub multi: bool,
    /// Regex the value must match.
    pub validate: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub condition: Option<Condition>,
}

impl Field {
    /// Create a field with the given name and type; everything else defaulted.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            ..Default::default()
        }
    }

    /// Label shown to the user and used in validation messages.
    pub fn display_label(&self) -> &str {
        non_empty_or(&self.label, &self.name)
    }

    /// Flag prefix: `-` for short flags, `--` otherwise.
    pub fn prefix(&self) -> &'static str {
        if self.short { "-" } else { "--" }
    }

    pub fn picker_label(&self) -> &str {
        non_empty_or(&self.picker_text, DEFAULT_PICKER_TEXT)
    }

    pub fn has_bounds(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }
}

/// Flat on-disk shape of an item, before it is classified.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ItemDef {
    text: String,
    name: String,
    #[serde(rename = "type")]
    field_type: FieldType,
    label: String,
    description: String,
    default: Option<DefaultValue>,
    choices: Vec<String>,
    placeholder: String,
    picker: String,
    picker_text: String,
    separator: Separator,
    required: bool,
    positional: bool,
    short: bool,
    multi: bool,
    validate: String,
    min: Option<f64>,
    max: Option<f64>,
    condition: String,
}

impl TryFrom<ItemDef> for Item {
    type Error = String;

    fn try_from(def: ItemDef) -> Result<Self, Self::Error> {
        if def.name.is_empty() {
            if def.text.is_empty() {
                return Err("item has neither 'name' nor 'text'".to_string());
            }
            return Ok(Item::Label(def.text));
        }

        let picker = PickerKind::parse(&def.picker);
        if picker.is_some() && def.field_type != FieldType::String {
            return Err(format!(
                "field '{}': 'picker' is only valid on string fields",
                def.name
            ));
        }

        let condition = if def.condition.is_empty() {
            None
        } else {
            Some(Condition::parse(&def.condition))
        };

        Ok(Item::Field(Box::new(Field {
            name: def.name,
            field_type: def.field_type,
            label: def.label,
            description: def.description,
            default: def.default,
            choices: def.choices,
            placeholder: def.placeholder,
            picker,
            picker_text: def.picker_text,
            separator: def.separator,
            required: def.required,
            positional: def.positional,
            short: def.short,
            multi: def.multi,
            validate: Some(def.validate).filter(|v| !v.is_empty()),
            min: def.min,
            max: def.max,
            condition,
        })))
    }
}
