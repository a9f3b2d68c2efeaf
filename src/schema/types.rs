//! Enums, value types and serde default functions used by the schema model.

use serde::Deserialize;
use std::fmt;

/// Value type of a field.
///
/// Unknown type names fall back to `String` so that a typo still renders a
/// usable text entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum FieldType {
    /// Free text entry (default).
    #[default]
    String,
    /// Numeric text entry; eligible for `min`/`max` checks.
    Number,
    /// Checkbox; serialized as a bare flag when checked.
    Bool,
    /// One option out of `choices`.
    Choice,
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        FieldType::parse(&raw)
    }
}

impl FieldType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "string" | "" => FieldType::String,
            "number" => FieldType::Number,
            "bool" => FieldType::Bool,
            "choice" => FieldType::Choice,
            other => {
                tracing::warn!(field_type = other, "unknown field type, treating as string");
                FieldType::String
            }
        }
    }

    pub fn is_numeric(self) -> bool {
        matches!(self, FieldType::Number)
    }
}

/// How a flag name and its value are joined into argument tokens.
///
/// Parsed from the `separator` string of a field:
/// `" "` → two tokens, `"none"` → concatenated, `""` → `=`-joined,
/// anything else is used verbatim as the delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub enum Separator {
    /// `--name=value` (the default).
    #[default]
    Equals,
    /// `--name`, `value` as two tokens.
    Space,
    /// `--namevalue`.
    Concat,
    /// `--name<sep>value`.
    Literal(String),
}

impl From<String> for Separator {
    fn from(raw: String) -> Self {
        Separator::parse(&raw)
    }
}

impl Separator {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "" => Separator::Equals,
            " " => Separator::Space,
            "none" => Separator::Concat,
            other => Separator::Literal(other.to_string()),
        }
    }
}

/// Configured default value of a field.
///
/// Normalized to text when seeded into a binding; bool fields only honor
/// `Bool` defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl DefaultValue {
    /// Boolean view of the default, if it is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DefaultValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultValue::Bool(b) => write!(f, "{}", b),
            DefaultValue::Number(n) => write!(f, "{}", n),
            DefaultValue::Text(s) => f.write_str(s),
        }
    }
}

/// Kind of picker attached to a string field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerKind {
    File,
    Directory,
}

impl PickerKind {
    /// Empty or unknown names mean a plain entry without a picker.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "file" => Some(PickerKind::File),
            "directory" => Some(PickerKind::Directory),
            "" => None,
            other => {
                tracing::warn!(picker = other, "unknown picker, using a plain entry");
                None
            }
        }
    }
}

/// Whether the command runs attached to the form or is fired detached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum ExecMode {
    /// Validate, build argv, run and report (default).
    #[default]
    Hidden,
    /// Launch detached without validation or field arguments.
    Visible,
}

impl From<String> for ExecMode {
    fn from(raw: String) -> Self {
        ExecMode::parse(&raw)
    }
}

impl ExecMode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "hidden" | "" => ExecMode::Hidden,
            "visible" => ExecMode::Visible,
            other => {
                tracing::warn!(mode = other, "unknown mode, using hidden");
                ExecMode::Hidden
            }
        }
    }
}

/// Where the output of a hidden command goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(from = "String")]
pub enum OutputMode {
    /// Block, capture stdout and stderr, show the result when done (default).
    #[default]
    Dialog,
    /// Stream output lines as they arrive, keeping a bounded tail.
    Realtime,
    /// Inherit the host's stdio.
    RealtimeConsole,
}

impl From<String> for OutputMode {
    fn from(raw: String) -> Self {
        OutputMode::parse(&raw)
    }
}

impl OutputMode {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "dialog" | "" => OutputMode::Dialog,
            "realtime" => OutputMode::Realtime,
            "realtime-console" => OutputMode::RealtimeConsole,
            other => {
                tracing::warn!(output = other, "unknown output mode, using dialog");
                OutputMode::Dialog
            }
        }
    }
}

/// Semantic emphasis of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Importance {
    High,
    Danger,
    Warning,
    Success,
    Low,
    #[default]
    Medium,
}

impl Importance {
    /// Parse a color name. Unknown or empty names map to `Medium`.
    pub fn parse(color: &str) -> Self {
        match color {
            "high" => Importance::High,
            "danger" => Importance::Danger,
            "warning" => Importance::Warning,
            "success" => Importance::Success,
            "low" => Importance::Low,
            _ => Importance::Medium,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Importance::High => "high",
            Importance::Danger => "danger",
            Importance::Warning => "warning",
            Importance::Success => "success",
            Importance::Low => "low",
            Importance::Medium => "medium",
        }
    }
}

// Default value functions for serde
pub(crate) const DEFAULT_WIDTH: f32 = 400.0;
pub(crate) const DEFAULT_HEIGHT: f32 = 300.0;
pub(crate) const DEFAULT_TITLE: &str = "cliface";
pub(crate) const DEFAULT_RUN_TEXT: &str = "Run";
pub(crate) const DEFAULT_DEBUG_TEXT: &str = "Show Command";
pub(crate) const DEFAULT_PICKER_TEXT: &str = "...";

pub(crate) fn default_width() -> f32 {
    DEFAULT_WIDTH
}
pub(crate) fn default_height() -> f32 {
    DEFAULT_HEIGHT
}
