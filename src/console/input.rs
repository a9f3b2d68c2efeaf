//! Turning typed answers into binding values.

use crate::binding::BoundValue;
use crate::schema::{Field, FieldType, PickerKind};

/// Typed in place of a value to clear the field.
pub const CLEAR: &str = "-";

/// Convert one line of input for `field` into a binding value.
///
/// Returns a message to show before asking again when the input is not
/// acceptable for the field's type.
pub fn parse_answer(field: &Field, line: &str) -> Result<BoundValue, String> {
    if line == CLEAR {
        return Ok(cleared(field));
    }

    if field.multi {
        return shell_words::split(line)
            .map(BoundValue::Entries)
            .map_err(|e| format!("could not split values: {}", e));
    }

    match field.field_type {
        FieldType::Bool => parse_yes_no(line)
            .map(BoundValue::Checked)
            .ok_or_else(|| "answer y or n".to_string()),
        FieldType::Choice => select_choice(field, line)
            .map(|choice| BoundValue::Selected(Some(choice)))
            .ok_or_else(|| format!("choose one of: {}", field.choices.join(", "))),
        FieldType::String | FieldType::Number => Ok(BoundValue::Text(line.to_string())),
    }
}

/// The empty value for `field`'s kind of binding.
pub fn cleared(field: &Field) -> BoundValue {
    if field.multi {
        return BoundValue::Entries(Vec::new());
    }
    match field.field_type {
        FieldType::Bool => BoundValue::Checked(false),
        FieldType::Choice => BoundValue::Selected(None),
        FieldType::String | FieldType::Number => BoundValue::Text(String::new()),
    }
}

fn parse_yes_no(line: &str) -> Option<bool> {
    match line.trim().to_ascii_lowercase().as_str() {
        "y" | "yes" | "true" | "1" => Some(true),
        "n" | "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

/// Accept a 1-based index into the choices or the exact choice text.
fn select_choice(field: &Field, line: &str) -> Option<String> {
    let line = line.trim();
    if let Some(choice) = field.choices.iter().find(|c| c.as_str() == line) {
        return Some(choice.clone());
    }
    let index: usize = line.parse().ok()?;
    field.choices.get(index.checked_sub(1)?).cloned()
}

/// Current value as shown in the prompt.
pub fn render_value(value: &BoundValue) -> String {
    match value {
        BoundValue::Text(text) => text.clone(),
        BoundValue::Checked(true) => "y".to_string(),
        BoundValue::Checked(false) => "n".to_string(),
        BoundValue::Selected(selection) => selection.clone().unwrap_or_default(),
        BoundValue::Entries(entries) => shell_words::join(entries),
    }
}

/// Short type hint appended to a field's prompt.
pub fn hint(field: &Field) -> Option<String> {
    if field.multi {
        return Some("space-separated, quote to group".to_string());
    }
    match (field.picker, field.field_type) {
        (Some(PickerKind::File), _) => Some(format!(
            "file path, {} to browse",
            field.picker_label()
        )),
        (Some(PickerKind::Directory), _) => Some(format!(
            "directory path, {} to browse",
            field.picker_label()
        )),
        (None, FieldType::Bool) => Some("y/n".to_string()),
        (None, FieldType::Number) => Some("number".to_string()),
        _ => None,
    }
}
