//! Value extraction shared by condition evaluation, validation and argument
//! building.

use crate::binding::{BoundValue, FieldBinding};
use crate::schema::{Field, FieldType};

/// Current single value of a field, normalized to a string.
///
/// - string/number: the entry text, with one matching outer quote pair removed
/// - bool: `"true"` when checked, `""` otherwise
/// - choice: the selected option, or `""`
/// - multi fields: the first non-empty entry
pub fn extract_value<B: FieldBinding>(field: &Field, binding: &B) -> String {
    match (field.field_type, binding.value()) {
        (_, BoundValue::Entries(entries)) => entries
            .into_iter()
            .find(|e| !e.is_empty())
            .unwrap_or_default(),
        (FieldType::Bool, BoundValue::Checked(checked)) => {
            if checked {
                "true".to_string()
            } else {
                String::new()
            }
        }
        (FieldType::Choice, BoundValue::Selected(selected)) => selected.unwrap_or_default(),
        (FieldType::String | FieldType::Number, BoundValue::Text(text)) => {
            strip_outer_quotes(&text).to_string()
        }
        (field_type, value) => {
            tracing::warn!(
                field = %field.name,
                ?field_type,
                ?value,
                "binding value does not match field type; treating as empty"
            );
            String::new()
        }
    }
}

/// All non-empty entries of a multi-valued field, in order.
///
/// A single-valued binding yields its one value when non-empty.
pub fn extract_values<B: FieldBinding>(field: &Field, binding: &B) -> Vec<String> {
    match binding.value() {
        BoundValue::Entries(entries) => entries.into_iter().filter(|e| !e.is_empty()).collect(),
        _ => {
            let value = extract_value(field, binding);
            if value.is_empty() {
                Vec::new()
            } else {
                vec![value]
            }
        }
    }
}

/// Remove exactly one matching pair of outer `"` or `'` quotes.
///
/// Mismatched or single quote characters are left untouched.
pub fn strip_outer_quotes(value: &str) -> &str {
    let bytes = value.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return &value[1..value.len() - 1];
        }
    }
    value
}
