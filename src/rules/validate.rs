//! Submit-time validation.
//!
//! Two passes run in order, each stopping at the first failure:
//! 1. required fields must be non-empty
//! 2. non-empty values must match their pattern and numeric bounds
//!
//! Labels and fields whose condition does not hold are skipped by both.

use super::condition::evaluate;
use super::extract::{extract_value, extract_values};
use crate::binding::{BindingRegistry, FieldBinding};
use crate::error::ValidationError;
use crate::schema::{App, Field};
use regex::Regex;

type Result<T> = std::result::Result<T, ValidationError>;

/// Run the required pass, then the full pass.
pub fn validate<B: FieldBinding>(app: &App, registry: &BindingRegistry<B>) -> Result<()> {
    validate_required(app, registry)?;
    validate_all(app, registry)
}

/// Fail on the first enabled, required field with an empty value.
pub fn validate_required<B: FieldBinding>(app: &App, registry: &BindingRegistry<B>) -> Result<()> {
    for (field, binding) in active_fields(app, registry) {
        if !field.required {
            continue;
        }
        if extract_values(field, binding).is_empty() {
            return Err(ValidationError::Required {
                label: field.display_label().to_string(),
            });
        }
    }
    Ok(())
}

/// Check pattern and bounds of every enabled field.
///
/// Each entry of a multi-valued field is checked on its own.
pub fn validate_all<B: FieldBinding>(app: &App, registry: &BindingRegistry<B>) -> Result<()> {
    for (field, binding) in active_fields(app, registry) {
        if field.multi {
            for value in extract_values(field, binding) {
                validate_field(field, &value)?;
            }
        } else {
            validate_field(field, &extract_value(field, binding))?;
        }
    }
    Ok(())
}

/// Validate one value against `field`'s rules. Empty values always pass.
pub fn validate_field(field: &Field, value: &str) -> Result<()> {
    if value.is_empty() {
        return Ok(());
    }
    let label = field.display_label();

    if let Some(pattern) = &field.validate {
        let re = Regex::new(pattern).map_err(|e| {
            tracing::warn!(field = %field.name, %pattern, error = %e, "invalid validation pattern");
            ValidationError::InvalidPattern {
                label: label.to_string(),
                pattern: pattern.clone(),
            }
        })?;
        if !re.is_match(value) {
            return Err(ValidationError::FormatInvalid {
                label: label.to_string(),
            });
        }
    }

    if field.field_type.is_numeric() && field.has_bounds() {
        let number: f64 = value.parse().map_err(|_| ValidationError::NotANumber {
            label: label.to_string(),
        })?;
        if let Some(min) = field.min
            && number < min
        {
            return Err(ValidationError::BelowMin {
                label: label.to_string(),
                min,
            });
        }
        if let Some(max) = field.max
            && number > max
        {
            return Err(ValidationError::AboveMax {
                label: label.to_string(),
                max,
            });
        }
    }

    Ok(())
}

/// Bound fields whose condition currently holds, in declaration order.
fn active_fields<'a, B: FieldBinding>(
    app: &'a App,
    registry: &'a BindingRegistry<B>,
) -> impl Iterator<Item = (&'a Field, &'a B)> {
    app.fields().filter_map(move |field| {
        let binding = registry.get(&field.name)?;
        evaluate(field, app, registry).then_some((field, binding))
    })
}
