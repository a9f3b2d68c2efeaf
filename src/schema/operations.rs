//! Schema loading, validation, and utility operations.

use super::model::Schema;
use super::types::{DEFAULT_HEIGHT, DEFAULT_TITLE, DEFAULT_WIDTH};
use crate::error::SchemaError;
use std::collections::HashSet;
use std::path::Path;

type Result<T> = std::result::Result<T, SchemaError>;

impl Schema {
    /// Load a schema file.
    ///
    /// Files ending in `.yaml` or `.yml` are parsed as YAML; everything else
    /// is parsed as TOML.
    ///
    /// # Returns
    ///
    /// * `Ok(Schema)` - Successfully loaded and validated schema
    /// * `Err(SchemaError)` - Read failure, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| SchemaError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let is_yaml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));

        let schema = if is_yaml {
            Self::from_yaml(&content)?
        } else {
            Self::from_toml(&content)?
        };

        tracing::debug!(
            path = %path.display(),
            apps = schema.apps.len(),
            "loaded schema"
        );
        Ok(schema)
    }

    /// Parse a schema from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let schema: Schema =
            toml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        schema.finish()
    }

    /// Parse a schema from a YAML string.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let schema: Schema =
            serde_yaml::from_str(content).map_err(|e| SchemaError::Parse(e.to_string()))?;
        schema.finish()
    }

    fn finish(mut self) -> Result<Self> {
        // A zero size is treated the same as an absent one.
        if self.width <= 0.0 {
            self.width = DEFAULT_WIDTH;
        }
        if self.height <= 0.0 {
            self.height = DEFAULT_HEIGHT;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate the schema and return the first problem found.
    ///
    /// Validation rules:
    /// - at least one app is declared
    /// - every command has a non-empty `path`
    /// - field names are unique within an app
    pub fn validate(&self) -> Result<()> {
        if self.apps.is_empty() {
            return Err(SchemaError::Invalid(
                "no apps declared; add at least one [[apps]] section".to_string(),
            ));
        }

        for (index, app) in self.apps.iter().enumerate() {
            if app.command.path.trim().is_empty() {
                return Err(SchemaError::Invalid(format!(
                    "app #{} has an empty command path",
                    index + 1
                )));
            }

            let mut seen = HashSet::new();
            for field in app.fields() {
                if !seen.insert(field.name.as_str()) {
                    return Err(SchemaError::Invalid(format!(
                        "duplicate field name '{}' in app '{}'",
                        field.name,
                        app_display_name(app, index)
                    )));
                }
                if field.has_bounds() && !field.field_type.is_numeric() {
                    tracing::warn!(
                        field = %field.name,
                        "min/max set on a non-number field; bounds are ignored"
                    );
                }
            }
        }

        Ok(())
    }

    /// Title for the form window.
    ///
    /// Falls back to the command name when there is a single app, and to a
    /// generic title otherwise.
    pub fn window_title(&self) -> &str {
        if !self.title.is_empty() {
            return &self.title;
        }
        match self.apps.as_slice() {
            [only] if !only.command.name.is_empty() => &only.command.name,
            [_] => &self.apps[0].command.path,
            _ => DEFAULT_TITLE,
        }
    }
}

fn app_display_name(app: &super::App, index: usize) -> String {
    if app.command.name.is_empty() {
        format!("#{}", index + 1)
    } else {
        app.command.name.clone()
    }
}
