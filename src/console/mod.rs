//! Terminal front-end.
//!
//! Walks the user through an app's items in order, then offers the run,
//! preview and edit actions until they quit. Input and output are generic so
//! sessions can be scripted.
//!
//! ```text
//! == Echo ==
//! Message [world]: hello
//! [r] Execute (high)  [d] Preview (low)  [e] Edit  [q] Quit
//! > r
//! ```

mod input;

#[cfg(test)]
mod tests;

use crate::binding::{FieldBinding, Toggle};
use crate::error::{RunnerError, SubmitError};
use crate::form::Form;
use crate::runner::{ProcessRunner, RunOutcome};
use crate::schema::{App, Field, FieldType, Importance, Item, OutputMode, PickerKind, Schema};
use input::{hint, parse_answer, render_value};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Run an interactive session until the user quits or input ends.
    pub fn run<P: ProcessRunner>(&mut self, schema: &Schema, runner: &mut P) -> io::Result<()> {
        writeln!(self.output, "== {} ==", schema.window_title())?;
        tracing::debug!(
            width = schema.width,
            height = schema.height,
            "window size is not used by the terminal front-end"
        );

        if let [only] = schema.apps.as_slice() {
            return self.run_app(only, runner);
        }

        while let Some(index) = self.choose_app(schema)? {
            self.run_app(&schema.apps[index], runner)?;
        }
        Ok(())
    }

    fn choose_app(&mut self, schema: &Schema) -> io::Result<Option<usize>> {
        loop {
            writeln!(self.output, "Apps:")?;
            for (i, app) in schema.apps.iter().enumerate() {
                writeln!(self.output, "  {}) {}", i + 1, app_name(app))?;
            }
            let prompt = format!("Select an app [1-{}, q to quit]: ", schema.apps.len());
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(None);
            };
            let line = line.trim();
            if line == "q" {
                return Ok(None);
            }
            match line.parse::<usize>() {
                Ok(n) if (1..=schema.apps.len()).contains(&n) => return Ok(Some(n - 1)),
                _ => writeln!(self.output, "invalid selection '{}'", line)?,
            }
        }
    }

    fn run_app<P: ProcessRunner>(&mut self, app: &App, runner: &mut P) -> io::Result<()> {
        writeln!(self.output, "-- {} --", app_name(app))?;
        let mut form = Form::new(app.clone());
        if !self.fill(&mut form)? {
            return Ok(());
        }

        loop {
            self.print_actions(app)?;
            let Some(line) = self.prompt("> ")? else {
                return Ok(());
            };
            match line.trim() {
                "r" | "run" => self.submit(&form, runner)?,
                "d" | "debug" if app.command.debug => {
                    writeln!(self.output, "{}", form.command_line())?
                }
                "e" | "edit" => {
                    if !self.fill(&mut form)? {
                        return Ok(());
                    }
                }
                "q" | "quit" => return Ok(()),
                "" => {}
                other => writeln!(self.output, "unknown action '{}'", other)?,
            }
        }
    }

    /// Prompt for every item in order. Returns `false` when input ran out.
    fn fill(&mut self, form: &mut Form) -> io::Result<bool> {
        let items = form.app().items.clone();
        for item in &items {
            match item {
                Item::Label(text) => writeln!(self.output, "{}", text)?,
                Item::Field(field) => {
                    if !self.prompt_field(form, field)? {
                        return Ok(false);
                    }
                }
            }
        }
        Ok(true)
    }

    fn prompt_field(&mut self, form: &mut Form, field: &Field) -> io::Result<bool> {
        if !form.is_enabled(&field.name) {
            writeln!(self.output, "{}: (disabled)", field.display_label())?;
            return Ok(true);
        }

        if !field.description.is_empty() {
            writeln!(self.output, "  # {}", field.description)?;
        }
        if field.field_type == FieldType::Choice && !field.multi {
            let listed: Vec<String> = field
                .choices
                .iter()
                .enumerate()
                .map(|(i, c)| format!("{}) {}", i + 1, c))
                .collect();
            writeln!(self.output, "  {}", listed.join("  "))?;
        }

        loop {
            let prompt = field_prompt(form, field);
            let Some(line) = self.prompt(&prompt)? else {
                return Ok(false);
            };
            // Empty input keeps the current value.
            if line.is_empty() {
                return Ok(true);
            }
            if is_browse_request(form, field, &line) {
                self.browse(form, field)?;
                continue;
            }
            match parse_answer(field, &line) {
                Ok(value) => {
                    form.set_value(&field.name, value);
                    return Ok(true);
                }
                Err(message) => writeln!(self.output, "  {}", message)?,
            }
        }
    }

    /// List what a picker would offer, starting from the field's current value.
    fn browse(&mut self, form: &Form, field: &Field) -> io::Result<()> {
        let current = form.value(&field.name).unwrap_or_default();
        let dir = browse_dir(&current);
        let entries = match list_entries(&dir, field.picker) {
            Ok(entries) => entries,
            Err(e) => return writeln!(self.output, "  cannot list {}: {}", dir.display(), e),
        };

        writeln!(self.output, "  in {}:", dir.display())?;
        if entries.is_empty() {
            writeln!(self.output, "  (empty)")?;
        }
        for entry in entries {
            writeln!(self.output, "  {}", entry)?;
        }
        Ok(())
    }

    fn print_actions(&mut self, app: &App) -> io::Result<()> {
        let command = &app.command;
        let mut actions = vec![format!(
            "[r] {}",
            action_label(command.run_label(), command.run_importance())
        )];
        if command.debug {
            actions.push(format!(
                "[d] {}",
                action_label(command.debug_label(), command.debug_importance())
            ));
        }
        actions.push("[e] Edit".to_string());
        actions.push("[q] Quit".to_string());
        writeln!(self.output, "{}", actions.join("  "))
    }

    fn submit<P: ProcessRunner>(&mut self, form: &Form, runner: &mut P) -> io::Result<()> {
        let command = &form.app().command;
        match form.submit(runner) {
            Ok(RunOutcome::Captured(text)) => self.print_output(&text),
            Ok(RunOutcome::Streamed(buffer)) => writeln!(
                self.output,
                "--- finished, {} lines ---",
                buffer.total()
            ),
            Ok(RunOutcome::Console) => Ok(()),
            Ok(RunOutcome::Detached { pid }) => {
                writeln!(self.output, "started '{}' (pid {})", command.path, pid)
            }
            Err(SubmitError::Validation(err)) => writeln!(self.output, "Error: {}", err),
            Err(SubmitError::Runner(err)) => {
                // Streamed and console output has already been shown.
                if let RunnerError::Exited { output, .. } = &err
                    && command.output == OutputMode::Dialog
                    && !output.is_empty()
                {
                    self.print_output(output)?;
                }
                writeln!(self.output, "Error: {}", err)
            }
        }
    }

    fn print_output(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "--- output ---")?;
        write!(self.output, "{}", text)?;
        if !text.is_empty() && !text.ends_with('\n') {
            writeln!(self.output)?;
        }
        writeln!(self.output, "--- end ---")
    }

    /// Print `prompt` and read one line without its terminator.
    fn prompt(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}

/// Whether `line` names an enabled browse control of the field's binding.
fn is_browse_request(form: &Form, field: &Field, line: &str) -> bool {
    form.binding(&field.name).is_some_and(|binding| {
        binding
            .auxiliary_controls()
            .iter()
            .any(|aux| aux.is_enabled() && aux.label == line)
    })
}

/// The current value when it is a directory, else its parent, else `.`.
fn browse_dir(current: &str) -> PathBuf {
    let path = Path::new(current);
    if current.is_empty() {
        return PathBuf::from(".");
    }
    if path.is_dir() {
        return path.to_path_buf();
    }
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Sorted entry names of `dir`; directories end with `/`. Directory pickers
/// only see directories.
fn list_entries(dir: &Path, picker: Option<PickerKind>) -> io::Result<Vec<String>> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        if picker == Some(PickerKind::Directory) && !is_dir {
            continue;
        }
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if is_dir {
            name.push('/');
        }
        entries.push(name);
    }
    entries.sort();
    Ok(entries)
}

fn app_name(app: &App) -> &str {
    if app.command.name.is_empty() {
        &app.command.path
    } else {
        &app.command.name
    }
}

fn action_label(label: &str, importance: Importance) -> String {
    match importance {
        Importance::Medium => label.to_string(),
        other => format!("{} ({})", label, other.as_str()),
    }
}

/// `Label* (hint) [current]: ` with the placeholder standing in for an empty value.
fn field_prompt(form: &Form, field: &Field) -> String {
    let mut prompt = field.display_label().to_string();
    if field.required {
        prompt.push('*');
    }
    if let Some(hint) = hint(field) {
        prompt.push_str(&format!(" ({})", hint));
    }

    let current = form
        .binding(&field.name)
        .map(|b| render_value(&b.value()))
        .unwrap_or_default();
    if !current.is_empty() {
        prompt.push_str(&format!(" [{}]", current));
    } else if !field.placeholder.is_empty() {
        prompt.push_str(&format!(" <{}>", field.placeholder));
    }
    prompt.push_str(": ");
    prompt
}
