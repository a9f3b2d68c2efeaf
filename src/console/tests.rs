//! Scripted console sessions.

use super::Console;
use crate::error::RunnerError;
use crate::runner::{ProcessRunner, RunOutcome, RunRequest};
use crate::schema::Schema;

#[derive(Default)]
struct FakeRunner {
    requests: Vec<RunRequest>,
    result: Option<RunnerError>,
}

impl ProcessRunner for FakeRunner {
    fn run(&mut self, request: &RunRequest) -> Result<RunOutcome, RunnerError> {
        self.requests.push(request.clone());
        match self.result.take() {
            Some(err) => Err(err),
            None => Ok(RunOutcome::Captured("ran\n".to_string())),
        }
    }
}

fn session(schema: &str, script: &str) -> (String, FakeRunner) {
    let mut runner = FakeRunner::default();
    let output = session_with(schema, script, &mut runner);
    (output, runner)
}

fn session_with(schema: &str, script: &str, runner: &mut FakeRunner) -> String {
    let schema = Schema::from_toml(schema).unwrap();
    let mut console = Console::new(script.as_bytes(), Vec::new());
    console.run(&schema, runner).unwrap();
    String::from_utf8(console.output).unwrap()
}

const ECHO: &str = r#"
[[apps]]
[apps.command]
path = "echo"
name = "Echo"
args = ["hello"]
debug = true
run_text = "Execute"
run_color = "high"
debug_text = "Preview"

[[apps.items]]
text = "Say something"

[[apps.items]]
name = "msg"
label = "Message"
default = "world"
"#;

#[test]
fn test_defaults_are_kept_on_empty_input() {
    let (output, runner) = session(ECHO, "\nr\nq\n");

    assert!(output.starts_with("== Echo ==\n"));
    assert!(output.contains("Say something\n"));
    assert!(output.contains("Message [world]: "));
    assert_eq!(runner.requests.len(), 1);
    assert_eq!(runner.requests[0].program, "echo");
    assert_eq!(runner.requests[0].args, vec!["hello", "--msg=world"]);
    assert!(output.contains("--- output ---\nran\n--- end ---"));
}

#[test]
fn test_typed_value_replaces_default() {
    let (_, runner) = session(ECHO, "there\nr\nq\n");
    assert_eq!(runner.requests[0].args, vec!["hello", "--msg=there"]);
}

#[test]
fn test_action_menu_uses_configured_labels() {
    let (output, _) = session(ECHO, "\nq\n");
    assert!(output.contains("[r] Execute (high)  [d] Preview  [e] Edit  [q] Quit"));
}

#[test]
fn test_preview_prints_command_line() {
    let (output, runner) = session(ECHO, "two words\nd\nq\n");

    let quote = if cfg!(windows) { '"' } else { '\'' };
    assert!(output.contains(&format!("echo hello {q}--msg=two words{q}\n", q = quote)));
    assert!(runner.requests.is_empty());
}

#[test]
fn test_preview_unavailable_without_debug() {
    let schema = "[[apps]]\n[apps.command]\npath = \"echo\"\n";
    let (output, _) = session(schema, "d\nq\n");

    assert!(!output.contains("[d]"));
    assert!(output.contains("unknown action 'd'"));
}

#[test]
fn test_edit_prompts_again() {
    let (_, runner) = session(ECHO, "first\ne\nsecond\nr\nq\n");
    assert_eq!(runner.requests[0].args, vec!["hello", "--msg=second"]);
}

#[test]
fn test_dash_clears_value() {
    let (_, runner) = session(ECHO, "-\nr\nq\n");
    assert_eq!(runner.requests[0].args, vec!["hello"]);
}

const MODES: &str = r#"
[[apps]]
[apps.command]
path = "tool"

[[apps.items]]
name = "mode"
type = "choice"
choices = ["simple", "advanced"]
default = "simple"

[[apps.items]]
name = "extra"
condition = "mode=advanced"
"#;

#[test]
fn test_disabled_field_is_skipped() {
    let (output, runner) = session(MODES, "\nr\nq\n");

    assert!(output.contains("  1) simple  2) advanced\n"));
    assert!(output.contains("extra: (disabled)\n"));
    assert_eq!(runner.requests[0].args, vec!["--mode=simple"]);
}

#[test]
fn test_choice_enables_dependent_field() {
    let (output, runner) = session(MODES, "2\nx\nr\nq\n");

    assert!(!output.contains("(disabled)"));
    assert_eq!(runner.requests[0].args, vec!["--mode=advanced", "--extra=x"]);
}

#[test]
fn test_invalid_answer_asks_again() {
    let schema = r#"
[[apps]]
[apps.command]
path = "tool"

[[apps.items]]
name = "verbose"
type = "bool"
"#;
    let (output, runner) = session(schema, "maybe\ny\nr\nq\n");

    assert!(output.contains("  answer y or n\n"));
    assert_eq!(output.matches("verbose (y/n) [n]: ").count(), 2);
    assert_eq!(runner.requests[0].args, vec!["--verbose"]);
}

#[test]
fn test_multi_field_input_is_split() {
    let schema = r#"
[[apps]]
[apps.command]
path = "curl"

[[apps.items]]
name = "H"
short = true
multi = true
separator = " "
"#;
    let (_, runner) = session(schema, "'X-A: 1' X-B\nr\nq\n");
    assert_eq!(runner.requests[0].args, vec!["-H", "X-A: 1", "-H", "X-B"]);
}

#[test]
fn test_validation_error_is_reported_and_nothing_runs() {
    let schema = r#"
[[apps]]
[apps.command]
path = "tool"

[[apps.items]]
name = "name"
label = "Name"
required = true
placeholder = "your name"
"#;
    let (output, runner) = session(schema, "\nr\nq\n");

    assert!(output.contains("Name* <your name>: "));
    assert!(output.contains("Error: Name is required\n"));
    assert!(runner.requests.is_empty());
}

#[test]
fn test_runner_failure_shows_output_and_keeps_session() {
    let mut runner = FakeRunner {
        result: Some(RunnerError::Exited {
            program: "echo".to_string(),
            code: Some(2),
            output: "bad input".to_string(),
        }),
        ..Default::default()
    };
    let output = session_with(ECHO, "\nr\nr\nq\n", &mut runner);

    assert!(output.contains("--- output ---\nbad input\n--- end ---\n"));
    assert!(output.contains("Error: 'echo' exited with exit code 2\n"));
    assert_eq!(runner.requests.len(), 2);
}

#[test]
fn test_end_of_input_ends_session() {
    let (output, runner) = session(ECHO, "");

    assert!(output.ends_with("Message [world]: "));
    assert!(runner.requests.is_empty());
}

const TWO_APPS: &str = r#"
title = "Toolbox"

[[apps]]
[apps.command]
path = "a"
name = "Alpha"

[[apps]]
[apps.command]
path = "b"

[[apps.items]]
name = "flag"
type = "bool"
"#;

#[test]
fn test_app_selection() {
    let (output, runner) = session(TWO_APPS, "3\n2\ny\nr\nq\nq\n");

    assert!(output.starts_with("== Toolbox ==\n"));
    assert!(output.contains("  1) Alpha\n  2) b\n"));
    assert!(output.contains("invalid selection '3'"));
    assert!(output.contains("-- b --"));
    assert_eq!(runner.requests.len(), 1);
    assert_eq!(runner.requests[0].program, "b");
    assert_eq!(runner.requests[0].args, vec!["--flag"]);
}

#[test]
fn test_quitting_app_returns_to_selection() {
    let (output, runner) = session(TWO_APPS, "1\nq\n1\nr\nq\nq\n");

    assert_eq!(output.matches("-- Alpha --").count(), 2);
    assert_eq!(runner.requests.len(), 1);
    assert_eq!(runner.requests[0].program, "a");
}

fn picker_schema(picker: &str, default: &std::path::Path) -> String {
    format!(
        r#"
[[apps]]
[apps.command]
path = "tool"

[[apps.items]]
name = "target"
picker = "{}"
picker_text = "Browse"
default = '{}'
"#,
        picker,
        default.display()
    )
}

#[test]
fn test_picker_browse_lists_entries() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("b.txt"), "").unwrap();
    std::fs::create_dir(dir.path().join("a")).unwrap();
    let file = dir.path().join("b.txt");

    let (output, runner) = session(&picker_schema("file", &file), "Browse\n\nr\nq\n");

    assert!(output.contains("target (file path, Browse to browse)"));
    assert!(output.contains(&format!("  in {}:\n  a/\n  b.txt\n", dir.path().display())));
    assert_eq!(output.matches("target (file path").count(), 2);
    assert_eq!(
        runner.requests[0].args,
        vec![format!("--target={}", file.display())]
    );
}

#[test]
fn test_directory_picker_lists_only_directories() {
    let dir = tempfile::TempDir::new().unwrap();
    std::fs::write(dir.path().join("notes.txt"), "").unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();

    let (output, _) = session(&picker_schema("directory", dir.path()), "Browse\n\nq\n");

    assert!(output.contains("  sub/\n"));
    assert!(!output.contains("notes.txt"));
}
