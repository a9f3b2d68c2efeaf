//! Argument vector construction and command-line preview.
//!
//! Arguments start with the command's static `args`, followed by one group of
//! tokens per enabled field in declaration order.

use super::condition::evaluate;
use super::extract::{extract_value, extract_values};
use crate::binding::{BindingRegistry, FieldBinding};
use crate::schema::{App, Field, FieldType, Separator};

/// Build the argument vector for `app` from the current binding state.
///
/// Labels, fields without a binding, and fields whose condition does not
/// hold contribute nothing.
pub fn build_args<B: FieldBinding>(app: &App, registry: &BindingRegistry<B>) -> Vec<String> {
    let mut args = app.command.args.clone();

    for field in app.fields() {
        let Some(binding) = registry.get(&field.name) else {
            continue;
        };
        if !evaluate(field, app, registry) {
            continue;
        }

        if field.multi {
            for value in extract_values(field, binding) {
                push_flag(&mut args, field, &value);
            }
            continue;
        }

        let value = extract_value(field, binding);
        if value.is_empty() {
            continue;
        }

        if field.positional {
            args.push(value);
        } else if field.field_type == FieldType::Bool {
            if value == "true" {
                args.push(format!("{}{}", field.prefix(), field.name));
            }
        } else {
            push_flag(&mut args, field, &value);
        }
    }

    tracing::debug!(command = %app.command.path, argc = args.len(), "built arguments");
    args
}

/// Append `value` under `field`'s flag according to its separator policy.
fn push_flag(args: &mut Vec<String>, field: &Field, value: &str) {
    let flag = format!("{}{}", field.prefix(), field.name);
    match &field.separator {
        Separator::Space => {
            args.push(flag);
            args.push(value.to_string());
        }
        Separator::Concat => args.push(format!("{}{}", flag, value)),
        Separator::Equals => args.push(format!("{}={}", flag, value)),
        Separator::Literal(sep) => args.push(format!("{}{}{}", flag, sep, value)),
    }
}

/// Quote character used when previewing a command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `"`; used where the native shell is cmd.
    Double,
    /// `'`; POSIX shells.
    Single,
}

impl QuoteStyle {
    pub fn native() -> Self {
        if cfg!(windows) {
            QuoteStyle::Double
        } else {
            QuoteStyle::Single
        }
    }

    fn quote_char(self) -> char {
        match self {
            QuoteStyle::Double => '"',
            QuoteStyle::Single => '\'',
        }
    }
}

/// Render `path` and `args` as a single line for display.
///
/// Tokens containing whitespace or a quote character are wrapped in the
/// style's quote character. The result is for preview only and is never
/// executed.
pub fn render_command_line(path: &str, args: &[String], style: QuoteStyle) -> String {
    let quote = style.quote_char();
    let mut line = path.to_string();
    for arg in args {
        line.push(' ');
        if arg.contains([' ', '\t', '\'', '"']) {
            line.push(quote);
            line.push_str(arg);
            line.push(quote);
        } else {
            line.push_str(arg);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::{BoundValue, MemoryBinding};
    use crate::schema::DefaultValue;
    use crate::test_support::*;

    fn args_for(app: &App, registry: &BindingRegistry<MemoryBinding>) -> Vec<String> {
        build_args(app, registry)
    }

    #[test]
    fn bool_and_string_fields() {
        let app = app_with_args(
            &["sub"],
            vec![
                item(field("flag", FieldType::Bool)),
                item(field("opt", FieldType::String)),
            ],
        );
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "flag", BoundValue::Checked(true));
        set(&mut registry, "opt", text("value"));

        assert_eq!(args_for(&app, &registry), vec!["sub", "--flag", "--opt=value"]);
    }

    #[test]
    fn short_flags_use_single_dash() {
        let mut v = field("v", FieldType::Bool);
        v.short = true;
        let mut o = field("o", FieldType::String);
        o.short = true;
        let app = app(vec![item(v), item(o)]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "v", BoundValue::Checked(true));
        set(&mut registry, "o", text("out.txt"));

        assert_eq!(args_for(&app, &registry), vec!["-v", "-o=out.txt"]);
    }

    #[test]
    fn positional_fields_emit_raw_values_in_order() {
        let mut url = field("url", FieldType::String);
        url.positional = true;
        let mut dir = field("dir", FieldType::String);
        dir.positional = true;
        dir.separator = Separator::Space;
        let app = app_with_args(&["clone"], vec![item(url), item(dir)]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "url", text("https://example.com/repo.git"));
        set(&mut registry, "dir", text("/tmp/repo"));

        assert_eq!(
            args_for(&app, &registry),
            vec!["clone", "https://example.com/repo.git", "/tmp/repo"]
        );
    }

    #[test]
    fn empty_positional_is_skipped() {
        let mut url = field("url", FieldType::String);
        url.positional = true;
        let app = app(vec![item(url)]);
        let registry = BindingRegistry::for_app(&app);

        assert!(args_for(&app, &registry).is_empty());
    }

    #[test]
    fn separator_policies() {
        let cases = [
            (Separator::Equals, vec!["--opt=val"]),
            (Separator::Space, vec!["--opt", "val"]),
            (Separator::Concat, vec!["--optval"]),
            (Separator::Literal(":".to_string()), vec!["--opt:val"]),
        ];
        for (separator, expected) in cases {
            let mut opt = field("opt", FieldType::String);
            opt.separator = separator.clone();
            let app = app(vec![item(opt)]);
            let mut registry = BindingRegistry::for_app(&app);
            set(&mut registry, "opt", text("val"));

            assert_eq!(args_for(&app, &registry), expected, "{:?}", separator);
        }
    }

    #[test]
    fn choice_uses_selection() {
        let mut format = field("format", FieldType::Choice);
        format.choices = vec!["json".to_string(), "yaml".to_string()];
        let app = app(vec![item(format)]);
        let mut registry = BindingRegistry::for_app(&app);
        assert!(args_for(&app, &registry).is_empty());

        set(&mut registry, "format", selected("yaml"));
        assert_eq!(args_for(&app, &registry), vec!["--format=yaml"]);
    }

    #[test]
    fn unchecked_bool_never_appears_even_with_true_default() {
        let mut flag = field("flag", FieldType::Bool);
        flag.default = Some(DefaultValue::Bool(true));
        let app = app(vec![item(flag)]);
        let mut registry = BindingRegistry::for_app(&app);
        assert_eq!(args_for(&app, &registry), vec!["--flag"]);

        set(&mut registry, "flag", BoundValue::Checked(false));
        assert!(args_for(&app, &registry).is_empty());
    }

    #[test]
    fn multi_field_emits_one_group_per_value() {
        let mut h = field("H", FieldType::String);
        h.multi = true;
        h.short = true;
        h.separator = Separator::Space;
        let app = app(vec![item(h)]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "H", entries(&["A", "", "B"]));

        assert_eq!(args_for(&app, &registry), vec!["-H", "A", "-H", "B"]);
    }

    #[test]
    fn multi_field_with_default_separator() {
        let mut tag = field("tag", FieldType::String);
        tag.multi = true;
        let app = app(vec![item(tag)]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "tag", entries(&["x", "y"]));

        assert_eq!(args_for(&app, &registry), vec!["--tag=x", "--tag=y"]);
    }

    #[test]
    fn quoted_value_is_unquoted_once() {
        let app = app(vec![item(field("msg", FieldType::String))]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "msg", text("\"hello world\""));

        assert_eq!(args_for(&app, &registry), vec!["--msg=hello world"]);
    }

    #[test]
    fn disabled_fields_are_skipped() {
        let app = app(vec![
            item(field("enable", FieldType::Bool)),
            item(conditional("level", FieldType::Number, "enable=true")),
        ]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "level", text("3"));
        assert!(args_for(&app, &registry).is_empty());

        set(&mut registry, "enable", BoundValue::Checked(true));
        assert_eq!(args_for(&app, &registry), vec!["--enable", "--level=3"]);
    }

    #[test]
    fn build_is_deterministic() {
        let app = app(vec![
            item(field("b", FieldType::String)),
            item(field("a", FieldType::String)),
        ]);
        let mut registry = BindingRegistry::for_app(&app);
        set(&mut registry, "a", text("1"));
        set(&mut registry, "b", text("2"));

        let first = args_for(&app, &registry);
        assert_eq!(first, vec!["--b=2", "--a=1"]);
        assert_eq!(first, args_for(&app, &registry));
    }

    #[test]
    fn render_quotes_tokens_with_spaces_or_quotes() {
        let args = vec![
            "--msg=hello world".to_string(),
            "plain".to_string(),
            "it's".to_string(),
            "tab\tbed".to_string(),
        ];
        assert_eq!(
            render_command_line("tool", &args, QuoteStyle::Single),
            "tool '--msg=hello world' plain 'it's' 'tab\tbed'"
        );
        assert_eq!(
            render_command_line("tool", &args[..2], QuoteStyle::Double),
            "tool \"--msg=hello world\" plain"
        );
    }

    #[test]
    fn render_without_args_is_just_the_path() {
        assert_eq!(render_command_line("tool", &[], QuoteStyle::native()), "tool");
    }
}
