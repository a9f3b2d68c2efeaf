use crate::binding::{BindingRegistry, BoundValue, MemoryBinding};
use crate::rules::Condition;
use crate::schema::{App, CommandSpec, Field, FieldType, Item};

pub(crate) fn app(items: Vec<Item>) -> App {
    app_with_args(&[], items)
}

pub(crate) fn app_with_args(args: &[&str], items: Vec<Item>) -> App {
    App {
        command: CommandSpec {
            path: "cmd".to_string(),
            args: args.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        },
        items,
    }
}

pub(crate) fn label(text: &str) -> Item {
    Item::Label(text.to_string())
}

pub(crate) fn item(field: Field) -> Item {
    Item::Field(Box::new(field))
}

pub(crate) fn field(name: &str, field_type: FieldType) -> Field {
    Field::new(name, field_type)
}

pub(crate) fn conditional(name: &str, field_type: FieldType, condition: &str) -> Field {
    Field {
        condition: Some(Condition::parse(condition)),
        ..Field::new(name, field_type)
    }
}

pub(crate) fn set(registry: &mut BindingRegistry<MemoryBinding>, name: &str, value: BoundValue) {
    registry
        .get_mut(name)
        .unwrap_or_else(|| panic!("no binding for '{}'", name))
        .set(value);
}

pub(crate) fn text(value: &str) -> BoundValue {
    BoundValue::Text(value.to_string())
}

pub(crate) fn selected(value: &str) -> BoundValue {
    BoundValue::Selected(Some(value.to_string()))
}

pub(crate) fn entries(values: &[&str]) -> BoundValue {
    BoundValue::Entries(values.iter().map(|s| s.to_string()).collect())
}
