use bs_core::{ArgKind, BsValue};

use crate::actions::list_position;
use crate::definition::{ActionCategory, ActionDefinition, Parameter};

fn list_check(id: &str, name: &str, description: &str, expect_found: bool) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon("bookshelf")
        .category(ActionCategory::Lists)
        .arg(Parameter::new("List", ArgKind::List))
        .arg(Parameter::new("Value", ArgKind::Any))
        .opens_block()
        .effect(move |ctx| {
            let needle = ctx.value("Value")?;
            let found = ctx
                .list("List")?
                .iter()
                .any(|value| value.value_equals(&needle));
            if found == expect_found {
                ctx.schedule_inner();
            }
            Ok(())
        })
        .build()
}

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("create_list", "Create List")
            .description("Creates a new list.")
            .icon("ender_chest")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Variable", ArgKind::Variable))
            .arg(Parameter::new("Values", ArgKind::Any).plural().optional())
            .effect(|ctx| {
                let values = ctx.values("Values");
                ctx.assign("Variable", BsValue::List(values))
            })
            .build(),
        ActionDefinition::builder("append_value", "Append Value")
            .description("Appends values to a list.")
            .icon("furnace")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("List", ArgKind::Variable))
            .arg(Parameter::new("Values", ArgKind::Any).plural())
            .effect(|ctx| {
                let mut list = ctx.list("List")?;
                list.extend(ctx.values("Values"));
                ctx.assign("List", BsValue::List(list))
            })
            .build(),
        ActionDefinition::builder("append_list_values", "Append List Values")
            .description("Appends one list's contents to another.")
            .icon("blast_furnace")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Base List", ArgKind::Variable))
            .arg(Parameter::new("Other List", ArgKind::List))
            .effect(|ctx| {
                let mut list = ctx.list("Base List")?;
                list.extend(ctx.list("Other List")?);
                ctx.assign("Base List", BsValue::List(list))
            })
            .build(),
        ActionDefinition::builder("get_list_value", "Get List Value")
            .description("Gets a value from a list.")
            .icon("book")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("List", ArgKind::List))
            .arg(Parameter::new("Index", ArgKind::Number))
            .effect(|ctx| {
                let list = ctx.list("List")?;
                let value = list_position(ctx.number("Index")?, list.len())
                    .map(|position| list[position].clone())
                    .unwrap_or_default();
                ctx.assign("Result", value)
            })
            .build(),
        ActionDefinition::builder("set_list_value", "Set List Value")
            .description("Sets a value in a list.")
            .icon("writable_book")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("List", ArgKind::Variable))
            .arg(Parameter::new("Index", ArgKind::Number))
            .arg(Parameter::new("Value", ArgKind::Any))
            .effect(|ctx| {
                let mut list = ctx.list("List")?;
                let Some(position) = list_position(ctx.number("Index")?, list.len()) else {
                    return Ok(());
                };
                list[position] = ctx.value("Value")?;
                ctx.assign("List", BsValue::List(list))
            })
            .build(),
        ActionDefinition::builder("remove_list_value_at", "Remove List Value At Index")
            .description("Removes the value at an index from a list.")
            .icon("tnt")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("List", ArgKind::Variable))
            .arg(Parameter::new("Index", ArgKind::Number))
            .effect(|ctx| {
                let mut list = ctx.list("List")?;
                let Some(position) = list_position(ctx.number("Index")?, list.len()) else {
                    return Ok(());
                };
                list.remove(position);
                ctx.assign("List", BsValue::List(list))
            })
            .build(),
        ActionDefinition::builder("remove_list_value", "Remove List Value")
            .description("Removes every occurrence of a value from a list.")
            .icon("tnt_minecart")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("List", ArgKind::Variable))
            .arg(Parameter::new("Value", ArgKind::Any))
            .effect(|ctx| {
                let needle = ctx.value("Value")?;
                let mut list = ctx.list("List")?;
                list.retain(|value| !value.value_equals(&needle));
                ctx.assign("List", BsValue::List(list))
            })
            .build(),
        ActionDefinition::builder("list_length", "List Length")
            .description("Gets the length of a list.")
            .icon("bookshelf")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("List", ArgKind::List))
            .effect(|ctx| {
                let length = ctx.list("List")?.len();
                ctx.assign("Result", BsValue::Number(length as f64))
            })
            .build(),
        ActionDefinition::builder("join_list_to_text", "Join List To Text")
            .description("Joins a list into a single text.")
            .icon("slime_ball")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("List", ArgKind::List))
            .arg(Parameter::new("Separator", ArgKind::Text).optional())
            .effect(|ctx| {
                let separator = ctx
                    .optional_value("Separator")
                    .map_or_else(|| ", ".to_string(), |value| value.as_text());
                let joined = ctx
                    .list("List")?
                    .iter()
                    .map(BsValue::as_text)
                    .collect::<Vec<_>>()
                    .join(&separator);
                ctx.assign("Result", BsValue::Text(joined))
            })
            .build(),
        list_check(
            "if_list_contains",
            "If List Contains",
            "Checks if a list contains a value.",
            true,
        ),
        list_check(
            "if_list_doesnt_contain",
            "If List Doesnt Contain",
            "Checks if a list doesn't contain a value.",
            false,
        ),
        ActionDefinition::builder("for_each_in_list", "For Each In List")
            .description("Iterates over a list.")
            .icon("bookshelf")
            .category(ActionCategory::Lists)
            .arg(Parameter::new("Variable", ArgKind::Variable))
            .arg(Parameter::new("List", ArgKind::List))
            .opens_block()
            .effect(|ctx| {
                let variable = ctx.variable("Variable")?;
                for item in ctx.list("List")? {
                    let variable = variable.clone();
                    ctx.schedule_inner_with(move |scope| scope.set(&variable, item));
                }
                Ok(())
            })
            .build(),
    ]
}
