use std::collections::BTreeMap;

use bs_core::{ArgKind, BsValue};

use crate::definition::{ActionCategory, ActionDefinition, Parameter};

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("create_dictionary", "Create Dictionary")
            .description("Creates a new dictionary.")
            .icon("ender_chest")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Keys", ArgKind::List).optional())
            .arg(Parameter::new("Values", ArgKind::List).optional())
            .effect(|ctx| {
                let mut dictionary = BTreeMap::new();
                if ctx.has("Keys") && ctx.has("Values") {
                    let keys = ctx.list("Keys")?;
                    let values = ctx.list("Values")?;
                    for (key, value) in keys.iter().zip(values) {
                        dictionary.insert(key.as_text(), value);
                    }
                }
                ctx.assign("Result", BsValue::Dictionary(dictionary))
            })
            .build(),
        ActionDefinition::builder("get_dictionary_value", "Get Dictionary Value")
            .description("Gets a value from a dictionary.")
            .icon("book")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Dictionary", ArgKind::Dictionary))
            .arg(Parameter::new("Key", ArgKind::Text))
            .effect(|ctx| {
                let key = ctx.text("Key")?;
                let value = ctx
                    .dictionary("Dictionary")?
                    .remove(&key)
                    .unwrap_or_default();
                ctx.assign("Result", value)
            })
            .build(),
        ActionDefinition::builder("set_dictionary_value", "Set Dictionary Value")
            .description("Sets a value in a dictionary.")
            .icon("writable_book")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Dictionary", ArgKind::Variable))
            .arg(Parameter::new("Key", ArgKind::Text))
            .arg(Parameter::new("Value", ArgKind::Any))
            .effect(|ctx| {
                let mut dictionary = ctx.dictionary("Dictionary")?;
                dictionary.insert(ctx.text("Key")?, ctx.value("Value")?);
                ctx.assign("Dictionary", BsValue::Dictionary(dictionary))
            })
            .build(),
        ActionDefinition::builder("get_dictionary_size", "Get Dictionary Size")
            .description("Gets the size of a dictionary.")
            .icon("bookshelf")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Dictionary", ArgKind::Dictionary))
            .effect(|ctx| {
                let size = ctx.dictionary("Dictionary")?.len();
                ctx.assign("Result", BsValue::Number(size as f64))
            })
            .build(),
        ActionDefinition::builder("remove_dictionary_entry", "Remove Dictionary Entry")
            .description("Removes a key from a dictionary.")
            .icon("tnt")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Dictionary", ArgKind::Variable))
            .arg(Parameter::new("Key", ArgKind::Text))
            .effect(|ctx| {
                let mut dictionary = ctx.dictionary("Dictionary")?;
                dictionary.remove(&ctx.text("Key")?);
                ctx.assign("Dictionary", BsValue::Dictionary(dictionary))
            })
            .build(),
        ActionDefinition::builder("if_dictionary_key_exists", "If Dictionary Key Exists")
            .description("Checks if a key exists in a dictionary.")
            .icon("book")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Dictionary", ArgKind::Dictionary))
            .arg(Parameter::new("Key", ArgKind::Text))
            .opens_block()
            .effect(|ctx| {
                if ctx.dictionary("Dictionary")?.contains_key(&ctx.text("Key")?) {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("for_each_in_dictionary", "For Each In Dictionary")
            .description("Iterates over a dictionary in key order.")
            .icon("bookshelf")
            .category(ActionCategory::Dictionaries)
            .arg(Parameter::new("Key", ArgKind::Variable))
            .arg(Parameter::new("Value", ArgKind::Variable))
            .arg(Parameter::new("Dictionary", ArgKind::Dictionary))
            .opens_block()
            .effect(|ctx| {
                let key_variable = ctx.variable("Key")?;
                let value_variable = ctx.variable("Value")?;
                for (key, value) in ctx.dictionary("Dictionary")? {
                    let key_variable = key_variable.clone();
                    let value_variable = value_variable.clone();
                    ctx.schedule_inner_with(move |scope| {
                        scope.set(&key_variable, BsValue::Text(key));
                        scope.set(&value_variable, value);
                    });
                }
                Ok(())
            })
            .build(),
    ]
}
