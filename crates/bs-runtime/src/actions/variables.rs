use bs_core::ArgKind;

use crate::definition::{ActionCategory, ActionDefinition, Parameter};

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        ActionDefinition::builder("set_variable", "Set Variable")
            .description("Sets a variable to a value.")
            .icon("iron_ingot")
            .category(ActionCategory::Variables)
            .arg(Parameter::new("Variable", ArgKind::Variable))
            .arg(Parameter::new("Value", ArgKind::Any))
            .effect(|ctx| {
                let value = ctx.value("Value")?;
                ctx.assign("Variable", value)
            })
            .build(),
        ActionDefinition::builder("if_equals", "If Equals")
            .description("Checks if one value is equal to another.")
            .icon("iron_ingot")
            .category(ActionCategory::Variables)
            .arg(Parameter::new("Value", ArgKind::Any))
            .arg(Parameter::new("Other", ArgKind::Any))
            .opens_block()
            .effect(|ctx| {
                if ctx.value("Value")?.value_equals(&ctx.value("Other")?) {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
        ActionDefinition::builder("if_not_equals", "If Not Equals")
            .description("Checks if one value is not equal to another.")
            .icon("gold_ingot")
            .category(ActionCategory::Variables)
            .arg(Parameter::new("Value", ArgKind::Any))
            .arg(Parameter::new("Other", ArgKind::Any))
            .opens_block()
            .effect(|ctx| {
                if !ctx.value("Value")?.value_equals(&ctx.value("Other")?) {
                    ctx.schedule_inner();
                }
                Ok(())
            })
            .build(),
    ]
}
