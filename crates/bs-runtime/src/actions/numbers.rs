use bs_core::{ArgKind, BsValue, ScriptError};

use crate::actions::whole_number;
use crate::context::ActionContext;
use crate::definition::{ActionCategory, ActionDefinition, Parameter};

/// Upper bound on queued runs for a single repeat.
pub const MAX_REPEAT: i64 = 1_000_000;

fn numbers(ctx: &ActionContext<'_>, parameter: &str) -> Result<Vec<f64>, ScriptError> {
    ctx.values(parameter)
        .iter()
        .map(BsValue::as_number)
        .collect()
}

/// First number, then every following number applied with `apply`.
fn fold_numbers(
    ctx: &mut ActionContext<'_>,
    apply: fn(f64, f64) -> f64,
) -> Result<(), ScriptError> {
    let values = numbers(ctx, "Numbers")?;
    let result = values
        .iter()
        .copied()
        .reduce(apply)
        .unwrap_or_default();
    ctx.assign("Result", BsValue::Number(result))
}

fn unary(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    apply: fn(f64) -> f64,
) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon(icon)
        .category(ActionCategory::Numbers)
        .arg(Parameter::new("Result", ArgKind::Variable))
        .arg(Parameter::new("Number", ArgKind::Number))
        .effect(move |ctx| {
            let number = ctx.number("Number")?;
            ctx.assign("Result", BsValue::Number(apply(number)))
        })
        .build()
}

fn comparison(
    id: &str,
    name: &str,
    description: &str,
    test: fn(f64, f64) -> bool,
) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon("brick")
        .category(ActionCategory::Numbers)
        .arg(Parameter::new("Value", ArgKind::Number))
        .arg(Parameter::new("Other", ArgKind::Number))
        .opens_block()
        .effect(move |ctx| {
            if test(ctx.number("Value")?, ctx.number("Other")?) {
                ctx.schedule_inner();
            }
            Ok(())
        })
        .build()
}

fn arithmetic(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    apply: fn(f64, f64) -> f64,
) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon(icon)
        .category(ActionCategory::Numbers)
        .arg(Parameter::new("Result", ArgKind::Variable))
        .arg(Parameter::new("Numbers", ArgKind::Number).plural())
        .effect(move |ctx| fold_numbers(ctx, apply))
        .build()
}

fn adjust(id: &str, name: &str, description: &str, icon: &str, sign: f64) -> ActionDefinition {
    ActionDefinition::builder(id, name)
        .description(description)
        .icon(icon)
        .category(ActionCategory::Numbers)
        .arg(Parameter::new("Variable", ArgKind::Variable))
        .arg(Parameter::new("Amount", ArgKind::Number).plural())
        .effect(move |ctx| {
            let current = ctx.value("Variable")?.as_number()?;
            let total = numbers(ctx, "Amount")?.iter().sum::<f64>();
            ctx.assign("Variable", BsValue::Number(current + sign * total))
        })
        .build()
}

pub(super) fn definitions() -> Vec<ActionDefinition> {
    vec![
        adjust(
            "increment",
            "Increment",
            "Increments a variable by a value.",
            "glowstone_dust",
            1.0,
        ),
        adjust("decrement", "Decrement", "Decrements a variable by a value.", "redstone", -1.0),
        arithmetic(
            "add",
            "Add",
            "Sets a variable to the sum of the number(s).",
            "brick",
            |a, b| a + b,
        ),
        arithmetic(
            "subtract",
            "Subtract",
            "Sets a variable to the difference of the number(s).",
            "nether_brick",
            |a, b| a - b,
        ),
        arithmetic(
            "multiply",
            "Multiply",
            "Sets a variable to the product of the number(s).",
            "bricks",
            |a, b| a * b,
        ),
        arithmetic(
            "divide",
            "Divide",
            "Sets a variable to the quotient of the number(s).",
            "nether_bricks",
            |a, b| a / b,
        ),
        ActionDefinition::builder("modulo", "Modulo")
            .description("Sets a variable to the remainder of the numbers.")
            .icon("nether_wart")
            .category(ActionCategory::Numbers)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Dividend", ArgKind::Number))
            .arg(Parameter::new("Divisor", ArgKind::Number))
            .effect(|ctx| {
                let remainder = ctx.number("Dividend")? % ctx.number("Divisor")?;
                ctx.assign("Result", BsValue::Number(remainder))
            })
            .build(),
        unary("round_number", "Round Number", "Rounds a number.", "slime_ball", |n| {
            (n + 0.5).floor()
        }),
        unary("floor_number", "Floor Number", "Rounds a number down.", "magma_cream", f64::floor),
        unary("ceil_number", "Ceil Number", "Rounds a number up.", "honeycomb", f64::ceil),
        ActionDefinition::builder("parse_number", "Parse Number")
            .description("Parses a number from a text.")
            .icon("anvil")
            .category(ActionCategory::Numbers)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Text", ArgKind::Text))
            .effect(|ctx| {
                let parsed = BsValue::Text(ctx.text("Text")?)
                    .as_number()
                    .map(BsValue::Number)
                    .unwrap_or(BsValue::Unknown);
                ctx.assign("Result", parsed)
            })
            .build(),
        ActionDefinition::builder("random_number", "Random Number")
            .description("Generates a random number between two other numbers.")
            .icon("hopper")
            .category(ActionCategory::Numbers)
            .arg(Parameter::new("Result", ArgKind::Variable))
            .arg(Parameter::new("Min", ArgKind::Number))
            .arg(Parameter::new("Max", ArgKind::Number))
            .effect(|ctx| {
                let min = ctx.number("Min")?;
                let max = ctx.number("Max")?;
                let sample = ctx.services().next_random_unit();
                ctx.assign("Result", BsValue::Number(sample * (max - min) + min))
            })
            .build(),
        comparison(
            "if_greater",
            "If Greater",
            "Checks if a number is greater than another.",
            |a, b| a > b,
        ),
        comparison(
            "if_greater_equals",
            "If Greater Equals",
            "Checks if a number is greater than or equal to another.",
            |a, b| a >= b,
        ),
        comparison("if_less", "If Less", "Checks if a number is less than another.", |a, b| a < b),
        comparison(
            "if_less_equals",
            "If Less Equals",
            "Checks if a number is less than or equal to another.",
            |a, b| a <= b,
        ),
        ActionDefinition::builder("repeat_multiple", "Repeat Multiple")
            .description("Repeats a specified amount of times.")
            .icon("redstone")
            .category(ActionCategory::Numbers)
            .arg(Parameter::new("Times", ArgKind::Number))
            .arg(Parameter::new("Current", ArgKind::Variable).optional())
            .opens_block()
            .effect(|ctx| {
                let times = whole_number(ctx.number("Times")?, "Times")?;
                if times > MAX_REPEAT {
                    return Err(ScriptError::new(
                        "ACTION_NUMBER_OUT_OF_RANGE",
                        format!("Cannot repeat more than {} times.", MAX_REPEAT),
                    ));
                }
                let current = if ctx.has("Current") {
                    Some(ctx.variable("Current")?)
                } else {
                    None
                };
                for iteration in 1..=times.max(0) {
                    match &current {
                        Some(name) => {
                            let name = name.clone();
                            ctx.schedule_inner_with(move |scope| {
                                scope.set(&name, BsValue::Number(iteration as f64));
                            });
                        }
                        None => ctx.schedule_inner(),
                    }
                }
                Ok(())
            })
            .build(),
    ]
}
