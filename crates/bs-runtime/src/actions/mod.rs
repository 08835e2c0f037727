//! Built-in action definitions, grouped by category.

use bs_core::{BsValue, ScriptError};

use crate::context::ActionContext;
use crate::definition::ActionDefinition;

mod control;
mod dictionaries;
mod files;
mod lists;
mod numbers;
mod texts;
mod variables;
mod visuals;

pub fn builtin_actions() -> Vec<ActionDefinition> {
    let mut actions = Vec::new();
    actions.extend(visuals::definitions());
    actions.extend(variables::definitions());
    actions.extend(numbers::definitions());
    actions.extend(texts::definitions());
    actions.extend(lists::definitions());
    actions.extend(dictionaries::definitions());
    actions.extend(control::definitions());
    actions.extend(files::definitions());
    actions
}

/// Texts of a plural parameter joined with `separator`.
pub(crate) fn joined_texts(
    context: &ActionContext<'_>,
    parameter: &str,
    separator: &str,
) -> String {
    context
        .values(parameter)
        .iter()
        .map(BsValue::as_text)
        .collect::<Vec<_>>()
        .join(separator)
}

/// Converts a 1-based script index into a position inside `len` items.
pub(crate) fn list_position(index: f64, len: usize) -> Option<usize> {
    let index = index.trunc();
    if index < 1.0 || index > len as f64 {
        return None;
    }
    Some(index as usize - 1)
}

pub(crate) fn whole_number(value: f64, parameter: &str) -> Result<i64, ScriptError> {
    if !value.is_finite() {
        return Err(ScriptError::new(
            "ACTION_NUMBER_OUT_OF_RANGE",
            format!("\"{}\" must be a finite number.", parameter),
        ));
    }
    Ok(value.trunc() as i64)
}
