use bs_core::{ArgToken, ScriptError};
use tracing::debug;

use crate::context::ActionContext;
use crate::definition::ActionDefinition;
use crate::host::Diagnostic;
use crate::resolver::resolve;

/// Resolves `tokens` and runs the action's effect.
///
/// Failures are reported as diagnostics before being returned, so callers
/// only use the error to decide how to advance.
pub fn dispatch(
    definition: &ActionDefinition,
    tokens: &[ArgToken],
    line: usize,
    context: &mut ActionContext<'_>,
) -> Result<(), ScriptError> {
    let result = resolve(definition, tokens).and_then(|binding| {
        debug!(
            task = %context.task_id(),
            script = context.script_name(),
            line,
            action = %definition.id,
            bound = binding.len(),
            "dispatch"
        );
        context.install_binding(binding);
        definition.invoke(context)
    });

    if let Err(error) = &result {
        context.services().report(Diagnostic {
            task: context.task_id(),
            script: context.script_name().to_string(),
            action: definition.name.clone(),
            line,
            error: ScriptError {
                line: Some(line),
                ..error.clone()
            },
        });
    }
    result
}
