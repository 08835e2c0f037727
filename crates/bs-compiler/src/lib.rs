use std::collections::BTreeMap;

use bs_core::{
    ActionShapeLookup, ArgToken, BlockRole, CompiledScript, Instruction, Program, ScriptError,
};
use serde::Deserialize;
use tracing::debug;

pub const SCRIPT_FILE_SUFFIX: &str = ".json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptDocument {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub handlers: Vec<HandlerDocument>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerDocument {
    pub event: String,
    #[serde(default)]
    pub actions: Vec<ActionLine>,
}

/// One line as written in a script document, before block matching.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionLine {
    pub action: String,
    #[serde(default)]
    pub args: Vec<ArgToken>,
}

pub fn parse_script_document(source: &str) -> Result<ScriptDocument, ScriptError> {
    serde_json::from_str(source).map_err(|error| {
        ScriptError::new(
            "COMPILE_JSON_INVALID",
            format!("Script document is not valid: {}", error),
        )
    })
}

pub fn compile_script(
    document: ScriptDocument,
    fallback_name: &str,
    lookup: &dyn ActionShapeLookup,
) -> Result<CompiledScript, ScriptError> {
    let name = document
        .name
        .filter(|name| !name.trim().is_empty())
        .unwrap_or_else(|| fallback_name.to_string());

    let handlers = document
        .handlers
        .iter()
        .map(|handler| compile_handler(&name, &handler.event, &handler.actions, lookup))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CompiledScript { name, handlers })
}

/// Flattens one handler's lines, pairing every block opener with its closer.
pub fn compile_handler(
    script: &str,
    event: &str,
    lines: &[ActionLine],
    lookup: &dyn ActionShapeLookup,
) -> Result<Program, ScriptError> {
    let mut instructions = Vec::with_capacity(lines.len());
    let mut open_blocks: Vec<usize> = Vec::new();

    for (index, line) in lines.iter().enumerate() {
        let Some((action, role)) = lookup.shape_of(&line.action) else {
            return Err(ScriptError::at_line(
                "COMPILE_UNKNOWN_ACTION",
                format!("Unknown action \"{}\" in {}/{}.", line.action, script, event),
                index,
            ));
        };

        match role {
            BlockRole::Opener => open_blocks.push(index),
            BlockRole::Closer => {
                let Some(opener) = open_blocks.pop() else {
                    return Err(ScriptError::at_line(
                        "COMPILE_UNMATCHED_CLOSE",
                        format!("Closing bracket without an open block in {}/{}.", script, event),
                        index,
                    ));
                };
                let opener_instruction: &mut Instruction = &mut instructions[opener];
                opener_instruction.block_end = Some(index);
            }
            BlockRole::Plain => {}
        }

        instructions.push(Instruction {
            action,
            arguments: line.args.clone(),
            block_end: None,
        });
    }

    if let Some(unclosed) = open_blocks.last() {
        return Err(ScriptError::at_line(
            "COMPILE_UNCLOSED_BLOCK",
            format!(
                "Block opened by \"{}\" is never closed in {}/{}.",
                lines[*unclosed].action, script, event
            ),
            *unclosed,
        ));
    }

    debug!(script, event, instructions = instructions.len(), "compiled handler");
    Ok(Program {
        script: script.to_string(),
        event: event.to_string(),
        instructions,
    })
}

pub fn compile_scripts_from_json_map(
    sources: &BTreeMap<String, String>,
    lookup: &dyn ActionShapeLookup,
) -> Result<BTreeMap<String, CompiledScript>, ScriptError> {
    let mut scripts = BTreeMap::new();

    for (path, source) in sources {
        let document = parse_script_document(source).map_err(|error| {
            ScriptError::new(error.code, format!("{} ({})", error.message, path))
        })?;
        let compiled = compile_script(document, &script_name_from_path(path), lookup)?;
        if scripts.contains_key(&compiled.name) {
            return Err(ScriptError::new(
                "COMPILE_DUPLICATE_SCRIPT",
                format!("Script \"{}\" is declared more than once.", compiled.name),
            ));
        }
        scripts.insert(compiled.name.clone(), compiled);
    }

    Ok(scripts)
}

pub fn script_name_from_path(path: &str) -> String {
    let file_name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    file_name
        .strip_suffix(SCRIPT_FILE_SUFFIX)
        .unwrap_or(file_name)
        .to_string()
}
