use std::collections::{HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use bs_core::{ActionShapeLookup, BlockRole, Program, ScriptError};
use indexmap::IndexMap;

use crate::actions::builtin_actions;
use crate::definition::ActionDefinition;
use crate::resolver::resolve;

/// Registry of action definitions keyed by stable id.
#[derive(Debug, Clone, Default)]
pub struct ActionCatalog {
    definitions: IndexMap<String, ActionDefinition>,
    names: HashMap<String, String>,
}

impl ActionCatalog {
    pub fn new(definitions: Vec<ActionDefinition>) -> Result<Self, ScriptError> {
        let mut catalog = Self::default();
        for definition in definitions {
            validate_definition(&definition)?;
            if catalog.definitions.contains_key(&definition.id) {
                return Err(ScriptError::new(
                    "CATALOG_DUPLICATE_ID",
                    format!("Action id \"{}\" is registered twice.", definition.id),
                ));
            }
            let name_key = definition.name.to_lowercase();
            if catalog.names.contains_key(&name_key) {
                return Err(ScriptError::new(
                    "CATALOG_DUPLICATE_NAME",
                    format!("Action name \"{}\" is registered twice.", definition.name),
                ));
            }
            catalog.names.insert(name_key, definition.id.clone());
            catalog
                .definitions
                .insert(definition.id.clone(), definition);
        }
        Ok(catalog)
    }

    /// The built-in actions, constructed on first use.
    pub fn builtin() -> Arc<ActionCatalog> {
        static BUILTIN: OnceLock<Arc<ActionCatalog>> = OnceLock::new();
        BUILTIN
            .get_or_init(|| {
                Arc::new(
                    ActionCatalog::new(builtin_actions())
                        .expect("builtin action catalog must be valid"),
                )
            })
            .clone()
    }

    pub fn get(&self, id: &str) -> Option<&ActionDefinition> {
        self.definitions.get(id)
    }

    /// Looks up by id, then by display name ignoring case.
    pub fn find(&self, reference: &str) -> Option<&ActionDefinition> {
        self.definitions.get(reference).or_else(|| {
            self.names
                .get(&reference.trim().to_lowercase())
                .and_then(|id| self.definitions.get(id))
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActionDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Resolves every line of `program` without running any effect.
    pub fn check_program(&self, program: &Program) -> Vec<ScriptError> {
        program
            .instructions
            .iter()
            .enumerate()
            .filter_map(|(line, instruction)| {
                let Some(definition) = self.get(&instruction.action) else {
                    return Some(ScriptError::at_line(
                        "CATALOG_UNKNOWN_ACTION",
                        format!("Unknown action \"{}\".", instruction.action),
                        line,
                    ));
                };
                resolve(definition, &instruction.arguments)
                    .err()
                    .map(|error| ScriptError::at_line(error.code, error.message, line))
            })
            .collect()
    }
}

impl ActionShapeLookup for ActionCatalog {
    fn shape_of(&self, reference: &str) -> Option<(String, BlockRole)> {
        self.find(reference)
            .map(|definition| (definition.id.clone(), definition.block_role()))
    }
}

fn validate_definition(definition: &ActionDefinition) -> Result<(), ScriptError> {
    if definition.has_nested_block && definition.closes_block {
        return Err(ScriptError::new(
            "CATALOG_INVALID_BLOCK_ROLE",
            format!(
                "Action \"{}\" cannot both open and close a block.",
                definition.id
            ),
        ));
    }

    let mut seen = HashSet::new();
    for parameter in &definition.parameters {
        if !seen.insert(parameter.name.as_str()) {
            return Err(ScriptError::new(
                "CATALOG_DUPLICATE_PARAMETER",
                format!(
                    "Action \"{}\" declares parameter \"{}\" twice.",
                    definition.id, parameter.name
                ),
            ));
        }
    }

    // Only optional parameters may follow a plural one.
    if let Some(plural) = definition
        .parameters
        .iter()
        .position(|parameter| parameter.plural)
    {
        let required_after = definition.parameters[plural + 1..]
            .iter()
            .find(|parameter| !parameter.optional);
        if let Some(parameter) = required_after {
            return Err(ScriptError::new(
                "CATALOG_PLURAL_NOT_TRAILING",
                format!(
                    "Action \"{}\" declares required parameter \"{}\" after a plural one.",
                    definition.id, parameter.name
                ),
            ));
        }
    }
    Ok(())
}
