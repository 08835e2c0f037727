use std::fmt;
use std::sync::Arc;

use bs_core::{ArgKind, BlockRole, ScriptError};

use crate::context::ActionContext;

pub type ActionEffect =
    Arc<dyn Fn(&mut ActionContext<'_>) -> Result<(), ScriptError> + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Visuals,
    Actions,
    Variables,
    Numbers,
    Texts,
    Lists,
    Dictionaries,
    Misc,
}

impl fmt::Display for ActionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Visuals => "Visuals",
            Self::Actions => "Actions",
            Self::Variables => "Variables",
            Self::Numbers => "Numbers",
            Self::Texts => "Texts",
            Self::Lists => "Lists",
            Self::Dictionaries => "Dictionaries",
            Self::Misc => "Misc",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub kind: ArgKind,
    pub optional: bool,
    pub plural: bool,
}

impl Parameter {
    pub fn new(name: impl Into<String>, kind: ArgKind) -> Self {
        Self {
            name: name.into(),
            kind,
            optional: false,
            plural: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn plural(mut self) -> Self {
        self.plural = true;
        self
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.kind)?;
        if self.plural {
            f.write_str("...")?;
        }
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Immutable description of one action: metadata, signature and effect.
#[derive(Clone)]
pub struct ActionDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub icon: String,
    pub category: ActionCategory,
    pub parameters: Vec<Parameter>,
    pub has_nested_block: bool,
    pub closes_block: bool,
    effect: ActionEffect,
}

impl ActionDefinition {
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> ActionDefinitionBuilder {
        ActionDefinitionBuilder {
            id: id.into(),
            name: name.into(),
            description: "No description provided.".to_string(),
            icon: "stone".to_string(),
            category: ActionCategory::Misc,
            parameters: Vec::new(),
            has_nested_block: false,
            closes_block: false,
            effect: None,
        }
    }

    pub fn block_role(&self) -> BlockRole {
        if self.closes_block {
            BlockRole::Closer
        } else if self.has_nested_block {
            BlockRole::Opener
        } else {
            BlockRole::Plain
        }
    }

    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|parameter| parameter.name == name)
    }

    pub fn signature(&self) -> String {
        let parameters = self
            .parameters
            .iter()
            .map(Parameter::to_string)
            .collect::<Vec<_>>();
        format!("{}({})", self.id, parameters.join(", "))
    }

    pub(crate) fn invoke(&self, context: &mut ActionContext<'_>) -> Result<(), ScriptError> {
        (self.effect)(context)
    }
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("parameters", &self.parameters)
            .field("has_nested_block", &self.has_nested_block)
            .field("closes_block", &self.closes_block)
            .finish_non_exhaustive()
    }
}

pub struct ActionDefinitionBuilder {
    id: String,
    name: String,
    description: String,
    icon: String,
    category: ActionCategory,
    parameters: Vec<Parameter>,
    has_nested_block: bool,
    closes_block: bool,
    effect: Option<ActionEffect>,
}

impl ActionDefinitionBuilder {
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn category(mut self, category: ActionCategory) -> Self {
        self.category = category;
        self
    }

    pub fn arg(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn opens_block(mut self) -> Self {
        self.has_nested_block = true;
        self
    }

    pub fn closes_block(mut self) -> Self {
        self.closes_block = true;
        self
    }

    pub fn effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut ActionContext<'_>) -> Result<(), ScriptError> + Send + Sync + 'static,
    {
        self.effect = Some(Arc::new(effect));
        self
    }

    pub fn build(self) -> ActionDefinition {
        ActionDefinition {
            id: self.id,
            name: self.name,
            description: self.description,
            icon: self.icon,
            category: self.category,
            parameters: self.parameters,
            has_nested_block: self.has_nested_block,
            closes_block: self.closes_block,
            effect: self.effect.unwrap_or_else(|| Arc::new(no_effect)),
        }
    }
}

fn no_effect(_context: &mut ActionContext<'_>) -> Result<(), ScriptError> {
    Ok(())
}
