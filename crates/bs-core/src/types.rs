use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::BsValue;

/// Declared kind of an action parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgKind {
    Text,
    Number,
    Variable,
    List,
    Dictionary,
    Any,
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "Text",
            Self::Number => "Number",
            Self::Variable => "Variable",
            Self::List => "List",
            Self::Dictionary => "Dictionary",
            Self::Any => "Any",
        };
        f.write_str(name)
    }
}

/// One argument supplied on a script line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArgToken {
    Text(String),
    Number(f64),
    List(Vec<BsValue>),
    Dictionary(BTreeMap<String, BsValue>),
    /// Reference to a variable in the running task's scope.
    Variable(String),
    /// Named value carried by the triggering event.
    Event(String),
}

impl ArgToken {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Static convertibility check used by argument resolution.
    pub fn converts_to(&self, kind: ArgKind) -> bool {
        match (self, kind) {
            (_, ArgKind::Any) => true,
            (Self::Variable(_), _) => true,
            (Self::Event(_), ArgKind::Variable) => false,
            (Self::Event(_), _) => true,
            (Self::Text(_), ArgKind::Text) => true,
            (Self::Number(_), ArgKind::Number | ArgKind::Text) => true,
            (Self::List(_), ArgKind::List) => true,
            (Self::Dictionary(_), ArgKind::Dictionary) => true,
            _ => false,
        }
    }

    /// Literal value of the token, if it is not a runtime reference.
    pub fn literal(&self) -> Option<BsValue> {
        match self {
            Self::Text(value) => Some(BsValue::Text(value.clone())),
            Self::Number(value) => Some(BsValue::Number(*value)),
            Self::List(values) => Some(BsValue::List(values.clone())),
            Self::Dictionary(entries) => Some(BsValue::Dictionary(entries.clone())),
            Self::Variable(_) | Self::Event(_) => None,
        }
    }
}

/// How an action participates in block structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockRole {
    Plain,
    Opener,
    Closer,
}

/// Lookup the script loader uses to canonicalize action references.
pub trait ActionShapeLookup {
    /// Returns the stable action id and its block role.
    fn shape_of(&self, reference: &str) -> Option<(String, BlockRole)>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Instruction {
    pub action: String,
    pub arguments: Vec<ArgToken>,
    /// For block openers, the index of the matching closer.
    pub block_end: Option<usize>,
}

/// Flat instruction sequence for one event handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub script: String,
    pub event: String,
    pub instructions: Vec<Instruction>,
}

impl Program {
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledScript {
    pub name: String,
    pub handlers: Vec<Program>,
}
