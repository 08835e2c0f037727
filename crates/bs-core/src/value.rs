use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ScriptError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BsValue {
    #[default]
    Unknown,
    Number(f64),
    Text(String),
    List(Vec<BsValue>),
    Dictionary(BTreeMap<String, BsValue>),
}

impl BsValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Dictionary(_) => "dictionary",
        }
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Self::Unknown)
    }

    pub fn as_number(&self) -> Result<f64, ScriptError> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(value) => value.trim().parse::<f64>().map_err(|_| {
                ScriptError::new(
                    "VALUE_NOT_NUMBER",
                    format!("Text \"{}\" is not a number.", value),
                )
            }),
            other => Err(ScriptError::new(
                "VALUE_NOT_NUMBER",
                format!("A {} value is not a number.", other.type_name()),
            )),
        }
    }

    /// Textual form of any value. Never fails.
    pub fn as_text(&self) -> String {
        match self {
            Self::Unknown => "unknown".to_string(),
            Self::Number(value) => format_number(*value),
            Self::Text(value) => value.clone(),
            Self::List(values) => {
                let parts = values.iter().map(BsValue::as_text).collect::<Vec<_>>();
                format!("[{}]", parts.join(", "))
            }
            Self::Dictionary(entries) => {
                let parts = entries
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value.as_text()))
                    .collect::<Vec<_>>();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }

    pub fn as_list(&self) -> Result<Vec<BsValue>, ScriptError> {
        match self {
            Self::List(values) => Ok(values.clone()),
            other => Err(ScriptError::new(
                "VALUE_NOT_LIST",
                format!("A {} value is not a list.", other.type_name()),
            )),
        }
    }

    pub fn as_dictionary(&self) -> Result<BTreeMap<String, BsValue>, ScriptError> {
        match self {
            Self::Dictionary(entries) => Ok(entries.clone()),
            other => Err(ScriptError::new(
                "VALUE_NOT_DICTIONARY",
                format!("A {} value is not a dictionary.", other.type_name()),
            )),
        }
    }

    /// Script-level equality. Numbers and texts compare by their textual form.
    pub fn value_equals(&self, other: &BsValue) -> bool {
        match (self, other) {
            (Self::Unknown, Self::Unknown) => true,
            (Self::Number(left), Self::Number(right)) => left == right,
            (Self::Text(left), Self::Text(right)) => left == right,
            (Self::Number(_), Self::Text(_)) | (Self::Text(_), Self::Number(_)) => {
                self.as_text() == other.as_text()
            }
            (Self::List(left), Self::List(right)) => {
                left.len() == right.len()
                    && left
                        .iter()
                        .zip(right.iter())
                        .all(|(left, right)| left.value_equals(right))
            }
            (Self::Dictionary(left), Self::Dictionary(right)) => {
                left.len() == right.len()
                    && left.iter().all(|(key, value)| {
                        right
                            .get(key)
                            .is_some_and(|other_value| value.value_equals(other_value))
                    })
            }
            _ => false,
        }
    }
}

impl From<f64> for BsValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for BsValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for BsValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<BsValue>> for BsValue {
    fn from(values: Vec<BsValue>) -> Self {
        Self::List(values)
    }
}

pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}
