use std::collections::BTreeMap;

use bs_core::BsValue;
use serde::Serialize;

/// Variables owned by a single task.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct VariableScope {
    values: BTreeMap<String, BsValue>,
}

impl VariableScope {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&BsValue> {
        self.values.get(name)
    }

    /// Reads a variable; unset names read as `Unknown`.
    pub fn read(&self, name: &str) -> BsValue {
        self.values.get(name).cloned().unwrap_or_default()
    }

    pub fn set(&mut self, name: &str, value: BsValue) {
        self.values.insert(name.to_string(), value);
    }

    pub fn remove(&mut self, name: &str) -> Option<BsValue> {
        self.values.remove(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BsValue)> {
        self.values.iter()
    }
}
