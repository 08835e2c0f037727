use std::collections::BTreeMap;

use bs_core::BsValue;

/// Host event that starts script handlers bound to its name.
#[derive(Debug, Clone, PartialEq)]
pub struct TriggerEvent {
    pub name: String,
    pub cancellable: bool,
    cancelled: bool,
    pub data: BTreeMap<String, BsValue>,
}

impl TriggerEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cancellable: false,
            cancelled: false,
            data: BTreeMap::new(),
        }
    }

    pub fn cancellable(name: impl Into<String>) -> Self {
        Self {
            cancellable: true,
            ..Self::new(name)
        }
    }

    pub fn with_data(mut self, key: impl Into<String>, value: BsValue) -> Self {
        self.data.insert(key.into(), value);
        self
    }

    pub fn value(&self, key: &str) -> BsValue {
        self.data.get(key).cloned().unwrap_or_default()
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Has no effect on events that cannot be cancelled.
    pub fn set_cancelled(&mut self, cancelled: bool) {
        if self.cancellable {
            self.cancelled = cancelled;
        }
    }
}
