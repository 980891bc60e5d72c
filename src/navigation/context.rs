//! Per-navigation caller context.

use serde_json::{Map, Value};
use uuid::Uuid;

/// Caller supplied data for one navigation, visible to every guard.
#[derive(Debug, Clone)]
pub struct NavigationContext {
    id: Uuid,
    attributes: Map<String, Value>,
}

impl NavigationContext {
    /// New context with a random correlation id.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            attributes: Map::new(),
        }
    }

    /// Keep a caller chosen correlation id.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn with_attribute(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.to_string(), value.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }
}

impl Default for NavigationContext {
    fn default() -> Self {
        Self::new()
    }
}
