use super::{Map, Value};

/// Attribute bag with dynamic, key-based access.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Fluent {
    attributes: Map,
}

impl Fluent {
    pub fn new(attributes: Map) -> Self {
        Self { attributes }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Attribute value or `default` when missing.
    pub fn get_or<'a>(&'a self, key: &str, default: &'a Value) -> &'a Value {
        self.attributes.get(key).unwrap_or(default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.attributes.contains_key(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    pub fn attributes(&self) -> &Map {
        &self.attributes
    }

    pub fn into_attributes(self) -> Map {
        self.attributes
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}
