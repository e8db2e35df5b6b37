use serde_json::{Map, Value};

/// Projected metadata of every instance in a submodule, keyed by instance name.
///
/// Entries keep insertion order. Adding an instance under an existing name
/// replaces the whole entry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataIndex {
    entries: Map<String, Value>,
}

impl MetadataIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap a decoded `metadata.json` document.
    ///
    /// Returns `None` when the document is not a JSON object.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Object(entries) => Some(Self { entries }),
            _ => None,
        }
    }

    /// Insert or replace the entry for `name`, returning the replaced entry.
    pub fn upsert(&mut self, name: &str, projected: Value) -> Option<Value> {
        self.entries.insert(name.to_string(), projected)
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Instance names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Encode the index as the `metadata.json` document.
    pub fn as_json(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}
