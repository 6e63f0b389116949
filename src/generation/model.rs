//! Data model handed to a single template rendering

use serde::Serialize;
use serde_json::{Map as JsonMap, Value as JsonValue};

/// Named values exposed to one template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataModel {
    values: JsonMap<String, JsonValue>,
}

impl DataModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, replacing any previous one
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder form of [`DataModel::insert`]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert any serializable value (lists of structs, nested maps)
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<(), serde_json::Error> {
        self.values.insert(key.into(), serde_json::to_value(value)?);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    /// String value for a key, if it is a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(JsonValue::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// JSON object form, as consumed by the renderer
    pub fn to_value(&self) -> JsonValue {
        JsonValue::Object(self.values.clone())
    }
}
