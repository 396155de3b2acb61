use bytes::Bytes;
use std::collections::HashMap;

/// Domain entity for a message moving through the relay: an opaque byte
/// payload plus string-keyed metadata properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EdgeMessage {
    pub payload: Bytes,
    pub properties: HashMap<String, String>,
}

impl EdgeMessage {
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Build the outbound copy of this message: identical payload bytes and
    /// every metadata property copied onto a fresh map.
    pub fn to_outbound(&self) -> Self {
        let mut properties = HashMap::with_capacity(self.properties.len());
        for (key, value) in &self.properties {
            properties.insert(key.clone(), value.clone());
        }
        Self {
            payload: self.payload.clone(),
            properties,
        }
    }
}
