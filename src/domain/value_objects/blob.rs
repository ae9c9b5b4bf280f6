//! Opaque blob value object
//!
//! Pipeline bodies, rule definitions and auth provider configs are never
//! interpreted. They are held as decoded JSON so that equality is structural:
//! key order and whitespace never show up as a difference.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;

/// An opaque, structurally compared JSON document
///
/// `null` and `{}` both mean "not set" and compare equal.
#[derive(Debug, Clone)]
pub struct Blob(JsonValue);

impl Blob {
    pub fn new(value: JsonValue) -> Self {
        Self(value)
    }

    /// Decode a blob from JSON text; the text must hold a document.
    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        Self::document(serde_json::from_str(text)?)
    }

    fn document<E: de::Error>(value: JsonValue) -> Result<Self, E> {
        match value {
            JsonValue::Object(_) | JsonValue::Array(_) | JsonValue::Null => Ok(Self(value)),
            other => Err(E::custom(format!(
                "expected a document, found {}",
                other
            ))),
        }
    }

    pub fn empty() -> Self {
        Self(JsonValue::Object(serde_json::Map::new()))
    }

    pub fn as_value(&self) -> &JsonValue {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        match &self.0 {
            JsonValue::Null => true,
            JsonValue::Object(map) => map.is_empty(),
            JsonValue::Array(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl PartialEq for Blob {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (JsonValue::Null, JsonValue::Object(map)) | (JsonValue::Object(map), JsonValue::Null) => {
                map.is_empty()
            }
            (a, b) => a == b,
        }
    }
}

impl Default for Blob {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<JsonValue> for Blob {
    fn from(value: JsonValue) -> Self {
        Self(value)
    }
}

impl Serialize for Blob {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Accepts an embedded document (object, array, null) or a string holding
/// JSON text, which is how the remote service transports these fields.
impl<'de> Deserialize<'de> for Blob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match JsonValue::deserialize(deserializer)? {
            JsonValue::String(text) => Blob::parse(&text)
                .map_err(|e| de::Error::custom(format!("malformed blob JSON: {}", e))),
            value => Blob::document(value)
                .map_err(|e: D::Error| de::Error::custom(format!("malformed blob JSON: {}", e))),
        }
    }
}
