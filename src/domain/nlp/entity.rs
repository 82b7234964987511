//! Entity occurrences detected in an analysed sentence.

use serde::Serialize;
use serde_json::{Map, Value};
use std::str::FromStr;

use super::gold::{GoldEntity, GoldKind};
use crate::domain::errors::DecodeError;

/// Reads the `confidence` field of an occurrence, 0.0 when absent or not numeric.
fn confidence_of(fields: &Map<String, Value>) -> f64 {
    fields
        .get("confidence")
        .and_then(Value::as_f64)
        .unwrap_or(0.0)
}

/// One detected semantic unit, of any kind.
///
/// `data` keeps every field of the occurrence as received so kind-specific
/// values (`lat`, `lng`, `formatted`, ...) stay reachable through [`Entity::get`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub name: String,
    pub confidence: f64,
    pub raw: String,
    pub data: Map<String, Value>,
}

impl Entity {
    /// Builds an entity from one occurrence object of kind `name`.
    pub fn from_occurrence(name: impl Into<String>, fields: &Map<String, Value>) -> Self {
        Self {
            name: name.into(),
            confidence: confidence_of(fields),
            raw: fields
                .get("raw")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            data: fields.clone(),
        }
    }

    /// Returns a field of the occurrence.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    /// Returns a numeric field of the occurrence.
    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    /// Returns a string field of the occurrence.
    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Whether this occurrence belongs to a built-in kind.
    pub fn is_gold(&self) -> bool {
        super::gold::is_gold(&self.name)
    }

    /// Projects the occurrence into the typed record of its kind.
    ///
    /// Returns `Ok(None)` for custom kinds.
    pub fn gold(&self) -> Result<Option<GoldEntity>, DecodeError> {
        match GoldKind::from_str(&self.name) {
            Ok(kind) => GoldEntity::decode(kind, &self.data).map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// An occurrence of a caller-defined entity kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CustomEntity {
    pub name: String,
    pub raw: String,
    pub value: String,
    pub confidence: f64,
}

impl CustomEntity {
    /// Builds a custom entity from one occurrence object of kind `name`.
    ///
    /// `raw` must be a string when present. A non-string `value` is kept in
    /// its JSON text form.
    pub fn from_occurrence(
        name: impl Into<String>,
        fields: &Map<String, Value>,
    ) -> Result<Self, DecodeError> {
        let name = name.into();
        let raw = match fields.get("raw") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(raw)) => raw.clone(),
            Some(_) => return Err(DecodeError::invalid_shape(format!("{}.raw", name), "a string")),
        };
        let value = match fields.get("value") {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(value)) => value.clone(),
            Some(other) => other.to_string(),
        };

        Ok(Self {
            confidence: confidence_of(fields),
            name,
            raw,
            value,
        })
    }
}
