//! # Canonical Value Model
//!
//! `CanonicalValue` is the closed variant every comparison operates on.
//! Mappings are held in a `BTreeMap`, so two values built from the same
//! entries in different insertion orders are structurally identical before
//! any encoding takes place.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

use crate::error::CanonicalizationError;

/// A recursive JSON-like value with order-insensitive mappings.
///
/// Serialized untagged, so the JSON form of a `CanonicalValue` is the plain
/// JSON value it models (`Null` ↔ `null`, `Sequence` ↔ array, and so on).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CanonicalValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Sequence(Vec<CanonicalValue>),
    Mapping(BTreeMap<String, CanonicalValue>),
}

impl CanonicalValue {
    /// Lower any serializable value into canonical form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonicalizationError::Unrepresentable`] when `serde_json`
    /// cannot represent the value (e.g. a map keyed by structs).
    pub fn from_serialize(value: &impl Serialize) -> Result<Self, CanonicalizationError> {
        Ok(serde_json::to_value(value)?.into())
    }
}

impl From<Value> for CanonicalValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => Self::Number(n),
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Sequence(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Mapping(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<bool> for CanonicalValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i64> for CanonicalValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<&str> for CanonicalValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for CanonicalValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl<T: Into<CanonicalValue>> From<Vec<T>> for CanonicalValue {
    fn from(items: Vec<T>) -> Self {
        Self::Sequence(items.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<CanonicalValue>> FromIterator<(K, V)> for CanonicalValue {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
