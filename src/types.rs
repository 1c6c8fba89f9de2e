//! Core data model types.
//!
//! Row sources fill [`RawValue`] slots; [`crate::coerce::coerce`] turns each non-null slot into
//! a canonical [`Value`]; the normalizer collects those into one [`Record`] per row.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// String-keyed, string-valued map (configuration or request parameters).
///
/// An empty string value is a present value; absence is only ever expressed by a missing key.
pub type StringMap = HashMap<String, String>;

/// One normalized row: column name to canonical value, null cells omitted.
pub type Record = BTreeMap<String, Value>;

/// A single cell as delivered by a row source, typed only at runtime.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// SQL-style null marker.
    #[default]
    Null,
    Bool(bool),
    /// Fixed-width integer.
    Int32(i32),
    /// Wide integer.
    Int64(i64),
    Float64(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    /// Raw bytes; decoded as text during coercion.
    Bytes(Vec<u8>),
    /// Anything else the source could produce (nested groups, lists, decimals, ...).
    Other(serde_json::Value),
}

impl RawValue {
    /// Returns `true` for the null marker.
    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }
}

impl From<bool> for RawValue {
    fn from(v: bool) -> Self {
        RawValue::Bool(v)
    }
}

impl From<i32> for RawValue {
    fn from(v: i32) -> Self {
        RawValue::Int32(v)
    }
}

impl From<i64> for RawValue {
    fn from(v: i64) -> Self {
        RawValue::Int64(v)
    }
}

impl From<f64> for RawValue {
    fn from(v: f64) -> Self {
        RawValue::Float64(v)
    }
}

impl From<&str> for RawValue {
    fn from(v: &str) -> Self {
        RawValue::Text(v.to_owned())
    }
}

impl From<String> for RawValue {
    fn from(v: String) -> Self {
        RawValue::Text(v)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(v: Vec<u8>) -> Self {
        RawValue::Bytes(v)
    }
}

impl From<DateTime<Utc>> for RawValue {
    fn from(v: DateTime<Utc>) -> Self {
        RawValue::Timestamp(v)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(RawValue::Null, Into::into)
    }
}

/// Canonical cell value produced by coercion.
///
/// Serializes untagged, so a [`Record`] becomes a plain JSON object.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int64(i64),
    Float64(f64),
    Text(String),
    /// Serialized as RFC 3339.
    Timestamp(DateTime<Utc>),
    /// Passed through unchanged from [`RawValue::Other`].
    Unknown(serde_json::Value),
}

impl Value {
    /// Short tag naming the variant (useful in logs and assertions).
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::Text(_) => "text",
            Value::Timestamp(_) => "timestamp",
            Value::Unknown(_) => "unknown",
        }
    }

    /// Borrow the text content, if this is a text value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }
}
