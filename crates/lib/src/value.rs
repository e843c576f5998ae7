//! Dynamically typed mapping results.
//!
//! Every mapping evaluates to a [`Value`]. The variant set is closed so callers
//! dispatch on the result with a plain `match` instead of probing types.

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

/// The input of every mapping: a flat or nested key/value document.
pub type Document = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
  Null,
  Bool(bool),
  Integer(i64),
  Float(f64),
  String(String),
  Bytes(Vec<u8>),
  Array(Vec<Value>),
  Map(BTreeMap<String, Value>),
}

impl Value {
  /// Name of the variant as shown in error messages.
  pub fn type_name(&self) -> &'static str {
    match self {
      Value::Null => "null",
      Value::Bool(_) => "bool",
      Value::Integer(_) => "integer",
      Value::Float(_) => "float",
      Value::String(_) => "string",
      Value::Bytes(_) => "bytes",
      Value::Array(_) => "array",
      Value::Map(_) => "map",
    }
  }

  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<serde_json::Value> for Value {
  fn from(json: serde_json::Value) -> Self {
    match json {
      serde_json::Value::Null => Value::Null,
      serde_json::Value::Bool(b) => Value::Bool(b),
      serde_json::Value::Number(n) => match n.as_i64() {
        Some(i) => Value::Integer(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
      },
      serde_json::Value::String(s) => Value::String(s),
      serde_json::Value::Array(items) => Value::Array(items.into_iter().map(Value::from).collect()),
      serde_json::Value::Object(map) => Value::Map(map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()),
    }
  }
}

impl Serialize for Value {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      Value::Null => serializer.serialize_unit(),
      Value::Bool(b) => serializer.serialize_bool(*b),
      Value::Integer(i) => serializer.serialize_i64(*i),
      Value::Float(n) => serializer.serialize_f64(*n),
      Value::String(s) => serializer.serialize_str(s),
      // Nested bytes have no structured representation; emit them as text.
      Value::Bytes(b) => serializer.serialize_str(&String::from_utf8_lossy(b)),
      Value::Array(items) => {
        let mut seq = serializer.serialize_seq(Some(items.len()))?;
        for item in items {
          seq.serialize_element(item)?;
        }
        seq.end()
      }
      Value::Map(map) => {
        let mut out = serializer.serialize_map(Some(map.len()))?;
        for (k, v) in map {
          out.serialize_entry(k, v)?;
        }
        out.end()
      }
    }
  }
}
