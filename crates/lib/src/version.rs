//! Version records and build metadata exchanged with the orchestrator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::value::{Document, Value};

/// String key/value data carried from one pipeline step to the next.
///
/// Serialized as a bare JSON object. Only string values are representable, so a
/// version received from the orchestrator with any other value fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Version(BTreeMap<String, String>);

impl Version {
  pub fn get(&self, key: &str) -> Option<&str> {
    self.0.get(key).map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  /// Overlay this version onto `base`; version entries win on key collision.
  pub fn overlay(&self, base: &Document) -> Document {
    let mut doc = base.clone();
    for (k, v) in &self.0 {
      doc.insert(k.clone(), Value::String(v.clone()));
    }
    doc
  }
}

impl FromIterator<(String, String)> for Version {
  fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
    Self(iter.into_iter().collect())
  }
}

/// A single `{name, value}` pair shown by the orchestrator next to a version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
  pub name: String,
  pub value: String,
}

impl Metadata {
  pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      value: value.into(),
    }
  }
}

/// The string-valued entries of `doc` as metadata, in key order.
pub fn metadata_from(doc: &Document) -> Vec<Metadata> {
  doc
    .iter()
    .filter_map(|(k, v)| v.as_str().map(|s| Metadata::new(k.as_str(), s)))
    .collect()
}
