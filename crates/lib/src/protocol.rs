//! Request and response shapes of the orchestrator's resource protocol.
//!
//! Each verb reads one JSON request on stdin and writes one JSON response on
//! stdout. `check` answers with a list of versions; `in` and `out` answer
//! with a [`Response`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::materialize::FileCoercion;
use crate::version::{Metadata, Version};

/// Operator-supplied resource configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Source {
  /// Mapping used by `check` to emit a first version when none exists yet.
  pub initial_mapping: Option<String>,
  /// Content archive configuration. Accepted for compatibility, not acted on.
  pub archive: Option<serde_json::Value>,
  pub file_coercion: FileCoercion,
}

impl Source {
  /// The initial mapping, if configured and non-empty.
  pub fn initial_mapping(&self) -> Option<&str> {
    self.initial_mapping.as_deref().filter(|m| !m.is_empty())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GetParams {
  /// Output filename to mapping.
  pub files: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PutParams {
  pub mapping: Option<String>,
}

impl PutParams {
  /// The put mapping, if given and non-empty.
  pub fn mapping(&self) -> Option<&str> {
    self.mapping.as_deref().filter(|m| !m.is_empty())
  }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckRequest {
  #[serde(default)]
  pub source: Option<Source>,
  #[serde(default)]
  pub version: Option<Version>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InRequest {
  #[serde(default)]
  pub source: Option<Source>,
  pub version: Version,
  #[serde(default)]
  pub params: Option<GetParams>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutRequest {
  #[serde(default)]
  pub source: Option<Source>,
  #[serde(default)]
  pub params: Option<PutParams>,
}

/// Response of the `in` and `out` verbs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
  pub version: Version,
  pub metadata: Vec<Metadata>,
}
