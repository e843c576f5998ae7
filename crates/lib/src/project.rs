//! Version projection: evaluate a mapping and validate the result as a [`Version`].

use std::fmt;

use tracing::{debug, info};

use crate::eval::{CompileError, EvaluationError, Evaluator};
use crate::value::{Document, Value};
use crate::version::{Metadata, Version, metadata_from};

/// Which configured mapping produced a version. Named in every error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingRole {
  /// `source.initial_mapping`, used by `check` when there is no prior version.
  Initial,
  /// `params.mapping`, used by `out`.
  Put,
}

impl MappingRole {
  pub fn as_str(self) -> &'static str {
    match self {
      MappingRole::Initial => "initial_mapping",
      MappingRole::Put => "mapping",
    }
  }
}

impl fmt::Display for MappingRole {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A version key whose value is not a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
  pub key: String,
  pub actual: &'static str,
}

impl fmt::Display for Violation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "invalid version key '{}', expected string value, got: {}",
      self.key, self.actual
    )
  }
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
  #[error("error parsing '{role}': {source}")]
  Compile {
    role: MappingRole,
    #[source]
    source: CompileError,
  },

  #[error("error executing '{role}': {source}")]
  Evaluate {
    role: MappingRole,
    #[source]
    source: EvaluationError,
  },

  #[error("'{role}' returned invalid result, expected map, got: {actual}")]
  Shape { role: MappingRole, actual: &'static str },

  #[error("'{role}' returned invalid result: {}", format_violations(.violations))]
  Validation {
    role: MappingRole,
    violations: Vec<Violation>,
  },
}

fn format_violations(violations: &[Violation]) -> String {
  violations.iter().map(ToString::to_string).collect::<Vec<_>>().join("; ")
}

/// A validated version plus the metadata derived from the mapping's input.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
  pub version: Version,
  pub metadata: Vec<Metadata>,
}

/// Evaluate `mapping` against `doc` and validate the result as a version.
///
/// The result must be a map whose values are all strings. Every offending key
/// is reported, not just the first. The returned metadata is the string-valued
/// subset of `doc`, independent of the mapping result.
pub fn project<E: Evaluator>(
  evaluator: &E,
  role: MappingRole,
  mapping: &str,
  doc: &Document,
) -> Result<Projection, ProjectError> {
  let compiled = evaluator
    .compile(role.as_str(), mapping)
    .map_err(|source| ProjectError::Compile { role, source })?;

  let result = evaluator
    .evaluate(&compiled, doc)
    .map_err(|source| ProjectError::Evaluate { role, source })?;

  let Value::Map(data) = result else {
    return Err(ProjectError::Shape {
      role,
      actual: result.type_name(),
    });
  };

  let violations: Vec<Violation> = data
    .iter()
    .filter(|(_, v)| !matches!(v, Value::String(_)))
    .map(|(k, v)| Violation {
      key: k.clone(),
      actual: v.type_name(),
    })
    .collect();

  if !violations.is_empty() {
    debug!(role = %role, count = violations.len(), "version validation failed");
    return Err(ProjectError::Validation { role, violations });
  }

  let version: Version = data
    .into_iter()
    .filter_map(|(k, v)| match v {
      Value::String(s) => Some((k, s)),
      _ => None,
    })
    .collect();

  info!(role = %role, keys = version.len(), "projected version");

  Ok(Projection {
    version,
    metadata: metadata_from(doc),
  })
}
