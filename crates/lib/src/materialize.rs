//! File materialization: evaluate per-file mappings and write their results.
//!
//! Files are processed in filename order and the first failure aborts the
//! whole operation. Files written before the failure are left in place.

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::eval::{CompileError, EvaluationError, Evaluator};
use crate::value::{Document, Value};

/// How a mapping result that is not already text or bytes becomes file content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileCoercion {
  /// Serialize structured results by file extension: `.json`, `.yml`/`.yaml`.
  #[default]
  Extension,
  /// Only strings and bytes are accepted.
  Strict,
}

#[derive(Debug, thiserror::Error)]
pub enum MaterializeError {
  #[error("invalid file name '{file}': must be a relative path inside the working directory")]
  InvalidPath { file: String },

  #[error("error parsing '{file}' file mapping: {source}")]
  Compile {
    file: String,
    #[source]
    source: CompileError,
  },

  #[error("error executing '{file}' file mapping: {source}")]
  Evaluate {
    file: String,
    #[source]
    source: EvaluationError,
  },

  #[error("'{file}' file mapping returned unsupported type {actual}, expected string or bytes")]
  UnsupportedType { file: String, actual: &'static str },

  #[error(
    "unclear how to serialize result ({actual}) returned by '{file}' file mapping: \
     try adding a supported file extension (.json, .yml)"
  )]
  UnknownExtension { file: String, actual: &'static str },

  #[error("error serializing '{file}' file mapping result as {format}: {message}")]
  Serialize {
    file: String,
    format: &'static str,
    message: String,
  },

  #[error("error writing '{file}' file: {source}")]
  Io {
    file: String,
    #[source]
    source: io::Error,
  },
}

/// Evaluate each file mapping against `doc` and write the results under `dir`.
///
/// Returns the paths written, in the order they were written.
pub fn materialize<E: Evaluator>(
  evaluator: &E,
  files: &BTreeMap<String, String>,
  doc: &Document,
  dir: &Path,
  coercion: FileCoercion,
) -> Result<Vec<PathBuf>, MaterializeError> {
  let mut written = Vec::with_capacity(files.len());

  for (file, mapping) in files {
    let target = dir.join(validate_file_name(file)?);

    let compiled = evaluator.compile(file, mapping).map_err(|source| MaterializeError::Compile {
      file: file.clone(),
      source,
    })?;

    let result = evaluator
      .evaluate(&compiled, doc)
      .map_err(|source| MaterializeError::Evaluate {
        file: file.clone(),
        source,
      })?;

    let content = coerce(file, result, coercion)?;
    write_file(&target, &content).map_err(|source| MaterializeError::Io {
      file: file.clone(),
      source,
    })?;

    debug!(file = %file, bytes = content.len(), "wrote file");
    written.push(target);
  }

  info!(count = written.len(), dir = %dir.display(), "materialized files");
  Ok(written)
}

fn validate_file_name(file: &str) -> Result<&Path, MaterializeError> {
  let path = Path::new(file);
  let mut components = path.components().peekable();
  let valid = components.peek().is_some() && components.all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
  if valid {
    Ok(path)
  } else {
    Err(MaterializeError::InvalidPath { file: file.to_string() })
  }
}

/// Turn a mapping result into file content.
fn coerce(file: &str, value: Value, coercion: FileCoercion) -> Result<Vec<u8>, MaterializeError> {
  match value {
    Value::String(s) => return Ok(s.into_bytes()),
    Value::Bytes(b) => return Ok(b),
    _ => {}
  }

  if coercion == FileCoercion::Strict {
    return Err(MaterializeError::UnsupportedType {
      file: file.to_string(),
      actual: value.type_name(),
    });
  }

  match Path::new(file).extension().and_then(|e| e.to_str()) {
    Some("json") => {
      let mut out = serde_json::to_vec_pretty(&value).map_err(|e| MaterializeError::Serialize {
        file: file.to_string(),
        format: "json",
        message: e.to_string(),
      })?;
      out.push(b'\n');
      Ok(out)
    }
    Some("yml" | "yaml") => serde_yaml::to_string(&value)
      .map(String::into_bytes)
      .map_err(|e| MaterializeError::Serialize {
        file: file.to_string(),
        format: "yaml",
        message: e.to_string(),
      }),
    _ => Err(MaterializeError::UnknownExtension {
      file: file.to_string(),
      actual: value.type_name(),
    }),
  }
}

/// Create (or truncate) `path` with permissive mode and write `content`.
fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
  if let Some(parent) = path.parent() {
    fs::create_dir_all(parent)?;
  }

  let mut options = OpenOptions::new();
  options.write(true).create(true).truncate(true);
  #[cfg(unix)]
  {
    use std::os::unix::fs::OpenOptionsExt;
    options.mode(0o777);
  }

  let mut file = options.open(path)?;
  file.write_all(content)?;
  file.flush()
}
