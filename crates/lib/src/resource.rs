//! The `check`, `in` and `out` verbs.
//!
//! Each verb is a single synchronous pass over explicit inputs: the decoded
//! request, the build context and, for `in`, a working directory. Nothing is
//! shared between invocations.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::consts::{IDENTITY_MAPPING, METADATA_FILE, VERSION_FILE};
use crate::context::BuildContext;
use crate::eval::Evaluator;
use crate::materialize::{MaterializeError, materialize};
use crate::project::{MappingRole, ProjectError, project};
use crate::protocol::{GetParams, PutParams, Response, Source};
use crate::version::Version;

#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
  #[error(transparent)]
  Project(#[from] ProjectError),

  #[error(transparent)]
  Materialize(#[from] MaterializeError),

  #[error("error writing {file}: {source}")]
  WriteFile {
    file: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// The resource verbs, composed from an evaluator and the build context.
pub struct Resource<E> {
  evaluator: E,
  context: BuildContext,
}

impl<E: Evaluator> Resource<E> {
  pub fn new(evaluator: E, context: BuildContext) -> Self {
    Self { evaluator, context }
  }

  /// Report the versions available to the orchestrator.
  ///
  /// A prior version is echoed back unchanged. Without one, the initial
  /// mapping (if configured) produces the first version.
  pub fn check(&self, source: &Source, prior: Option<Version>) -> Result<Vec<Version>, ResourceError> {
    warn_unsupported(source);

    if let Some(version) = prior {
      debug!(keys = version.len(), "echoing prior version");
      return Ok(vec![version]);
    }

    let Some(mapping) = source.initial_mapping() else {
      debug!("no prior version and no initial mapping");
      return Ok(Vec::new());
    };

    let projection = project(
      &self.evaluator,
      MappingRole::Initial,
      mapping,
      &self.context.document(),
    )?;
    info!(keys = projection.version.len(), "emitting initial version");
    Ok(vec![projection.version])
  }

  /// Write `version` (and any configured files) into `dir`.
  ///
  /// `version.json` and `metadata.json` are always written. File mappings are
  /// evaluated against the build context overlaid with the version.
  pub fn get(
    &self,
    source: &Source,
    version: Version,
    params: Option<&GetParams>,
    dir: &Path,
  ) -> Result<Response, ResourceError> {
    warn_unsupported(source);

    write_json(&dir.join(VERSION_FILE), &version)?;

    let doc = self.context.document();
    write_json(&dir.join(METADATA_FILE), &doc)?;

    if let Some(params) = params.filter(|p| !p.files.is_empty()) {
      let enriched = version.overlay(&doc);
      materialize(&self.evaluator, &params.files, &enriched, dir, source.file_coercion)?;
    }

    info!(dir = %dir.display(), keys = version.len(), "fetched version");

    Ok(Response {
      version,
      metadata: self.context.metadata(),
    })
  }

  /// Produce a new version from the put mapping, or the identity mapping when
  /// none is given.
  pub fn put(&self, source: &Source, params: Option<&PutParams>) -> Result<Response, ResourceError> {
    warn_unsupported(source);

    let mapping = params.and_then(PutParams::mapping).unwrap_or(IDENTITY_MAPPING);
    let projection = project(&self.evaluator, MappingRole::Put, mapping, &self.context.document())?;

    Ok(Response {
      version: projection.version,
      metadata: projection.metadata,
    })
  }
}

fn warn_unsupported(source: &Source) {
  if source.archive.is_some() {
    warn!("source.archive is configured but archiving is not supported; ignoring");
  }
}

/// Write `value` as pretty JSON (2-space indent) followed by a newline.
fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ResourceError> {
  let to_err = |source: io::Error| ResourceError::WriteFile {
    file: path.to_path_buf(),
    source,
  };

  let mut writer = BufWriter::new(File::create(path).map_err(to_err)?);
  serde_json::to_writer_pretty(&mut writer, value).map_err(|e| to_err(e.into()))?;
  writer.write_all(b"\n").map_err(to_err)?;
  writer.flush().map_err(to_err)
}
