//! Implementation of the `in` verb.
//!
//! Writes `version.json`, `metadata.json` and any files configured through
//! `params.files` into the destination directory.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use keyval_lib::protocol::InRequest;

use crate::output;

pub fn cmd_in(dir: &Path) -> Result<()> {
  let request: InRequest = output::read_request()?;
  let source = request.source.unwrap_or_default();

  fs::create_dir_all(dir).with_context(|| format!("Failed to create directory: {}", dir.display()))?;
  let resource = super::resource(dir)?;

  let response = resource
    .get(&source, request.version, request.params.as_ref(), dir)
    .context("in failed")?;

  output::print_json(&response)
}
