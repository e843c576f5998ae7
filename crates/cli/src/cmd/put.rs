//! Implementation of the `out` verb.

use std::path::Path;

use anyhow::{Context, Result};

use keyval_lib::protocol::OutRequest;

use crate::output;

pub fn cmd_out(dir: &Path) -> Result<()> {
  let request: OutRequest = output::read_request()?;
  let source = request.source.unwrap_or_default();

  let resource = super::resource(dir)?;
  let response = resource
    .put(&source, request.params.as_ref())
    .context("out failed")?;

  output::print_json(&response)
}
