//! Implementation of the `check` verb.

use anyhow::{Context, Result};
use tracing::debug;

use keyval_lib::protocol::CheckRequest;

use crate::output;

pub fn cmd_check() -> Result<()> {
  let request: CheckRequest = output::read_request()?;
  let source = request.source.unwrap_or_default();

  let dir = std::env::current_dir().context("Failed to resolve current directory")?;
  let resource = super::resource(&dir)?;

  let versions = resource.check(&source, request.version).context("check failed")?;
  debug!(count = versions.len(), "check complete");

  output::print_json(&versions)
}
