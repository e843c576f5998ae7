mod check;
mod get;
mod put;

pub use check::cmd_check;
pub use get::cmd_in;
pub use put::cmd_out;

use std::path::Path;

use anyhow::{Context, Result};
use keyval_lib::context::BuildContext;
use keyval_lib::lua::LuaEvaluator;
use keyval_lib::resource::Resource;

/// Build the resource for one invocation; `file()` in mappings reads from `dir`.
fn resource(dir: &Path) -> Result<Resource<LuaEvaluator>> {
  let evaluator = LuaEvaluator::new(dir).context("Failed to create Lua runtime")?;
  Ok(Resource::new(evaluator, BuildContext::from_env()))
}
