use std::path::Path;

use mlua::prelude::*;
use mlua::{LuaOptions, StdLib};

use crate::lua::globals;

/// Base library functions that load code from outside the mapping.
const REMOVED_GLOBALS: &[&str] = &["dofile", "loadfile", "load", "require", "collectgarbage"];

/// Create a Lua runtime for evaluating mappings.
///
/// Only the `string`, `table`, `math` and `utf8` libraries are opened; there is
/// no `io`, `os` or module loading. Helper functions are registered as globals,
/// with `file()` resolving relative paths against `base_dir`.
pub fn create_runtime(base_dir: &Path) -> LuaResult<Lua> {
  let lua = Lua::new_with(
    StdLib::STRING | StdLib::TABLE | StdLib::MATH | StdLib::UTF8,
    LuaOptions::default(),
  )?;

  let g = lua.globals();
  for name in REMOVED_GLOBALS {
    g.raw_set(*name, LuaValue::Nil)?;
  }

  globals::register_globals(&lua, base_dir)?;

  Ok(lua)
}
