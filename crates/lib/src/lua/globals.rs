//! Helper functions available to every mapping.
//!
//! - `ksuid()` - 27 character K-sortable unique id
//! - `uuid_v4()` - random UUID
//! - `now()` - current time as RFC 3339 (UTC, second precision)
//! - `file(path)` - contents of a file, relative paths resolved against the working directory
//! - `bytes(s)` - mark a string as a raw byte sequence
//! - `format_json(v)` / `format_yaml(v)` - serialize a value to text
//! - `parse_json(s)` / `parse_yaml(s)` - parse text into a value

use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use mlua::prelude::*;

use crate::lua::convert::{LuaBytes, lua_to_value, value_to_lua};
use crate::util::ksuid::ksuid;
use crate::value::Value;

/// Register the helper functions as Lua globals.
pub fn register_globals(lua: &Lua, base_dir: &Path) -> LuaResult<()> {
  let g = lua.globals();

  g.set("ksuid", lua.create_function(|_, ()| Ok(ksuid()))?)?;

  g.set(
    "uuid_v4",
    lua.create_function(|_, ()| Ok(uuid::Uuid::new_v4().to_string()))?,
  )?;

  g.set(
    "now",
    lua.create_function(|_, ()| Ok(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)))?,
  )?;

  let base_dir = base_dir.to_path_buf();
  g.set(
    "file",
    lua.create_function(move |lua, path: String| {
      let resolved = resolve_path(&base_dir, &path);
      let content = std::fs::read(&resolved)
        .map_err(|e| LuaError::external(format!("cannot read '{}': {}", resolved.display(), e)))?;
      lua.create_string(content)
    })?,
  )?;

  g.set(
    "bytes",
    lua.create_function(|_, value: LuaValue| match value {
      LuaValue::String(s) => Ok(LuaBytes(s.as_bytes().to_vec())),
      LuaValue::UserData(ud) => Ok(LuaBytes(ud.borrow::<LuaBytes>()?.0.clone())),
      other => Err(LuaError::external(format!(
        "bytes() expects a string, got {}",
        other.type_name()
      ))),
    })?,
  )?;

  g.set(
    "format_json",
    lua.create_function(|_, value: LuaValue| {
      let value = lua_to_value(value)?;
      serde_json::to_string_pretty(&value).map_err(LuaError::external)
    })?,
  )?;

  g.set(
    "format_yaml",
    lua.create_function(|_, value: LuaValue| {
      let value = lua_to_value(value)?;
      serde_yaml::to_string(&value).map_err(LuaError::external)
    })?,
  )?;

  g.set(
    "parse_json",
    lua.create_function(|lua, text: LuaString| {
      let json: serde_json::Value = serde_json::from_slice(&text.as_bytes()).map_err(LuaError::external)?;
      value_to_lua(lua, &Value::from(json))
    })?,
  )?;

  g.set(
    "parse_yaml",
    lua.create_function(|lua, text: LuaString| {
      let json: serde_json::Value = serde_yaml::from_slice(&text.as_bytes()).map_err(LuaError::external)?;
      value_to_lua(lua, &Value::from(json))
    })?,
  )?;

  Ok(())
}

fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
  let path = Path::new(path);
  if path.is_absolute() {
    path.to_path_buf()
  } else {
    base_dir.join(path)
  }
}
