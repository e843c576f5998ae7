//! [`Evaluator`] implementation backed by Lua.
//!
//! Each compiled mapping owns an empty environment table. Before every run the
//! table's metatable is replaced so that:
//! - reading `this` yields the input document, `root` the result built so far
//! - reading any other bare name yields a document field, then a global
//! - `root = v` replaces the result, `name = v` and `root.name = v` set a
//!   field of the result (root starts out as an empty table on first use)
//! - `root = this` copies the input, so later field writes leave `this` intact
//!
//! Reading an unknown bare name is an error; optional fields are read through
//! `this.field`, which yields `nil` when absent.

use std::path::Path;

use mlua::prelude::*;
use tracing::debug;

use crate::eval::{CompileError, EvaluationError, Evaluator};
use crate::lua::convert::{document_to_lua, lua_to_value};
use crate::lua::runtime;
use crate::value::{Document, Value};

/// Slot key holding the mapping result inside the per-run state table.
const ROOT: &str = "root";
const THIS: &str = "this";

pub struct LuaEvaluator {
  lua: Lua,
}

/// A mapping compiled by [`LuaEvaluator`].
pub struct LuaMapping {
  name: String,
  env: LuaTable,
  chunk: LuaFunction,
}

impl LuaEvaluator {
  /// Create an evaluator whose `file()` helper resolves against `base_dir`.
  pub fn new(base_dir: &Path) -> LuaResult<Self> {
    Ok(Self {
      lua: runtime::create_runtime(base_dir)?,
    })
  }

  fn run(&self, mapping: &LuaMapping, doc: &Document) -> LuaResult<Value> {
    let this = document_to_lua(&self.lua, doc)?;
    let state = self.lua.create_table()?;
    mapping
      .env
      .set_metatable(Some(mapping_metatable(&self.lua, this, state.clone())?))?;

    let returned: LuaValue = mapping.chunk.call(())?;
    let result = if returned.is_nil() {
      state.raw_get::<LuaValue>(ROOT)?
    } else {
      returned
    };

    lua_to_value(result)
  }
}

impl Evaluator for LuaEvaluator {
  type Compiled = LuaMapping;

  fn compile(&self, name: &str, source: &str) -> Result<LuaMapping, CompileError> {
    let env = self
      .lua
      .create_table()
      .map_err(|e| CompileError::new(e.to_string()))?;

    let chunk = self
      .lua
      .load(source)
      .set_name(format!("={}", name))
      .set_environment(env.clone())
      .into_function()
      .map_err(|e| CompileError::new(e.to_string()))?;

    debug!(mapping = name, "compiled mapping");

    Ok(LuaMapping {
      name: name.to_string(),
      env,
      chunk,
    })
  }

  fn evaluate(&self, mapping: &LuaMapping, doc: &Document) -> Result<Value, EvaluationError> {
    let value = self
      .run(mapping, doc)
      .map_err(|e| EvaluationError::new(e.to_string()))?;
    debug!(mapping = %mapping.name, result = value.type_name(), "evaluated mapping");
    Ok(value)
  }
}

/// Build the metatable routing an environment's reads and writes for one run.
fn mapping_metatable(lua: &Lua, this: LuaTable, state: LuaTable) -> LuaResult<LuaTable> {
  let globals = lua.globals();
  let mt = lua.create_table()?;

  let index_state = state.clone();
  let index_this = this.clone();
  mt.set(
    "__index",
    lua.create_function(move |lua, (_, key): (LuaTable, LuaValue)| -> LuaResult<LuaValue> {
      let LuaValue::String(key) = key else {
        return Ok(LuaValue::Nil);
      };
      let name = key.to_str()?.to_string();

      match name.as_str() {
        ROOT => return root_value(lua, &index_state),
        THIS => return Ok(LuaValue::Table(index_this.clone())),
        _ => {}
      }

      for scope in [&index_this, &globals] {
        let value: LuaValue = scope.raw_get(name.as_str())?;
        if !value.is_nil() {
          return Ok(value);
        }
      }

      Err(LuaError::external(format!(
        "undefined name '{}' (use this.{} for optional fields)",
        name, name
      )))
    })?,
  )?;

  mt.set(
    "__newindex",
    lua.create_function(move |lua, (_, key, value): (LuaTable, String, LuaValue)| -> LuaResult<()> {
      match key.as_str() {
        // The input document stays read-only: root gets its own copy.
        ROOT => match value {
          LuaValue::Table(t) if t == this => state.raw_set(ROOT, shallow_copy(lua, &this)?),
          value => state.raw_set(ROOT, value),
        },
        THIS => Err(LuaError::external("cannot assign to 'this'")),
        _ => match root_value(lua, &state)? {
          LuaValue::Table(root) => root.raw_set(key, value),
          other => Err(LuaError::external(format!(
            "cannot assign '{}' on a root of type {}",
            key,
            other.type_name()
          ))),
        },
      }
    })?,
  )?;

  Ok(mt)
}

/// The current root, created as an empty table on first use.
fn root_value(lua: &Lua, state: &LuaTable) -> LuaResult<LuaValue> {
  match state.raw_get::<LuaValue>(ROOT)? {
    LuaValue::Nil => {
      let root = lua.create_table()?;
      state.raw_set(ROOT, root.clone())?;
      Ok(LuaValue::Table(root))
    }
    value => Ok(value),
  }
}

fn shallow_copy(lua: &Lua, table: &LuaTable) -> LuaResult<LuaTable> {
  let copy = lua.create_table()?;
  for pair in table.pairs::<LuaValue, LuaValue>() {
    let (k, v) = pair?;
    copy.raw_set(k, v)?;
  }
  Ok(copy)
}
