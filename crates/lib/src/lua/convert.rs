//! Conversion between Lua values and [`Value`].

use std::collections::BTreeMap;

use mlua::prelude::*;

use crate::value::{Document, Value};

/// Tables nested deeper than this are rejected (this also catches cycles).
const MAX_DEPTH: usize = 64;

/// A raw byte sequence, created from Lua with `bytes(s)`.
///
/// Lua strings are byte strings already; this wrapper marks data that should
/// be written verbatim rather than treated as text.
#[derive(Debug, Clone)]
pub struct LuaBytes(pub Vec<u8>);

impl LuaUserData for LuaBytes {
  fn add_methods<M: LuaUserDataMethods<Self>>(methods: &mut M) {
    methods.add_method("string", |lua, this, ()| lua.create_string(&this.0));
    methods.add_meta_method(LuaMetaMethod::Len, |_, this, ()| Ok(this.0.len()));
    methods.add_meta_method(LuaMetaMethod::ToString, |_, this, ()| {
      Ok(String::from_utf8_lossy(&this.0).into_owned())
    });
  }
}

/// Convert a Lua value returned by a mapping into a [`Value`].
pub fn lua_to_value(value: LuaValue) -> LuaResult<Value> {
  convert(value, 0)
}

fn convert(value: LuaValue, depth: usize) -> LuaResult<Value> {
  if depth > MAX_DEPTH {
    return Err(LuaError::external(format!(
      "value nested deeper than {} levels (cyclic table?)",
      MAX_DEPTH
    )));
  }

  match value {
    LuaValue::Nil => Ok(Value::Null),
    LuaValue::Boolean(b) => Ok(Value::Bool(b)),
    LuaValue::Integer(i) => Ok(Value::Integer(i)),
    LuaValue::Number(n) => Ok(Value::Float(n)),
    LuaValue::String(s) => match s.to_str() {
      Ok(text) => Ok(Value::String(text.to_string())),
      Err(_) => Ok(Value::Bytes(s.as_bytes().to_vec())),
    },
    LuaValue::UserData(ud) => match ud.borrow::<LuaBytes>() {
      Ok(bytes) => Ok(Value::Bytes(bytes.0.clone())),
      Err(_) => Err(LuaError::external("unsupported userdata value")),
    },
    LuaValue::Table(t) => {
      // A non-empty 1..n sequence with no other keys is an array
      let len = t.raw_len();
      if len > 0 && t.pairs::<LuaValue, LuaValue>().count() == len {
        let mut items = Vec::with_capacity(len);
        for item in t.sequence_values::<LuaValue>() {
          items.push(convert(item?, depth + 1)?);
        }
        return Ok(Value::Array(items));
      }

      let mut map = BTreeMap::new();
      for pair in t.pairs::<LuaValue, LuaValue>() {
        let (k, v) = pair?;
        let key = match k {
          LuaValue::String(s) => s.to_str()?.to_string(),
          LuaValue::Integer(i) => i.to_string(),
          other => {
            return Err(LuaError::external(format!(
              "unsupported table key of type {}",
              other.type_name()
            )));
          }
        };
        map.insert(key, convert(v, depth + 1)?);
      }
      Ok(Value::Map(map))
    }
    other => Err(LuaError::external(format!(
      "unsupported value of type {}",
      other.type_name()
    ))),
  }
}

/// Convert a [`Value`] into a Lua value. Nulls become `nil`.
pub fn value_to_lua(lua: &Lua, value: &Value) -> LuaResult<LuaValue> {
  match value {
    Value::Null => Ok(LuaValue::Nil),
    Value::Bool(b) => Ok(LuaValue::Boolean(*b)),
    Value::Integer(i) => Ok(LuaValue::Integer(*i)),
    Value::Float(n) => Ok(LuaValue::Number(*n)),
    Value::String(s) => Ok(LuaValue::String(lua.create_string(s)?)),
    Value::Bytes(b) => Ok(LuaValue::UserData(lua.create_userdata(LuaBytes(b.clone()))?)),
    Value::Array(items) => {
      let table = lua.create_table_with_capacity(items.len(), 0)?;
      for (i, item) in items.iter().enumerate() {
        table.raw_set(i + 1, value_to_lua(lua, item)?)?;
      }
      Ok(LuaValue::Table(table))
    }
    Value::Map(map) => Ok(LuaValue::Table(map_to_table(lua, map)?)),
  }
}

/// Convert a document into a fresh Lua table.
pub fn document_to_lua(lua: &Lua, doc: &Document) -> LuaResult<LuaTable> {
  map_to_table(lua, doc)
}

fn map_to_table(lua: &Lua, map: &BTreeMap<String, Value>) -> LuaResult<LuaTable> {
  let table = lua.create_table_with_capacity(0, map.len())?;
  for (k, v) in map {
    table.raw_set(k.as_str(), value_to_lua(lua, v)?)?;
  }
  Ok(table)
}
