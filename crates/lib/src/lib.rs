//! keyval-lib: version generation and data projection for the keyval resource.
//!
//! The resource carries arbitrary string key/value data between the jobs of a
//! pipeline. This crate provides:
//! - `BuildContext`: the facts about the running build, read from the environment
//! - `Evaluator`: the mapping-expression interface, implemented with Lua
//! - `project`: turns a mapping result into a validated `Version`
//! - `materialize`: writes per-file mapping results into a working directory
//! - `Resource`: the `check`, `in` and `out` verbs composed from the above

pub mod consts;
pub mod context;
pub mod eval;
pub mod lua;
pub mod materialize;
pub mod project;
pub mod protocol;
pub mod resource;
pub mod util;
pub mod value;
pub mod version;
