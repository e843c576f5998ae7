//! Lua implementation of the mapping evaluator.
//!
//! Mappings are Lua 5.4 chunks run in a per-mapping environment where bare
//! names read from the input document and assignments build the result.
//!
//! # Submodules
//!
//! - [`convert`] - Conversion between Lua values and [`crate::value::Value`]
//! - [`evaluator`] - [`LuaEvaluator`], the [`crate::eval::Evaluator`] implementation
//! - [`globals`] - Helper functions available to every mapping (`ksuid()`, `file()`, ...)
//! - [`runtime`] - Lua VM creation with a restricted standard library

pub mod convert;
pub mod evaluator;
pub mod globals;
pub mod runtime;

pub use evaluator::{LuaEvaluator, LuaMapping};
