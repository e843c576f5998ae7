//! Mapping-expression evaluation interface.
//!
//! The projector and the materializer only need two capabilities: turn a
//! mapping source into something executable, and run it against a document.
//! [`crate::lua::LuaEvaluator`] is the implementation used by the resource.

use crate::value::{Document, Value};

/// A mapping failed to compile (syntax or other load-time error).
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct CompileError {
  pub message: String,
}

/// A compiled mapping raised an error while running.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct EvaluationError {
  pub message: String,
}

impl CompileError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

impl EvaluationError {
  pub fn new(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
    }
  }
}

pub trait Evaluator {
  type Compiled;

  /// Compile `source`. `name` labels the mapping in diagnostics.
  fn compile(&self, name: &str, source: &str) -> Result<Self::Compiled, CompileError>;

  /// Run a compiled mapping against `doc`.
  fn evaluate(&self, mapping: &Self::Compiled, doc: &Document) -> Result<Value, EvaluationError>;
}
