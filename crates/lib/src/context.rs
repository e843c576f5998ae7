//! Build context: the facts about the running build that every mapping can read.
//!
//! The orchestrator exposes build information through environment variables.
//! This is the only place they are read; everything downstream works on the
//! [`Document`] produced here.

use std::collections::BTreeMap;

use crate::consts::*;
use crate::value::{Document, Value};
use crate::version::{Metadata, metadata_from};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildContext {
  pub id: String,
  pub name: String,
  pub job: String,
  pub pipeline: String,
  pub team: String,
  pub instance_vars: Option<String>,
  pub created_by: Option<String>,
  pub external_url: String,
}

impl BuildContext {
  /// Read the build context from the process environment.
  pub fn from_env() -> Self {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  /// Build the context from an arbitrary variable lookup.
  ///
  /// Missing variables become empty strings. The instance vars and creator are
  /// kept only when non-empty.
  pub fn from_lookup<F>(lookup: F) -> Self
  where
    F: Fn(&str) -> Option<String>,
  {
    let var = |key: &str| lookup(key).unwrap_or_default();
    let optional = |key: &str| lookup(key).filter(|v| !v.is_empty());

    Self {
      id: var(ENV_BUILD_ID),
      name: var(ENV_BUILD_NAME),
      job: var(ENV_BUILD_JOB_NAME),
      pipeline: var(ENV_BUILD_PIPELINE_NAME),
      team: var(ENV_BUILD_TEAM_NAME),
      instance_vars: optional(ENV_BUILD_PIPELINE_INSTANCE_VARS),
      created_by: optional(ENV_BUILD_CREATED_BY),
      external_url: var(ENV_ATC_EXTERNAL_URL),
    }
  }

  /// Link to the build in the orchestrator's web UI.
  pub fn url(&self) -> String {
    format!("{}/builds/{}", self.external_url, self.id)
  }

  /// The context as a mapping input document.
  pub fn document(&self) -> Document {
    let mut doc = BTreeMap::from([
      ("build_id".to_string(), Value::from(self.id.as_str())),
      ("build_name".to_string(), Value::from(self.name.as_str())),
      ("build_job".to_string(), Value::from(self.job.as_str())),
      ("build_pipeline".to_string(), Value::from(self.pipeline.as_str())),
      ("build_team".to_string(), Value::from(self.team.as_str())),
      ("build_url".to_string(), Value::from(self.url())),
    ]);
    if let Some(vars) = &self.instance_vars {
      doc.insert("build_instance_vars".to_string(), Value::from(vars.as_str()));
    }
    if let Some(creator) = &self.created_by {
      doc.insert("build_created_by".to_string(), Value::from(creator.as_str()));
    }
    doc
  }

  /// The context as orchestrator metadata, sorted by name.
  pub fn metadata(&self) -> Vec<Metadata> {
    metadata_from(&self.document())
  }
}
