//! `check` verb tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::{BUILD_URL, TestEnv};

#[test]
fn check_echoes_prior_version() {
  let env = TestEnv::new();
  let out = env.run(
    "check",
    json!({ "source": { "initial_mapping": "id = 'new'" }, "version": { "id": "old" } }),
  );
  assert_eq!(out, json!([{ "id": "old" }]));
}

#[test]
fn check_emits_initial_version() {
  let env = TestEnv::new();
  let out = env.run(
    "check",
    json!({ "source": { "initial_mapping": "url = build_url\nstage = 'initial'" } }),
  );
  assert_eq!(out, json!([{ "url": BUILD_URL, "stage": "initial" }]));
}

#[test]
fn check_without_mapping_is_empty() {
  let env = TestEnv::new();
  assert_eq!(env.run("check", json!({ "source": null })), json!([]));
}

#[test]
fn check_reports_invalid_initial_mapping() {
  let env = TestEnv::new();
  env
    .keyval_cmd()
    .arg("check")
    .write_stdin(json!({ "source": { "initial_mapping": "root = 'text'" } }).to_string())
    .assert()
    .failure()
    .stderr(predicate::str::contains("'initial_mapping' returned invalid result, expected map, got: string"));
}
