//! `out` verb tests.

use predicates::prelude::*;
use serde_json::json;

use super::common::{BUILD_URL, TestEnv};

#[test]
fn out_maps_build_url() {
  let env = TestEnv::new();
  let out = env.run("out", json!({ "source": null, "params": { "mapping": "url = build_url" } }));
  assert_eq!(out["version"], json!({ "url": BUILD_URL }));
}

#[test]
fn out_defaults_to_identity() {
  let env = TestEnv::new();
  let out = env.run("out", json!({ "source": {} }));

  assert_eq!(
    out["version"],
    json!({
      "build_id": "1234",
      "build_job": "first",
      "build_name": "1",
      "build_pipeline": "test",
      "build_team": "main",
      "build_url": BUILD_URL,
    })
  );
}

#[test]
fn out_includes_optional_context_when_set() {
  let env = TestEnv::new();
  let output = env
    .keyval_cmd()
    .env("BUILD_CREATED_BY", "ci-bot")
    .arg("out")
    .arg(env.dir())
    .write_stdin(json!({ "params": { "mapping": "creator = build_created_by" } }).to_string())
    .assert()
    .success()
    .get_output()
    .clone();

  let out: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(out["version"], json!({ "creator": "ci-bot" }));
}

#[test]
fn out_reports_every_invalid_key() {
  let env = TestEnv::new();
  env
    .keyval_cmd()
    .arg("out")
    .arg(env.dir())
    .write_stdin(json!({ "params": { "mapping": "count = 1\nok = 'yes'\nflag = true" } }).to_string())
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid version key 'count'"))
    .stderr(predicate::str::contains("invalid version key 'flag'"))
    .stderr(predicate::str::contains("'ok'").not());
}

#[test]
fn out_logs_go_to_stderr() {
  let env = TestEnv::new();
  let output = env
    .keyval_cmd()
    .arg("out")
    .arg("--verbose")
    .arg(env.dir())
    .write_stdin(json!({ "params": { "mapping": "id = 'x'" } }).to_string())
    .assert()
    .success()
    .stderr(predicate::str::contains("projected version"))
    .get_output()
    .clone();

  // stdout must stay parseable by the orchestrator
  let out: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(out["version"], json!({ "id": "x" }));
}
