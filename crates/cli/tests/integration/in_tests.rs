//! `in` verb tests.

use std::collections::BTreeMap;

use predicates::prelude::*;
use serde_json::json;

use super::common::{BUILD_URL, TestEnv};

#[test]
fn in_writes_version_and_metadata() {
  let env = TestEnv::new();
  let out = env.run("in", json!({ "source": {}, "version": { "id": "1", "ref": "abc" } }));

  assert_eq!(out["version"], json!({ "id": "1", "ref": "abc" }));
  assert!(
    out["metadata"]
      .as_array()
      .unwrap()
      .contains(&json!({ "name": "build_url", "value": BUILD_URL }))
  );

  let version: serde_json::Value = serde_json::from_str(&env.read_file("version.json")).unwrap();
  assert_eq!(version, json!({ "id": "1", "ref": "abc" }));

  let metadata: serde_json::Value = serde_json::from_str(&env.read_file("metadata.json")).unwrap();
  assert_eq!(metadata["build_job"], "first");
}

#[test]
fn in_writes_file_mappings() {
  let env = TestEnv::new();
  env.run(
    "in",
    json!({
      "source": {},
      "version": { "ref": "abc" },
      "params": { "files": {
        "ref.txt": "root = ref",
        "data.json": "root = { ref = ref, job = build_job }",
      } },
    }),
  );

  assert_eq!(env.read_file("ref.txt"), "abc");
  let data: BTreeMap<String, String> = serde_json::from_str(&env.read_file("data.json")).unwrap();
  assert_eq!(data["job"], "first");
  assert_eq!(data["ref"], "abc");
}

#[test]
fn in_strict_coercion_rejects_structured_result() {
  let env = TestEnv::new();
  env
    .keyval_cmd()
    .arg("in")
    .arg(env.dir())
    .write_stdin(
      json!({
        "source": { "file_coercion": "strict" },
        "version": { "id": "1" },
        "params": { "files": { "data.json": "root = this" } },
      })
      .to_string(),
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("'data.json' file mapping returned unsupported type map"));
}

#[test]
fn in_unknown_extension_fails() {
  let env = TestEnv::new();
  env
    .keyval_cmd()
    .arg("in")
    .arg(env.dir())
    .write_stdin(
      json!({
        "version": { "id": "1" },
        "params": { "files": { "data.txt": "root = this" } },
      })
      .to_string(),
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains("try adding a supported file extension"));
}

#[test]
fn in_creates_missing_directory() {
  let env = TestEnv::new();
  let dest = env.path("nested/dest");

  env
    .keyval_cmd()
    .arg("in")
    .arg(&dest)
    .write_stdin(json!({ "version": { "id": "1" } }).to_string())
    .assert()
    .success();

  assert!(dest.join("version.json").exists());
}
