//! Put followed by get, as a pipeline would run them.

use std::collections::BTreeMap;

use serde_json::json;

use super::common::{BUILD_URL, TestEnv};

const REF: &str = "5541858611c514f02fd7e3f34d3fcad17908d933";

#[test]
fn put_then_get_round_trip() {
  let env = TestEnv::new();
  env.write_file("repo/ref", REF);

  let put = env.run(
    "out",
    json!({
      "source": null,
      "params": { "mapping": "id = ksuid()\nref = file(\"repo/ref\"):upper()\nurl = build_url" },
    }),
  );
  let version = put["version"].clone();
  assert_eq!(version["id"].as_str().unwrap().len(), 27);
  assert_eq!(version["ref"], REF.to_uppercase());
  assert_eq!(version["url"], BUILD_URL);

  env.run(
    "in",
    json!({
      "source": null,
      "version": version,
      "params": { "files": { "test.yml": "root = format_yaml(this)" } },
    }),
  );

  let written: serde_json::Value = serde_json::from_str(&env.read_file("version.json")).unwrap();
  assert_eq!(written, version);

  let merged: BTreeMap<String, String> = serde_yaml::from_str(&env.read_file("test.yml")).unwrap();
  assert_eq!(merged["build_id"], "1234");
  assert_eq!(merged["id"], version["id"].as_str().unwrap());
  assert_eq!(merged["ref"], REF.to_uppercase());
  assert_eq!(merged["url"], BUILD_URL);
}

#[cfg(unix)]
#[test]
fn dispatches_on_invocation_name() {
  use std::os::unix::fs::symlink;

  let env = TestEnv::new();
  let bin_dir = env.path("opt/resource");
  std::fs::create_dir_all(&bin_dir).unwrap();
  for verb in ["check", "in", "out"] {
    symlink(env!("CARGO_BIN_EXE_keyval"), bin_dir.join(verb)).unwrap();
  }

  let output = assert_cmd::Command::new(bin_dir.join("check"))
    .envs(super::common::BUILD_ENV.iter().copied())
    .write_stdin(json!({ "source": { "initial_mapping": "url = build_url" } }).to_string())
    .assert()
    .success()
    .get_output()
    .clone();
  let versions: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(versions, json!([{ "url": BUILD_URL }]));

  let work = env.path("work");
  assert_cmd::Command::new(bin_dir.join("in"))
    .arg(&work)
    .write_stdin(json!({ "version": { "id": "1" } }).to_string())
    .assert()
    .success();
  assert!(work.join("version.json").exists());
}
