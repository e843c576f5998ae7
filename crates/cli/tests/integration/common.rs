//! Shared test helpers for CLI integration tests.

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// Build environment every test runs under.
pub const BUILD_ENV: &[(&str, &str)] = &[
  ("BUILD_ID", "1234"),
  ("BUILD_NAME", "1"),
  ("BUILD_JOB_NAME", "first"),
  ("BUILD_PIPELINE_NAME", "test"),
  ("BUILD_TEAM_NAME", "main"),
  ("ATC_EXTERNAL_URL", "https://concourse.example.com"),
];

pub const BUILD_URL: &str = "https://concourse.example.com/builds/1234";

/// Isolated test environment.
///
/// Each test gets its own temporary working directory.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  pub fn dir(&self) -> &Path {
    self.temp.path()
  }

  /// Write a file relative to the working directory.
  pub fn write_file(&self, relative_path: &str, content: &str) {
    let path = self.dir().join(relative_path);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }

  pub fn read_file(&self, relative_path: &str) -> String {
    std::fs::read_to_string(self.dir().join(relative_path))
      .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative_path, e))
  }

  pub fn path(&self, relative_path: &str) -> PathBuf {
    self.dir().join(relative_path)
  }

  /// Get a pre-configured Command for the keyval binary.
  ///
  /// Sets the build variables from [`BUILD_ENV`], clears the optional ones and
  /// runs from the working directory.
  pub fn keyval_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("keyval");
    cmd.current_dir(self.dir());
    for (key, value) in BUILD_ENV {
      cmd.env(key, value);
    }
    cmd.env_remove("BUILD_PIPELINE_INSTANCE_VARS");
    cmd.env_remove("BUILD_CREATED_BY");
    cmd.env_remove("KEYVAL_LOG");
    cmd
  }

  /// Run a verb with `request` on stdin and parse the JSON written to stdout.
  pub fn run(&self, verb: &str, request: serde_json::Value) -> serde_json::Value {
    let mut cmd = self.keyval_cmd();
    cmd.arg(verb);
    if verb != "check" {
      cmd.arg(self.dir());
    }

    let output = cmd.write_stdin(request.to_string()).assert().success().get_output().clone();
    serde_json::from_slice(&output.stdout)
      .unwrap_or_else(|e| panic!("{} wrote invalid JSON: {}", verb, e))
  }
}
