//! CLI smoke tests for chartdeps.
//!
//! These tests verify that all CLI commands run without panicking and
//! return appropriate exit codes.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a Command for the chartdeps binary.
fn chartdeps_cmd() -> Command {
  cargo_bin_cmd!("chartdeps")
}

/// Create a temp directory with a state file.
fn temp_state(content: &str) -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("helmfile.yaml"), content).unwrap();
  temp
}

/// State with only local charts.
const LOCAL_STATE: &str = r#"
releases:
- name: app
  chart: ./charts/app
"#;

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  chartdeps_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  chartdeps_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("chartdeps"));
}

#[test]
fn subcommand_help_lists_helm_binary() {
  chartdeps_cmd()
    .args(["deps", "--help"])
    .assert()
    .success()
    .stdout(predicate::str::contains("--helm-binary"));
}

// =============================================================================
// Commands
// =============================================================================

#[test]
fn missing_state_file_fails() {
  let temp = TempDir::new().unwrap();

  chartdeps_cmd()
    .current_dir(temp.path())
    .arg("build")
    .assert()
    .code(1)
    .stderr(predicate::str::contains("Failed to load state file"));
}

#[test]
fn lock_without_lock_file_reports_it() {
  let temp = temp_state(LOCAL_STATE);

  chartdeps_cmd()
    .current_dir(temp.path())
    .arg("lock")
    .assert()
    .success()
    .stdout(predicate::str::contains("No lock file"));
}

#[test]
fn deps_with_only_local_charts_is_noop() {
  let temp = temp_state(LOCAL_STATE);

  chartdeps_cmd()
    .current_dir(temp.path())
    .args(["deps", "--helm-binary", "chartdeps-no-such-helm"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No chart dependencies"));

  assert!(!temp.path().join("helmfile.lock").exists());
}

#[test]
fn build_with_only_local_charts_prints_state() {
  let temp = temp_state(LOCAL_STATE);

  chartdeps_cmd()
    .current_dir(temp.path())
    .arg("build")
    .assert()
    .success()
    .stdout(predicate::str::contains("./charts/app"));
}

#[test]
fn file_can_be_given_by_env() {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("prod.yaml"), LOCAL_STATE).unwrap();

  chartdeps_cmd()
    .env("CHARTDEPS_FILE", temp.path().join("prod.yaml"))
    .arg("lock")
    .assert()
    .success()
    .stdout(predicate::str::contains("prod.lock"));
}
