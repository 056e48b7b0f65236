use predicates::prelude::*;
use test_support;

#[test]
fn unknown_sprint_fails_without_writing_anything() {
  let input = test_support::fixture_path("sprint_not_found.json");
  let outdir = test_support::tempdir();
  let target = outdir.path().join("report");

  test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "retrospective", "--sprint", "9999", "--no-prompt", "--input"])
    .arg(&input)
    .arg("--out")
    .arg(&target)
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("No issues returned for sprint '9999'"))
    .stderr(predicate::str::contains("does not exist"));

  assert!(!target.exists(), "no output dir on no-data");
}

#[test]
fn unreadable_input_is_reported_with_its_path() {
  let outdir = test_support::tempdir();
  let missing = outdir.path().join("nope.json");

  test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "planning", "--sprint", "1", "--no-prompt", "--input"])
    .arg(&missing)
    .arg("--out")
    .arg(outdir.path())
    .assert()
    .failure()
    .stderr(predicate::str::contains("nope.json"));
}

#[test]
fn empty_sprint_planning_creates_out_dir_for_manifest() {
  let input = test_support::fixture_path("sprint_empty.json");
  let outdir = test_support::tempdir();
  let target = outdir.path().join("fresh");

  let out = test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "planning", "--sprint", "7", "--no-prompt", "--input"])
    .arg(&input)
    .arg("--out")
    .arg(&target)
    .output()
    .unwrap();

  assert!(out.status.success(), "cli run failed: {}", String::from_utf8_lossy(&out.stderr));
  let ptr: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
  assert_eq!(ptr["files"], serde_json::json!([]));
  assert!(target.join("manifest.json").exists());
}
