use predicates::prelude::*;
use test_support;

#[test]
fn missing_mode_without_prompt_is_a_usage_error() {
  let input = test_support::fixture_path("sprint_mixed.json");
  let outdir = test_support::tempdir();

  test_support::cmd_bin(test_support::BIN)
    .args(["--sprint", "12", "--no-prompt", "--out"])
    .arg(outdir.path())
    .arg("--input")
    .arg(&input)
    .assert()
    .failure()
    .stderr(predicate::str::contains("--mode"));
}

#[test]
fn non_interactive_stdin_never_prompts() {
  let input = test_support::fixture_path("sprint_mixed.json");

  // assert_cmd gives the child a pipe, not a terminal
  test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "planning", "--input"])
    .arg(&input)
    .write_stdin("42\n")
    .assert()
    .failure()
    .stderr(predicate::str::contains("--sprint"));
}

#[test]
fn env_supplies_run_parameters() {
  let input = test_support::fixture_path("sprint_mixed.json");
  let outdir = test_support::tempdir();

  let out = test_support::cmd_bin(test_support::BIN)
    .env("REPORT_TYPE", "sprint-report")
    .env("SPRINT", "12")
    .args(["--no-prompt", "--input"])
    .arg(&input)
    .arg("--out")
    .arg(outdir.path())
    .output()
    .unwrap();

  assert!(out.status.success(), "cli run failed: {}", String::from_utf8_lossy(&out.stderr));
  assert!(outdir.path().join("summary.csv").exists(), "sprint-report is the retrospective alias");
}

#[test]
fn unknown_mode_is_rejected_by_the_parser() {
  test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "weekly", "--sprint", "1", "--no-prompt"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("weekly"));
}

#[test]
fn unsafe_sprint_id_is_rejected_before_fetching() {
  test_support::cmd_bin(test_support::BIN)
    .args(["--mode", "planning", "--sprint", "1/../2", "--no-prompt", "--base-url", "http://127.0.0.1:9"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("sprint id"));
}
