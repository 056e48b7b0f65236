use std::path::Path;

use test_support;

fn run(mode: &str, extra: &[&str], out: &Path) -> serde_json::Value {
  let input = test_support::fixture_path("sprint_mixed.json");
  let output = test_support::cmd_bin(test_support::BIN)
    .args(["--mode", mode, "--sprint", "12", "--no-prompt", "--now-override", "2025-08-15T12:00:00"])
    .args(extra)
    .arg("--input")
    .arg(&input)
    .arg("--out")
    .arg(out)
    .output()
    .unwrap();

  assert!(output.status.success(), "cli run failed: {}", String::from_utf8_lossy(&output.stderr));
  serde_json::from_slice(&output.stdout).expect("stdout is the JSON pointer")
}

fn read(dir: &Path, file: &str) -> String {
  std::fs::read_to_string(dir.join(file)).unwrap_or_else(|e| panic!("reading {}: {e}", file))
}

#[test]
fn retrospective_writes_category_tables_and_summary() {
  let outdir = test_support::tempdir();
  let ptr = run("retrospective", &[], outdir.path());

  assert_eq!(ptr["manifest"], "manifest.json");
  assert_eq!(
    ptr["files"],
    serde_json::json!(["bug.csv", "story.csv", "tech-debt.csv", "p1.csv", "additional.csv", "summary.csv"])
  );
  let dir = ptr["dir"].as_str().expect("dir string");
  assert!(Path::new(dir).is_absolute());

  assert_eq!(
    read(outdir.path(), "story.csv"),
    "summary,key,name,time,percentage,comments,epic\n\
     Receipt emails,UNF-1,N/A,0.5d,7%,,\n\
     Passkey login,STR-1,N/A,0d,0%,stretch,EP-0 - Auth\n\
     Checkout with saved cards,STORY-1,Ana Lima,3.5d,47%,,EP-1 - Checkout\n"
  );
  assert_eq!(
    read(outdir.path(), "p1.csv"),
    "summary,key,name,time,percentage,comments,epic\nPayments down for EU users,BUG-1,Sam Ortiz,1d,13%,,\n"
  );
  assert_eq!(
    read(outdir.path(), "summary.csv"),
    "totalDevDays,unplannedTaskDays,techDebt,bugsAndP1s,productWork\n7.5,1,13%,20%,67%\n"
  );
  assert!(!outdir.path().join("unfinished.csv").exists());
}

#[test]
fn planning_writes_delivery_columns_and_no_summary() {
  let outdir = test_support::tempdir();
  let ptr = run("planning", &[], outdir.path());

  assert_eq!(ptr["files"].as_array().unwrap().len(), 5);
  assert!(!outdir.path().join("summary.csv").exists());
  assert_eq!(
    read(outdir.path(), "story.csv"),
    "summary,key,name,estimation,comments,estimatedDelivery,epic\n\
     Receipt emails,UNF-1,N/A,,,This Sprint,\n\
     Passkey login,STR-1,N/A,2d,stretch,Next Sprint,EP-0 - Auth\n\
     Checkout with saved cards,STORY-1,Ana Lima,3d,,This Sprint,EP-1 - Checkout\n"
  );
  assert_eq!(
    read(outdir.path(), "tech-debt.csv"),
    "summary,key,name,estimation,comments,estimatedDelivery,epic\nDrop legacy session store,TD-1,N/A,1d,,This Sprint,\n"
  );
}

#[test]
fn track_unfinished_moves_labelled_issues_to_their_own_table() {
  let outdir = test_support::tempdir();
  let ptr = run("retrospective", &["--track-unfinished"], outdir.path());

  let files = ptr["files"].as_array().unwrap();
  assert_eq!(files[files.len() - 2], "unfinished.csv");
  assert_eq!(
    read(outdir.path(), "unfinished.csv"),
    "summary,key,name,time,percentage,comments,epic\nReceipt emails,UNF-1,N/A,0.5d,7%,,\n"
  );
  assert!(!read(outdir.path(), "story.csv").contains("UNF-1"));
  // unfinished work still counts towards the sprint total
  assert!(read(outdir.path(), "summary.csv").ends_with("7.5,1,13%,20%,67%\n"));
}

#[test]
fn rerun_overwrites_previous_tables() {
  let outdir = test_support::tempdir();
  run("retrospective", &["--track-unfinished"], outdir.path());
  run("retrospective", &["--track-unfinished"], outdir.path());
  let story = read(outdir.path(), "story.csv");
  assert_eq!(story.lines().count(), 3, "header plus two rows, not appended");
}
