// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Build and write the per-run manifest that indexes the written tables
// role: persistence/manifest
// inputs: sprint id, mode, source description, generated_at, counts, TableEntry[], rejected issues
// outputs: manifest.json written next to the CSV tables
// side_effects: Writes to filesystem
// invariants:
// - tables[] keeps the order the tables were written (category order, summary last)
// - file paths in entries are relative to the output dir
// - generated_at is serialized in %Y-%m-%dT%H:%M:%S (local)
// errors: IO errors surfaced with full path context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;

use crate::error::IssueError;
use crate::model::ReportMode;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TableEntry {
  pub name: String,
  pub file: String,
  pub rows: usize,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IssueCounts {
  pub fetched: usize,
  pub skipped: usize,
  pub excluded: usize,
  pub rejected: usize,
  pub reported: usize,
  pub not_reported: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RejectedIssue {
  pub key: String,
  pub reason: String,
}

impl From<&IssueError> for RejectedIssue {
  fn from(e: &IssueError) -> Self {
    Self { key: e.key().to_string(), reason: e.to_string() }
  }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunManifest {
  pub sprint: String,
  pub mode: ReportMode,
  pub source: String,
  pub generated_at: String,
  pub total_time_days: f64,
  pub counts: IssueCounts,
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub rejected: Vec<RejectedIssue>,
  pub tables: Vec<TableEntry>,
}

impl RunManifest {
  pub fn new(sprint: &str, mode: ReportMode, source: String, generated_at: DateTime<Local>) -> Self {
    Self {
      sprint: sprint.to_string(),
      mode,
      source,
      generated_at: generated_at.format("%Y-%m-%dT%H:%M:%S").to_string(),
      total_time_days: 0.0,
      counts: IssueCounts::default(),
      rejected: Vec::new(),
      tables: Vec::new(),
    }
  }

  pub fn push_table(&mut self, name: &str, file: &Path, rows: usize) {
    let file = file.file_name().map(|f| f.to_string_lossy().to_string()).unwrap_or_else(|| format!("{}.csv", name));
    self.tables.push(TableEntry { name: name.to_string(), file, rows });
  }

  /// Writes `<dir>/manifest.json`, creating `dir` when no table did.
  pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating output dir {}", dir.display()))?;
    let path = dir.join("manifest.json");
    let bytes = serde_json::to_vec_pretty(self)?;
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
  }
}
