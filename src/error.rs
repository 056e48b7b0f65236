// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed errors for the per-issue, per-sprint and fetch boundaries of the pipeline
// role: errors/types
// outputs: IssueError (per-issue, non-fatal), SprintError (run-level), SourceError (fetch)
// invariants:
// - IssueError never aborts a run; callers collect it and continue
// - SprintError::NoData is raised before any output file is written
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;
use thiserror::Error;

/// Failure to normalize a single raw issue. The run continues without it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum IssueError {
  #[error("issue {key}: logged time '{value}' is not a number followed by a unit")]
  MalformedDuration { key: String, value: String },
}

impl IssueError {
  pub fn key(&self) -> &str {
    match self {
      IssueError::MalformedDuration { key, .. } => key,
    }
  }
}

#[derive(Error, Debug)]
pub enum SprintError {
  #[error("No issues returned for sprint '{sprint}'{}", format_messages(.messages))]
  NoData { sprint: String, messages: Vec<String> },
}

fn format_messages(messages: &[String]) -> String {
  if messages.is_empty() {
    String::new()
  } else {
    format!(": {}", messages.join("; "))
  }
}

#[derive(Error, Debug)]
pub enum SourceError {
  #[error("request to {url} failed with HTTP {status}")]
  Status { url: String, status: u16 },

  #[error("request to {url} failed: {message}")]
  Transport { url: String, message: String },

  #[error("failed to read sprint payload from '{path}': {source}")]
  ReadFile {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("sprint payload is not valid JSON: {0}")]
  Json(#[from] serde_json::Error),

  #[error("sprint payload response could not be decoded: {0}")]
  Decode(#[source] std::io::Error),
}
