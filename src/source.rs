// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fetch a sprint's raw issue JSON (Jira agile REST, a local file, or an env fixture) and extract the issue list
// role: source/tracker-api
// inputs: sprint id; base URL + credentials (HTTP) or a file path; env SPRINT_REPORT_TEST_SPRINT_JSON (fixture)
// outputs: serde_json::Value payloads; SprintPayload with typed RawIssue values
// side_effects: Network GET to {base}/rest/agile/1.0/sprint/{id}/issue; file reads
// invariants:
// - Payload without an `issues` array is the no-data condition, never a panic
// - A single undecodable issue is skipped with a warning; the rest of the sprint survives
// - HTTP 404 bodies are still parsed so Jira's errorMessages reach the operator
// - Credentials never appear in logs or errors
// errors: Transport/status/JSON failures are terminal (SourceError); no retry
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::PathBuf;
use std::time::Duration;

use base64::Engine;
use tracing::{debug, warn};

use crate::error::{SourceError, SprintError};
use crate::ext::serde_json::JsonFetch;
use crate::model::RawIssue;

pub const ISSUE_FIELDS: &str = "epic,parent,summary,key,status,issuetype,labels,assignee,timetracking";
pub const FIXTURE_ENV: &str = "SPRINT_REPORT_TEST_SPRINT_JSON";

// --- Trait seam for the tracker ---
pub trait IssueSource {
  fn fetch_sprint(&self, sprint_id: &str) -> Result<serde_json::Value, SourceError>;

  /// Human-readable origin for logs and the run manifest.
  fn describe(&self) -> String;
}

#[derive(Clone)]
pub enum Auth {
  /// `user:api-token`, sent as HTTP Basic.
  Basic(String),
  Bearer(String),
}

impl Auth {
  fn header_value(&self) -> String {
    match self {
      Auth::Basic(pair) => format!("Basic {}", base64::engine::general_purpose::STANDARD.encode(pair)),
      Auth::Bearer(token) => format!("Bearer {}", token),
    }
  }
}

impl std::fmt::Debug for Auth {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Auth::Basic(_) => f.write_str("Basic(<redacted>)"),
      Auth::Bearer(_) => f.write_str("Bearer(<redacted>)"),
    }
  }
}

pub struct JiraHttpSource {
  base_url: String,
  auth: Option<Auth>,
  max_results: u32,
  agent: ureq::Agent,
}

impl JiraHttpSource {
  pub fn new(base_url: &str, auth: Option<Auth>, max_results: u32) -> Self {
    let agent = ureq::AgentBuilder::new().timeout(Duration::from_secs(30)).build();

    Self {
      base_url: base_url.trim_end_matches('/').to_string(),
      auth,
      max_results,
      agent,
    }
  }

  pub fn sprint_url(&self, sprint_id: &str) -> String {
    format!("{}/rest/agile/1.0/sprint/{}/issue", self.base_url, sprint_id)
  }
}

impl IssueSource for JiraHttpSource {
  fn fetch_sprint(&self, sprint_id: &str) -> Result<serde_json::Value, SourceError> {
    let url = self.sprint_url(sprint_id);
    debug!("GET {} (maxResults={})", url, self.max_results);

    let mut req = self
      .agent
      .get(&url)
      .query("fields", ISSUE_FIELDS)
      .query("maxResults", &self.max_results.to_string())
      .set("Accept", "application/json")
      .set("User-Agent", "sprint-report");

    if let Some(auth) = &self.auth {
      req = req.set("Authorization", &auth.header_value());
    }

    match req.call() {
      Ok(resp) => resp.into_json::<serde_json::Value>().map_err(SourceError::Decode),
      // Jira answers unknown sprints with 404 and an errorMessages body
      Err(ureq::Error::Status(404, resp)) => resp.into_json::<serde_json::Value>().map_err(SourceError::Decode),
      Err(ureq::Error::Status(status, _)) => Err(SourceError::Status { url, status }),
      Err(e) => Err(SourceError::Transport { url, message: e.to_string() }),
    }
  }

  fn describe(&self) -> String {
    self.base_url.clone()
  }
}

pub struct FileSource {
  path: PathBuf,
}

impl FileSource {
  pub fn new(path: impl Into<PathBuf>) -> Self {
    Self { path: path.into() }
  }
}

impl IssueSource for FileSource {
  fn fetch_sprint(&self, sprint_id: &str) -> Result<serde_json::Value, SourceError> {
    debug!("reading sprint {} from {}", sprint_id, self.path.display());
    let text = std::fs::read_to_string(&self.path).map_err(|e| SourceError::ReadFile {
      path: self.path.clone(),
      source: e,
    })?;
    Ok(serde_json::from_str(&text)?)
  }

  fn describe(&self) -> String {
    self.path.display().to_string()
  }
}

/// Serves the sprint payload from an environment variable (test fixture hook).
pub struct EnvSource;

impl IssueSource for EnvSource {
  fn fetch_sprint(&self, _sprint_id: &str) -> Result<serde_json::Value, SourceError> {
    match std::env::var(FIXTURE_ENV) {
      Ok(s) => Ok(serde_json::from_str(&s)?),
      Err(_) => Ok(serde_json::json!({})),
    }
  }

  fn describe(&self) -> String {
    format!("env:{}", FIXTURE_ENV)
  }
}

pub fn env_wants_mock() -> bool {
  std::env::var(FIXTURE_ENV).is_ok()
}

/// Issues extracted from a fetched sprint payload.
#[derive(Debug)]
pub struct SprintPayload {
  pub issues: Vec<RawIssue>,
  pub skipped: Vec<String>,
}

impl SprintPayload {
  pub fn from_value(sprint_id: &str, body: &serde_json::Value) -> Result<Self, SprintError> {
    let Some(items) = body.fetch("issues").to::<Vec<serde_json::Value>>() else {
      return Err(SprintError::NoData {
        sprint: sprint_id.to_string(),
        messages: body.fetch("errorMessages").to_or_default(),
      });
    };

    let total = body.fetch("total").to::<u64>();
    if let Some(total) = total.filter(|t| *t > items.len() as u64) {
      warn!("sprint {} has {} issues; only the first {} were returned", sprint_id, total, items.len());
    }

    let mut issues = Vec::with_capacity(items.len());
    let mut skipped = Vec::new();

    for item in items {
      match serde_json::from_value::<RawIssue>(item.clone()) {
        Ok(raw) => issues.push(raw),
        Err(e) => {
          let key = item.fetch("key").to::<String>().unwrap_or_else(|| "<no key>".to_string());
          warn!("{}: skipping undecodable issue: {}", key, e);
          skipped.push(key);
        }
      }
    }

    Ok(Self { issues, skipped })
  }
}
