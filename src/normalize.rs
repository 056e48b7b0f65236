// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Convert raw tracker issues into canonical Issue values with an effective category
// role: normalization/pure
// inputs: RawIssue slices as fetched; NormalizeOptions (unfinished tracking)
// outputs: Issue values; per-issue IssueError for malformed logged time
// invariants:
// - A relevant label token always beats the native issue type
// - Label matching direction: a label matches when it contains a token (case-insensitive)
// - Optional raw fields are resolved here once; downstream never re-checks them
// - not-for-report issues are dropped before normalization
// errors: Per-issue only (collected in Normalized::rejected); never aborts the batch
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use tracing::{debug, warn};

use crate::category::{self, NOT_FOR_REPORT_LABEL, STRETCH_LABEL, SUB_TASK_TYPE};
use crate::error::IssueError;
use crate::model::{Issue, RawIssue};

#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizeOptions {
  pub track_unfinished: bool,
}

#[derive(Debug, Default)]
pub struct Normalized {
  pub issues: Vec<Issue>,
  pub rejected: Vec<IssueError>,
  pub excluded: usize,
}

/// Parse a logged-time string such as "2h" or "1.5d" into a day count.
///
/// The final character is the unit and is discarded; the remainder must be a
/// non-negative number. Absent or blank input means nothing was logged.
pub fn parse_logged_days(key: &str, logged: Option<&str>) -> Result<f64, IssueError> {
  let Some(text) = logged.map(str::trim).filter(|s| !s.is_empty()) else {
    return Ok(0.0);
  };

  let mut chars = text.chars();
  chars.next_back();
  let number = chars.as_str().trim();

  number
    .parse::<f64>()
    .ok()
    .filter(|v| v.is_finite() && *v >= 0.0)
    .ok_or_else(|| IssueError::MalformedDuration {
      key: key.to_string(),
      value: text.to_string(),
    })
}

fn native_type(raw: &RawIssue) -> String {
  let name = raw
    .fields
    .issuetype
    .as_ref()
    .map(|t| t.name.to_lowercase())
    .unwrap_or_default();

  // Newer Jira projects call it "Subtask"
  if name == "subtask" {
    SUB_TASK_TYPE.to_string()
  } else {
    name
  }
}

fn effective_type(labels: &[String], native: String, tokens: &[&str]) -> String {
  labels
    .iter()
    .find_map(|label| {
      let lower = label.to_lowercase();
      tokens.iter().find(|t| lower.contains(*t)).map(|t| t.to_string())
    })
    .unwrap_or(native)
}

fn estimate_text(v: &serde_json::Value) -> Option<String> {
  match v {
    serde_json::Value::Null => None,
    serde_json::Value::String(s) => Some(s.clone()),
    other => Some(other.to_string()),
  }
}

pub fn is_excluded(raw: &RawIssue) -> bool {
  raw.fields.labels.iter().any(|l| l.eq_ignore_ascii_case(NOT_FOR_REPORT_LABEL))
}

pub fn normalize(raw: &RawIssue, opts: &NormalizeOptions) -> Result<Issue, IssueError> {
  let fields = &raw.fields;
  let tracking = fields.timetracking.clone().unwrap_or_default();

  let calculated_time_days = parse_logged_days(&raw.key, tracking.time_spent.as_deref())?;

  let tokens = category::relevant_label_tokens(opts.track_unfinished);
  let issue_type = effective_type(&fields.labels, native_type(raw), &tokens);

  let epic_label = fields.epic.as_ref().map(|e| {
    match e.summary.as_deref().or(e.name.as_deref()).filter(|s| !s.is_empty()) {
      Some(title) => format!("{} - {}", e.key, title),
      None => e.key.clone(),
    }
  });

  let is_finished = !(opts.track_unfinished && fields.labels.iter().any(|l| category::is_unfinished_label(l)));

  Ok(Issue {
    key: raw.key.clone(),
    parent_key: fields.parent.as_ref().map(|p| p.key.clone()),
    epic_label,
    issue_type,
    summary: fields.summary.clone(),
    assignee_name: fields
      .assignee
      .as_ref()
      .and_then(|a| a.display_name.clone())
      .unwrap_or_else(|| "N/A".to_string()),
    original_estimate: tracking.original_estimate.as_ref().and_then(estimate_text),
    calculated_time_days,
    is_stretch_goal: fields.labels.iter().any(|l| l == STRETCH_LABEL),
    is_finished,
  })
}

/// Normalize a whole sprint; malformed issues are reported, not fatal.
pub fn normalize_all(raws: &[RawIssue], opts: &NormalizeOptions) -> Normalized {
  let mut out = Normalized::default();

  for raw in raws {
    if is_excluded(raw) {
      debug!("{}: excluded by '{}' label", raw.key, NOT_FOR_REPORT_LABEL);
      out.excluded += 1;
      continue;
    }

    match normalize(raw, opts) {
      Ok(issue) => out.issues.push(issue),
      Err(e) => {
        warn!("{}", e);
        out.rejected.push(e);
      }
    }
  }

  out
}
