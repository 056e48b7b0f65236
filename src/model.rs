// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the raw tracker payload, the canonical Issue, and the flat report records written by the sink
// role: model/types
// outputs: Deserializable raw structs; Issue; PlanningRow/RetrospectiveRow/SummaryRow with stable column order
// invariants:
// - Row struct field order IS the CSV column order; do not reorder fields
// - Every optional raw field is Option/defaulted; a missing sub-object never fails deserialization
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Which audience the run is producing tables for. Fixed for the whole run.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
#[value(rename_all = "lowercase")]
pub enum ReportMode {
  Planning,
  #[value(alias = "sprint-report", alias = "sprint", alias = "retro")]
  Retrospective,
}

impl ReportMode {
  pub fn as_str(&self) -> &'static str {
    match self {
      ReportMode::Planning => "planning",
      ReportMode::Retrospective => "retrospective",
    }
  }
}

// --- Raw tracker payload ---

fn null_as_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
  D: Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(de)?.unwrap_or_default())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawIssue {
  pub key: String,
  #[serde(default)]
  pub fields: RawFields,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFields {
  #[serde(default)]
  pub epic: Option<RawEpic>,
  #[serde(default)]
  pub parent: Option<RawParent>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub summary: String,
  #[serde(default)]
  pub status: Option<RawNamed>,
  #[serde(default)]
  pub issuetype: Option<RawNamed>,
  #[serde(default, deserialize_with = "null_as_default")]
  pub labels: Vec<String>,
  #[serde(default)]
  pub assignee: Option<RawAssignee>,
  #[serde(default)]
  pub timetracking: Option<RawTimeTracking>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEpic {
  pub key: String,
  #[serde(default)]
  pub summary: Option<String>,
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawParent {
  pub key: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawNamed {
  #[serde(default, deserialize_with = "null_as_default")]
  pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAssignee {
  #[serde(default)]
  pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTimeTracking {
  /// Jira sends a string ("3d"); hand-written payloads sometimes send a bare number.
  #[serde(default)]
  pub original_estimate: Option<serde_json::Value>,
  #[serde(default)]
  pub time_spent: Option<String>,
}

// --- Canonical issue ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Issue {
  pub key: String,
  pub parent_key: Option<String>,
  pub epic_label: Option<String>,
  /// Effective category string, not the tracker-native type.
  pub issue_type: String,
  pub summary: String,
  pub assignee_name: String,
  pub original_estimate: Option<String>,
  pub calculated_time_days: f64,
  pub is_stretch_goal: bool,
  pub is_finished: bool,
}

// --- Report records (field order = column order) ---

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanningRow {
  pub summary: String,
  pub key: String,
  pub name: String,
  pub estimation: String,
  pub comments: String,
  #[serde(rename = "estimatedDelivery")]
  pub estimated_delivery: String,
  pub epic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RetrospectiveRow {
  pub summary: String,
  pub key: String,
  pub name: String,
  pub time: String,
  pub percentage: String,
  pub comments: String,
  pub epic: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRow {
  Planning(PlanningRow),
  Retrospective(RetrospectiveRow),
}

impl ReportRow {
  pub fn key(&self) -> &str {
    match self {
      ReportRow::Planning(r) => &r.key,
      ReportRow::Retrospective(r) => &r.key,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
  #[serde(rename = "totalDevDays")]
  pub total_dev_days: String,
  #[serde(rename = "unplannedTaskDays")]
  pub unplanned_task_days: String,
  #[serde(rename = "techDebt")]
  pub tech_debt: String,
  #[serde(rename = "bugsAndP1s")]
  pub bugs_and_p1s: String,
  #[serde(rename = "productWork")]
  pub product_work: String,
}
