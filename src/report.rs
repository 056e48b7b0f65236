// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shape grouped issues into planning or retrospective rows, sorted by epic within each bucket
// role: rendering/report-shaper
// inputs: Grouped issues; ReportMode (run-wide); total_time_days computed once by the caller
// outputs: BTreeMap<Category, Vec<ReportRow>>; shared day/percent formatting helpers
// invariants:
// - Percentages are integer-rounded (half up); a zero total renders 0%
// - Rows sort ascending by epic label (ordinal), missing epic first; ties keep input order
// - Mode never varies per issue
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use crate::category::{Category, STRETCH_LABEL};
use crate::group::Grouped;
use crate::model::{Issue, PlanningRow, ReportMode, ReportRow, RetrospectiveRow};

pub const THIS_SPRINT: &str = "This Sprint";
pub const NEXT_SPRINT: &str = "Next Sprint";

/// Integer percent of `part` in `total`, rounded half up. Zero when nothing was logged.
pub fn percent(part: f64, total: f64) -> i64 {
  if total <= 0.0 {
    return 0;
  }
  (part / total * 100.0).round() as i64
}

pub fn format_percent(part: f64, total: f64) -> String {
  format!("{}%", percent(part, total))
}

/// Day count with at most two decimals and no trailing zeros: 3, 1.5, 0.33.
pub fn format_days(days: f64) -> String {
  let rounded = (days * 100.0).round() / 100.0;
  format!("{}", rounded + 0.0)
}

fn comments(issue: &Issue) -> String {
  if issue.is_stretch_goal { STRETCH_LABEL.to_string() } else { String::new() }
}

fn epic(issue: &Issue) -> String {
  issue.epic_label.clone().unwrap_or_default()
}

pub fn planning_row(issue: &Issue) -> PlanningRow {
  PlanningRow {
    summary: issue.summary.clone(),
    key: issue.key.clone(),
    name: issue.assignee_name.clone(),
    estimation: issue.original_estimate.clone().unwrap_or_default(),
    comments: comments(issue),
    estimated_delivery: if issue.is_stretch_goal { NEXT_SPRINT } else { THIS_SPRINT }.to_string(),
    epic: epic(issue),
  }
}

pub fn retrospective_row(issue: &Issue, total_time_days: f64) -> RetrospectiveRow {
  RetrospectiveRow {
    summary: issue.summary.clone(),
    key: issue.key.clone(),
    name: issue.assignee_name.clone(),
    time: format!("{}d", format_days(issue.calculated_time_days)),
    percentage: format_percent(issue.calculated_time_days, total_time_days),
    comments: comments(issue),
    epic: epic(issue),
  }
}

/// Issues of one bucket, stably ordered by epic label (missing epic as "").
pub fn sort_by_epic<'a>(issues: &[&'a Issue]) -> Vec<&'a Issue> {
  let mut sorted = issues.to_vec();
  sorted.sort_by(|a, b| {
    let ea = a.epic_label.as_deref().unwrap_or("");
    let eb = b.epic_label.as_deref().unwrap_or("");
    ea.cmp(eb)
  });
  sorted
}

pub fn shape(grouped: &Grouped<'_>, mode: ReportMode, total_time_days: f64) -> BTreeMap<Category, Vec<ReportRow>> {
  grouped
    .iter()
    .map(|(category, issues)| {
      let rows = sort_by_epic(issues)
        .into_iter()
        .map(|issue| match mode {
          ReportMode::Planning => ReportRow::Planning(planning_row(issue)),
          ReportMode::Retrospective => ReportRow::Retrospective(retrospective_row(issue, total_time_days)),
        })
        .collect();
      (category, rows)
    })
    .collect()
}
