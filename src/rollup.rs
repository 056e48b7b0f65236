// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Fold sub-task logged time into the direct parent issue, exactly once per sprint
// role: aggregation/in-place
// inputs: Normalized issues (owned)
// outputs: RolledUp wrapper (read-only view) plus RollupStats
// invariants:
// - One level only: contributions are taken from pre-rollup values, so chains never propagate
// - RolledUp can only come from rollup(), so the fold cannot run twice on the same data
// - Orphan sub-tasks contribute nothing (not an error)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use tracing::debug;

use crate::category::SUB_TASK_TYPE;
use crate::model::Issue;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RollupStats {
  pub folded: usize,
  pub orphaned: usize,
}

/// Issues after effort rollup. Read-only from here on.
#[derive(Debug)]
pub struct RolledUp {
  issues: Vec<Issue>,
  stats: RollupStats,
}

impl RolledUp {
  pub fn issues(&self) -> &[Issue] {
    &self.issues
  }

  pub fn stats(&self) -> RollupStats {
    self.stats
  }
}

pub fn rollup(mut issues: Vec<Issue>) -> RolledUp {
  let stats = fold_subtasks(&mut issues);
  RolledUp { issues, stats }
}

fn fold_subtasks(issues: &mut [Issue]) -> RollupStats {
  let mut stats = RollupStats::default();
  let mut contributions: Vec<(usize, f64)> = Vec::new();

  {
    let index: HashMap<&str, usize> = issues.iter().enumerate().map(|(i, issue)| (issue.key.as_str(), i)).collect();

    for issue in issues.iter().filter(|i| i.issue_type == SUB_TASK_TYPE) {
      match issue.parent_key.as_deref().and_then(|k| index.get(k)) {
        Some(&parent) => {
          contributions.push((parent, issue.calculated_time_days));
          stats.folded += 1;
        }
        None => {
          debug!("{}: sub-task parent {:?} not in sprint; time dropped", issue.key, issue.parent_key);
          stats.orphaned += 1;
        }
      }
    }
  }

  for (parent, days) in contributions {
    issues[parent].calculated_time_days += days;
  }

  stats
}
