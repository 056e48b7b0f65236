// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Sprint-level rollup numbers for the retrospective summary table
// role: aggregation/summary
// inputs: Grouped issues; total_time_days (same value the shaper used)
// outputs: SummaryRow (single row)
// invariants:
// - Percentages share the shaper's rounding and zero-total rule
// - productWork = 100 - techDebt - bugsAndP1s, never clamped (may go negative)
// - Bug and P1 buckets are unioned by key; an issue counts once
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashSet;

use crate::category::Category;
use crate::group::Grouped;
use crate::model::SummaryRow;
use crate::report::{format_days, percent};

pub fn summarize(grouped: &Grouped<'_>, total_time_days: f64) -> SummaryRow {
  let unplanned = grouped.days_in(Category::Additional);
  let tech_debt = percent(grouped.days_in(Category::TechDebt), total_time_days);

  let mut seen: HashSet<&str> = HashSet::new();
  let bugs_and_p1_days: f64 = grouped
    .get(Category::Bug)
    .iter()
    .chain(grouped.get(Category::P1))
    .filter(|i| seen.insert(i.key.as_str()))
    .map(|i| i.calculated_time_days)
    .sum();
  let bugs_and_p1s = percent(bugs_and_p1_days, total_time_days);

  SummaryRow {
    total_dev_days: format!("{:.1}", total_time_days),
    unplanned_task_days: format_days(unplanned),
    tech_debt: format!("{}%", tech_debt),
    bugs_and_p1s: format!("{}%", bugs_and_p1s),
    product_work: format!("{}%", 100 - tech_debt - bugs_and_p1s),
  }
}
