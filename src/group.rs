// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Partition rolled-up issues into category buckets, dropping unmapped types
// role: classification/grouping
// inputs: RolledUp issues
// outputs: Grouped view (borrowed) keyed by Category; total_time_days over grouped issues
// invariants:
// - Each mapped issue lands in exactly one bucket; unmapped issues in none
// - Buckets exist only when non-empty and keep encounter order
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use tracing::debug;

use crate::category::Category;
use crate::model::Issue;
use crate::rollup::RolledUp;

#[derive(Debug, Default)]
pub struct Grouped<'a> {
  buckets: BTreeMap<Category, Vec<&'a Issue>>,
  dropped: usize,
}

impl<'a> Grouped<'a> {
  pub fn get(&self, category: Category) -> &[&'a Issue] {
    self.buckets.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Buckets in category order.
  pub fn iter(&self) -> impl Iterator<Item = (Category, &[&'a Issue])> + '_ {
    self.buckets.iter().map(|(c, v)| (*c, v.as_slice()))
  }

  pub fn categories(&self) -> Vec<Category> {
    self.buckets.keys().copied().collect()
  }

  pub fn len(&self) -> usize {
    self.buckets.values().map(Vec::len).sum()
  }

  pub fn is_empty(&self) -> bool {
    self.buckets.is_empty()
  }

  pub fn dropped(&self) -> usize {
    self.dropped
  }

  /// Logged days across every reported issue; the denominator for percentages.
  pub fn total_time_days(&self) -> f64 {
    self.buckets.values().flatten().map(|i| i.calculated_time_days).sum()
  }

  pub fn days_in(&self, category: Category) -> f64 {
    self.get(category).iter().map(|i| i.calculated_time_days).sum()
  }
}

pub fn group(rolled: &RolledUp) -> Grouped<'_> {
  let mut grouped = Grouped::default();

  for issue in rolled.issues() {
    match Category::from_type(&issue.issue_type) {
      Some(category) => grouped.buckets.entry(category).or_default().push(issue),
      None => {
        debug!("{}: type '{}' not reported", issue.key, issue.issue_type);
        grouped.dropped += 1;
      }
    }
  }

  grouped
}
