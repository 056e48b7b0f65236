// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Single source of truth for report categories, the type->category table, and relevant label tokens
// role: classification/table
// outputs: Category enum; Category::from_type; relevant_label_tokens
// invariants:
// - Normalizer and grouper both read this module; no other list of categories exists
// - Category declaration order is the bucket output order
// - Every label token maps to a category via from_type
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
  Bug,
  Story,
  TechDebt,
  P1,
  Additional,
  Unfinished,
}

/// Effective type string -> category. `task` reports alongside stories.
const TYPE_TABLE: &[(&str, Category)] = &[
  ("bug", Category::Bug),
  ("story", Category::Story),
  ("task", Category::Story),
  ("tech-debt", Category::TechDebt),
  ("p1", Category::P1),
  ("additional", Category::Additional),
  ("unfinished", Category::Unfinished),
];

/// Label tokens that override the native issue type, in precedence order.
const LABEL_TOKENS: &[&str] = &["tech-debt", "p1", "additional"];
const UNFINISHED_TOKEN: &str = "unfinished";

/// Native type of issues whose logged time rolls up into their parent.
pub const SUB_TASK_TYPE: &str = "sub-task";
pub const STRETCH_LABEL: &str = "stretch";
pub const NOT_FOR_REPORT_LABEL: &str = "not-for-report";

impl Category {
  pub fn from_type(issue_type: &str) -> Option<Category> {
    static BY_TYPE: Lazy<HashMap<&'static str, Category>> = Lazy::new(|| TYPE_TABLE.iter().copied().collect());
    BY_TYPE.get(issue_type).copied()
  }

  /// Bucket name; also the output table's file stem.
  pub fn as_str(&self) -> &'static str {
    match self {
      Category::Bug => "bug",
      Category::Story => "story",
      Category::TechDebt => "tech-debt",
      Category::P1 => "p1",
      Category::Additional => "additional",
      Category::Unfinished => "unfinished",
    }
  }
}

impl std::fmt::Display for Category {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Ordered label tokens; `unfinished` joins only when unfinished tracking is on.
pub fn relevant_label_tokens(track_unfinished: bool) -> Vec<&'static str> {
  let mut tokens = LABEL_TOKENS.to_vec();
  if track_unfinished {
    tokens.push(UNFINISHED_TOKEN);
  }
  tokens
}

/// Same matching rule as the label tokens: case-insensitive containment.
pub fn is_unfinished_label(label: &str) -> bool {
  label.to_lowercase().contains(UNFINISHED_TOKEN)
}
