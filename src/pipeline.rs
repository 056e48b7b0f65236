// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Orchestrate one sprint run: fetch, normalize, roll up, group, shape, then write tables and manifest
// role: processing/orchestrator
// inputs: EffectiveConfig (mode, sprint, out, track_unfinished, now_override); an IssueSource
// outputs: <out>/<category>.csv, <out>/summary.csv (retrospective), <out>/manifest.json; stdout pointer {dir, manifest, files}
// side_effects: Creates the output directory; writes CSV and JSON files; prints to stdout
// invariants:
// - Every table is shaped before the first file is written
// - No-data halts the run before the output directory is touched
// - Effort rollup runs exactly once per run (RolledUp is only produced by rollup())
// - summary table is written last and only in retrospective mode
// errors: SprintError/SourceError surface as anyhow errors with sprint context; IO errors carry file paths
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::info;

use crate::category::Category;
use crate::cli::EffectiveConfig;
use crate::error::SprintError;
use crate::group::group;
use crate::manifest::{IssueCounts, RejectedIssue, RunManifest};
use crate::model::{ReportMode, ReportRow, SummaryRow};
use crate::normalize::{NormalizeOptions, normalize_all};
use crate::report::shape;
use crate::rollup::rollup;
use crate::sink::{CsvDirSink, RecordSink};
use crate::source::{IssueSource, SprintPayload};
use crate::summary::summarize;
use crate::util;

pub const SUMMARY_TABLE: &str = "summary";

/// A fully shaped sprint report, ready to be written.
#[derive(Debug, Clone)]
pub struct SprintReport {
  pub mode: ReportMode,
  pub tables: BTreeMap<Category, Vec<ReportRow>>,
  pub summary: Option<SummaryRow>,
  pub total_time_days: f64,
  pub counts: IssueCounts,
  pub rejected: Vec<RejectedIssue>,
}

pub fn build_report(
  sprint: &str,
  mode: ReportMode,
  body: &serde_json::Value,
  opts: &NormalizeOptions,
) -> Result<SprintReport, SprintError> {
  let payload = SprintPayload::from_value(sprint, body)?;
  let normalized = normalize_all(&payload.issues, opts);

  let rolled = rollup(normalized.issues);
  let stats = rolled.stats();
  let grouped = group(&rolled);
  let total_time_days = grouped.total_time_days();

  info!(
    "sprint {}: {} issues fetched, {} sub-tasks folded, {} reported in {} categories ({:.2} days)",
    sprint,
    payload.issues.len() + payload.skipped.len(),
    stats.folded,
    grouped.len(),
    grouped.categories().len(),
    total_time_days
  );

  let tables = shape(&grouped, mode, total_time_days);
  let summary = match mode {
    ReportMode::Retrospective => Some(summarize(&grouped, total_time_days)),
    ReportMode::Planning => None,
  };

  let counts = IssueCounts {
    fetched: payload.issues.len() + payload.skipped.len(),
    skipped: payload.skipped.len(),
    excluded: normalized.excluded,
    rejected: normalized.rejected.len(),
    reported: grouped.len(),
    not_reported: grouped.dropped(),
  };

  Ok(SprintReport {
    mode,
    tables,
    summary,
    total_time_days,
    counts,
    rejected: normalized.rejected.iter().map(RejectedIssue::from).collect(),
  })
}

/// Write every table of `report` through `sink`, summary last; returns the manifest.
pub fn write_report<S: RecordSink>(
  report: &SprintReport,
  sink: &mut S,
  mut manifest: RunManifest,
) -> Result<RunManifest> {
  manifest.total_time_days = report.total_time_days;
  manifest.counts = report.counts.clone();
  manifest.rejected = report.rejected.clone();

  for (category, rows) in &report.tables {
    let path = sink.write_table(category.as_str(), rows)?;
    info!("wrote {} rows to {}", rows.len(), path.display());
    manifest.push_table(category.as_str(), &path, rows.len());
  }

  if let Some(summary) = &report.summary {
    let path = sink.write_table(SUMMARY_TABLE, std::slice::from_ref(summary))?;
    manifest.push_table(SUMMARY_TABLE, &path, 1);
  }

  Ok(manifest)
}

/// Run one sprint end to end; returns the stdout pointer.
pub fn execute(cfg: &EffectiveConfig, source: &dyn IssueSource) -> Result<serde_json::Value> {
  let now: DateTime<Local> = util::effective_now(util::parse_now(cfg.now_override.as_deref()));

  info!("fetching sprint {} from {}", cfg.sprint, source.describe());
  let body = source
    .fetch_sprint(&cfg.sprint)
    .with_context(|| format!("fetching sprint {}", cfg.sprint))?;

  let opts = NormalizeOptions { track_unfinished: cfg.track_unfinished };
  let report = build_report(&cfg.sprint, cfg.mode, &body, &opts)?;

  let dir = Path::new(&cfg.out);
  let mut sink = CsvDirSink::new(dir);
  let manifest = RunManifest::new(&cfg.sprint, cfg.mode, source.describe(), now);
  let manifest = write_report(&report, &mut sink, manifest)?;
  let manifest_path = manifest.write_to(sink.dir())?;

  let files: Vec<&str> = manifest.tables.iter().map(|t| t.file.as_str()).collect();
  Ok(serde_json::json!({
    "dir": util::canonicalize_lossy(sink.dir()),
    "manifest": manifest_path.file_name().map(|f| f.to_string_lossy().to_string()),
    "files": files,
  }))
}

pub fn run(cfg: &EffectiveConfig, source: &dyn IssueSource) -> Result<()> {
  let pointer = execute(cfg, source)?;
  println!("{}", serde_json::to_string(&pointer)?);
  Ok(())
}
