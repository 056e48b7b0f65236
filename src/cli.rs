// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Parse CLI flags/env into an EffectiveConfig, prompting for missing run parameters, and pick the issue source
// role: cli/config
// inputs: argv; env REPORT_TYPE, SPRINT, JIRA_BASE_URL, KEY, JIRA_TOKEN; stdin when prompting
// outputs: EffectiveConfig; Box<dyn IssueSource>
// side_effects: Prompts on stderr and reads stdin only when a parameter is missing and prompting is allowed
// invariants:
// - mode and sprint are always resolved before any fetch happens
// - --key wins over --token when both are present
// - source precedence: env fixture > --input > Jira HTTP
// errors: Missing parameters without a prompt, invalid sprint ids, and unreadable answers are usage errors
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::debug;

use crate::model::ReportMode;
use crate::source::{self, Auth, EnvSource, FileSource, IssueSource, JiraHttpSource};

pub const DEFAULT_BASE_URL: &str = "https://naturalintelligence.atlassian.net";

#[derive(Parser, Debug)]
#[command(
    name = "sprint-report",
    version,
    about = "Build planning or retrospective CSV reports from a Jira sprint",
    long_about = None
)]
pub struct Cli {
  /// Report to build: planning or retrospective (alias: sprint-report)
  #[arg(long, value_enum, env = "REPORT_TYPE")]
  pub mode: Option<ReportMode>,

  /// Jira sprint id
  #[arg(long, env = "SPRINT")]
  pub sprint: Option<String>,

  /// Jira site base URL
  #[arg(long, env = "JIRA_BASE_URL", default_value = DEFAULT_BASE_URL)]
  pub base_url: String,

  /// `user:api-token` pair sent as HTTP Basic auth
  #[arg(long, env = "KEY", hide_env_values = true)]
  pub key: Option<String>,

  /// Bearer token (used when --key is absent)
  #[arg(long, env = "JIRA_TOKEN", hide_env_values = true)]
  pub token: Option<String>,

  /// Read the sprint payload from a JSON file instead of Jira
  #[arg(long)]
  pub input: Option<PathBuf>,

  /// Output directory for the CSV tables and manifest.json
  #[arg(long, default_value = ".")]
  pub out: String,

  /// Report issues labelled "unfinished" in their own table
  #[arg(long)]
  pub track_unfinished: bool,

  /// Page-size cap passed to Jira as maxResults
  #[arg(long, default_value_t = 100)]
  pub max_results: u32,

  /// Never prompt; missing --mode/--sprint are errors
  #[arg(long)]
  pub no_prompt: bool,

  /// Debug logging on stderr
  #[arg(short, long)]
  pub verbose: bool,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the manifest's generated_at instant (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EffectiveConfig {
  pub mode: ReportMode,
  pub sprint: String,
  pub base_url: String,
  pub auth: Option<Auth>,
  pub input: Option<String>, // absolute path for stability
  pub out: String,
  pub track_unfinished: bool,
  pub max_results: u32,
  pub now_override: Option<String>,
}

/// Line-based prompt on `out`, answer read from `input`.
pub fn prompt_line<R: BufRead, W: Write>(input: &mut R, out: &mut W, question: &str) -> Result<String> {
  write!(out, "{}: ", question)?;
  out.flush()?;

  let mut answer = String::new();
  let n = input.read_line(&mut answer).context("reading answer from stdin")?;
  if n == 0 {
    bail!("no answer given for '{}'", question);
  }
  Ok(answer.trim().to_string())
}

pub fn parse_mode(raw: &str) -> Result<ReportMode> {
  ReportMode::from_str(raw.trim(), true)
    .map_err(|_| anyhow::anyhow!("unknown report type '{}': expected planning or retrospective", raw.trim()))
}

pub fn validate_sprint(raw: &str) -> Result<String> {
  let id = raw.trim();
  if id.is_empty() {
    bail!("sprint id must not be empty");
  }
  if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
    bail!("sprint id '{}' may only contain letters, digits, '-' and '_'", id);
  }
  Ok(id.to_string())
}

fn resolve_auth(key: Option<String>, token: Option<String>) -> Option<Auth> {
  let key = key.filter(|k| !k.trim().is_empty());
  let token = token.filter(|t| !t.trim().is_empty());
  match (key, token) {
    (Some(k), _) => Some(Auth::Basic(k)),
    (None, Some(t)) => Some(Auth::Bearer(t)),
    (None, None) => None,
  }
}

/// Resolve the config, asking on `input`/`out` for whatever the flags and env left open.
pub fn normalize_with<R: BufRead, W: Write>(cli: Cli, can_prompt: bool, input: &mut R, out: &mut W) -> Result<EffectiveConfig> {
  let mode = match cli.mode {
    Some(m) => m,
    None if can_prompt => parse_mode(&prompt_line(input, out, "Report type (planning/retrospective)")?)?,
    None => bail!("Provide --mode (or REPORT_TYPE): planning or retrospective"),
  };

  let sprint = match cli.sprint.as_deref() {
    Some(s) => validate_sprint(s)?,
    None if can_prompt => validate_sprint(&prompt_line(input, out, "Sprint id")?)?,
    None => bail!("Provide --sprint (or SPRINT)"),
  };

  Ok(EffectiveConfig {
    mode,
    sprint,
    base_url: cli.base_url,
    auth: resolve_auth(cli.key, cli.token),
    input: cli.input.as_deref().map(crate::util::canonicalize_lossy),
    out: cli.out,
    track_unfinished: cli.track_unfinished,
    max_results: cli.max_results,
    now_override: cli.now_override,
  })
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let can_prompt = !cli.no_prompt && std::io::stdin().is_terminal();
  let stdin = std::io::stdin();
  normalize_with(cli, can_prompt, &mut stdin.lock(), &mut std::io::stderr())
}

pub fn build_source(cfg: &EffectiveConfig) -> Box<dyn IssueSource> {
  if source::env_wants_mock() {
    debug!("using sprint fixture from {}", source::FIXTURE_ENV);
    return Box::new(EnvSource);
  }
  match &cfg.input {
    Some(path) => Box::new(FileSource::new(path)),
    None => Box::new(JiraHttpSource::new(&cfg.base_url, cfg.auth.clone(), cfg.max_results)),
  }
}
