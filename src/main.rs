use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sprint_report::cli::{Cli, build_source, normalize};
use sprint_report::{pipeline, util};

fn init_tracing(verbose: bool) {
  let default = if verbose { "sprint_report=debug" } else { "sprint_report=warn" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
  let _ = tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  init_tracing(cli.verbose);

  // Phase 1: normalize CLI (prompting for what is missing)
  let cfg = normalize(cli)?;

  // Phase 2: fetch, shape and write
  let source = build_source(&cfg);
  pipeline::run(&cfg, source.as_ref())
}
