// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Write ordered flat records as named CSV tables
// role: persistence/csv-sink
// inputs: table name (category or "summary"); slice of Serialize rows
// outputs: <dir>/<name>.csv with a header row taken from the record's field order
// side_effects: Creates the output directory; overwrites existing tables of the same name
// invariants: Column order equals struct field order; one file per table name
// errors: IO/CSV errors are terminal and carry the file path
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

pub trait RecordSink {
  /// Write one table; returns where it went.
  fn write_table<R: Serialize>(&mut self, name: &str, rows: &[R]) -> Result<PathBuf>;
}

pub struct CsvDirSink {
  dir: PathBuf,
}

impl CsvDirSink {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }
}

impl RecordSink for CsvDirSink {
  fn write_table<R: Serialize>(&mut self, name: &str, rows: &[R]) -> Result<PathBuf> {
    std::fs::create_dir_all(&self.dir).with_context(|| format!("creating output dir {}", self.dir.display()))?;

    let path = self.dir.join(format!("{}.csv", name));
    let mut writer = csv::Writer::from_path(&path).with_context(|| format!("opening {}", path.display()))?;

    for row in rows {
      writer.serialize(row).with_context(|| format!("writing {}", path.display()))?;
    }
    writer.flush().with_context(|| format!("flushing {}", path.display()))?;

    Ok(path)
  }
}
