// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Dotted-path lookups into tracker JSON responses with typed, non-panicking extraction
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (to, to_or_default, exists)
// invariants: No panics; missing paths yield None; to_or_default returns T::default on failure
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A located (or missing) JSON value awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde::Deserialize::deserialize(v).ok())
  }

  pub fn to_or_default<T>(&self) -> T
  where
    T: DeserializeOwned + Default,
  {
    self.to::<T>().unwrap_or_default()
  }

  /// Present and not `null`.
  pub fn exists(&self) -> bool {
    self.inner.is_some_and(|v| !v.is_null())
  }
}

/// Fetch nested values via dotted paths like "fields.issuetype.name".
/// Numeric segments index into arrays: "issues.0.key", "errorMessages.0".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;
}

fn step<'a>(cur: &'a serde_json::Value, segment: &str) -> Option<&'a serde_json::Value> {
  match cur {
    serde_json::Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
    other => other.get(segment),
  }
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    let inner = path
      .split('.')
      .filter(|segment| !segment.is_empty())
      .try_fold(self, step);
    JsonFetched { inner }
  }
}
