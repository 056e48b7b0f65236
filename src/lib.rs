// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Library surface for sprint-report: classification, effort rollup, report shaping and CSV output
// role: crate/root
// outputs: Public modules used by the binary and the integration tests
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

pub mod category;
pub mod cli;
pub mod error;
pub mod ext;
pub mod group;
pub mod manifest;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod report;
pub mod rollup;
pub mod sink;
pub mod source;
pub mod summary;
pub mod util;
