//! Benchmark result comparison and reporting.
//!
//! Loads two benchmark result documents, pairs their benchmarks by name,
//! derives per-benchmark change ratios and significance verdicts, and
//! renders the outcome as text, a fixed-width table, or CSV.
//!
//! Pipeline: [`suite::ResultSet::load`] → [`pair::pair_benchmarks`] →
//! [`compare::Comparison::new`] → [`output::Report::render`].

pub mod compare;
pub mod format;
pub mod output;
pub mod pair;
pub mod suite;

pub use compare::{Comparison, Direction};
pub use output::{Report, ReportMode, VersionCheck};
pub use pair::{BenchmarkPair, Pairing, pair_benchmarks};
pub use suite::{BenchmarkResult, LoadError, ResultSet, Unit};
