//! Benchmark result documents.
//!
//! A result document is a JSON object with a version tag and a map of
//! benchmark name to samples:
//!
//! ```text
//! {
//!   "version": "0.2",
//!   "benchmarks": {
//!     "call_simple": { "unit": "second", "samples": [0.0114, 0.0117] }
//!   }
//! }
//! ```
//!
//! Benchmark order in the document is kept: it decides report order.

use std::collections::HashMap;
use std::fmt;
use std::io;
use std::path::Path;

use perfcmp_stats::Summary;
use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};

/// What a benchmark's samples measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum Unit {
    /// Elapsed time in seconds.
    #[serde(rename = "second", alias = "time")]
    Time,
    /// Memory usage in bytes.
    #[serde(rename = "byte", alias = "memory")]
    Memory,
}

/// Errors that can occur while loading a result document.
#[derive(Debug)]
pub enum LoadError {
    /// The document could not be read.
    Io(io::Error),
    /// The document is not valid JSON or has the wrong shape.
    Json(serde_json::Error),
    /// The version tag is absent or empty.
    MissingVersion,
    /// The document contains no benchmarks.
    NoBenchmarks,
    /// A benchmark has no samples.
    EmptySamples(String),
    /// A sample is negative or not finite.
    InvalidSample {
        /// Benchmark holding the sample.
        benchmark: String,
        /// The rejected value.
        value: f64,
    },
    /// Every sample of a benchmark is zero, so no change ratio can be formed.
    ZeroSamples(String),
    /// The same benchmark name appears twice.
    DuplicateBenchmark(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "I/O error: {e}"),
            LoadError::Json(e) => write!(f, "malformed result document: {e}"),
            LoadError::MissingVersion => write!(f, "missing performance version"),
            LoadError::NoBenchmarks => write!(f, "document contains no benchmarks"),
            LoadError::EmptySamples(name) => write!(f, "benchmark '{name}' has no samples"),
            LoadError::InvalidSample { benchmark, value } => {
                write!(f, "benchmark '{benchmark}' has invalid sample {value}")
            }
            LoadError::ZeroSamples(name) => {
                write!(f, "benchmark '{name}' has only zero samples")
            }
            LoadError::DuplicateBenchmark(name) => {
                write!(f, "benchmark '{name}' appears more than once")
            }
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for LoadError {
    fn from(e: io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<serde_json::Error> for LoadError {
    fn from(e: serde_json::Error) -> Self {
        LoadError::Json(e)
    }
}

/// Samples of one benchmark from one result document.
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    name: String,
    unit: Unit,
    samples: Vec<f64>,
    summary: Summary,
}

impl BenchmarkResult {
    /// Create a result from raw samples.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::InvalidSample`] for a negative or non-finite
    /// sample, [`LoadError::EmptySamples`] when there are no samples, and
    /// [`LoadError::ZeroSamples`] when every sample is zero.
    pub fn new(name: impl Into<String>, unit: Unit, samples: Vec<f64>) -> Result<Self, LoadError> {
        let name = name.into();
        if let Some(&value) = samples.iter().find(|v| !(v.is_finite() && **v >= 0.0)) {
            return Err(LoadError::InvalidSample {
                benchmark: name,
                value,
            });
        }
        let Some(summary) = Summary::compute(&samples) else {
            return Err(LoadError::EmptySamples(name));
        };
        if samples.iter().all(|&v| v == 0.0) {
            return Err(LoadError::ZeroSamples(name));
        }
        Ok(Self {
            name,
            unit,
            samples,
            summary,
        })
    }

    /// Benchmark name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of the samples.
    #[must_use]
    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Raw samples in document order.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Precomputed statistics over the samples.
    #[must_use]
    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Returns `true` if the benchmark holds exactly one sample.
    #[must_use]
    pub fn is_single_sample(&self) -> bool {
        self.samples.len() == 1
    }

    /// Representative value used for ratios: the mean, or the value itself
    /// for a single sample. Always positive.
    #[must_use]
    pub fn center(&self) -> f64 {
        if self.is_single_sample() {
            self.samples[0]
        } else {
            self.summary.mean
        }
    }
}

/// One document's benchmarks plus its version tag.
///
/// Benchmarks are kept in document order with a name index on the side.
#[derive(Debug, Clone)]
pub struct ResultSet {
    name: String,
    version: String,
    benchmarks: Vec<BenchmarkResult>,
    index: HashMap<String, usize>,
}

impl ResultSet {
    /// Build a result set from benchmarks in display order.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingVersion`] for a blank version,
    /// [`LoadError::NoBenchmarks`] for an empty list, and
    /// [`LoadError::DuplicateBenchmark`] when a name repeats.
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        benchmarks: Vec<BenchmarkResult>,
    ) -> Result<Self, LoadError> {
        let version = version.into();
        if version.trim().is_empty() {
            return Err(LoadError::MissingVersion);
        }
        if benchmarks.is_empty() {
            return Err(LoadError::NoBenchmarks);
        }

        let mut index = HashMap::with_capacity(benchmarks.len());
        for (pos, bench) in benchmarks.iter().enumerate() {
            if index.insert(bench.name.clone(), pos).is_some() {
                return Err(LoadError::DuplicateBenchmark(bench.name.clone()));
            }
        }

        Ok(Self {
            name: name.into(),
            version,
            benchmarks,
            index,
        })
    }

    /// Parse a result document held in memory.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Json`] if the text is not a result document, or
    /// any error from [`BenchmarkResult::new`] and [`ResultSet::new`].
    pub fn from_json(name: impl Into<String>, text: &str) -> Result<Self, LoadError> {
        let raw: RawSuite = serde_json::from_str(text)?;
        let benchmarks = raw
            .benchmarks
            .0
            .into_iter()
            .map(|(name, bench)| BenchmarkResult::new(name, bench.unit, bench.samples))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(name, raw.version.unwrap_or_default(), benchmarks)
    }

    /// Read and parse a result document; the set is titled by the file name.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`ResultSet::from_json`].
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let text = std::fs::read_to_string(path)?;
        let title = path.file_name().map_or_else(
            || path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        Self::from_json(title, &text)
    }

    /// Display title of the set.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Version tag of the tool that produced the set.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Look up a benchmark by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&BenchmarkResult> {
        self.index.get(name).map(|&pos| &self.benchmarks[pos])
    }

    /// Returns `true` if a benchmark with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Benchmarks in document order.
    pub fn iter(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.benchmarks.iter()
    }

    /// Benchmark names in document order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.benchmarks.iter().map(BenchmarkResult::name)
    }
}

// ---------------------------------------------------------------------------
// On-disk shape
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RawSuite {
    #[serde(default, alias = "performance_version")]
    version: Option<String>,
    #[serde(default)]
    benchmarks: OrderedBenchmarks,
}

#[derive(Deserialize)]
struct RawBenchmark {
    unit: Unit,
    #[serde(default)]
    samples: Vec<f64>,
}

/// Benchmark entries in the order they appear in the JSON object.
#[derive(Default)]
struct OrderedBenchmarks(Vec<(String, RawBenchmark)>);

impl<'de> Deserialize<'de> for OrderedBenchmarks {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OrderedBenchmarks;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of benchmark name to samples")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, RawBenchmark>()? {
                    entries.push(entry);
                }
                Ok(OrderedBenchmarks(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_document_order() {
        let text = r#"{
            "version": "0.2",
            "benchmarks": {
                "zeta": { "unit": "second", "samples": [1.0] },
                "alpha": { "unit": "second", "samples": [2.0] },
                "mu": { "unit": "byte", "samples": [3.0] }
            }
        }"#;
        let set = ResultSet::from_json("a.json", text).unwrap();
        assert_eq!(set.names().collect::<Vec<_>>(), ["zeta", "alpha", "mu"]);
        assert_eq!(set.get("alpha").unwrap().center(), 2.0);
        assert_eq!(set.get("mu").unwrap().unit(), Unit::Memory);
        assert!(!set.contains("beta"));
        assert_eq!(set.iter().count(), 3);
    }

    #[test]
    fn accepts_legacy_field_and_unit_names() {
        let text = r#"{
            "performance_version": "0.3",
            "benchmarks": {
                "startup": { "unit": "time", "samples": [0.5, 0.6] },
                "rss": { "unit": "memory", "samples": [1024] }
            },
            "metadata": { "hostname": "ignored" }
        }"#;
        let set = ResultSet::from_json("b.json", text).unwrap();
        assert_eq!(set.version(), "0.3");
        assert_eq!(set.get("startup").unwrap().unit(), Unit::Time);
        assert_eq!(set.get("rss").unwrap().unit(), Unit::Memory);
    }

    #[test]
    fn center_is_mean_or_single_value() {
        let multi = BenchmarkResult::new("m", Unit::Time, vec![1.0, 2.0, 6.0]).unwrap();
        assert_eq!(multi.center(), 3.0);
        assert_eq!(multi.summary().median, 2.0);
        let single = BenchmarkResult::new("s", Unit::Memory, vec![7.5]).unwrap();
        assert!(single.is_single_sample());
        assert_eq!(single.center(), 7.5);
    }

    #[test]
    fn rejects_missing_version() {
        let text = r#"{ "benchmarks": { "a": { "unit": "second", "samples": [1.0] } } }"#;
        assert!(matches!(
            ResultSet::from_json("x", text),
            Err(LoadError::MissingVersion)
        ));
        let text = r#"{ "version": " ", "benchmarks": { "a": { "unit": "second", "samples": [1.0] } } }"#;
        assert!(matches!(
            ResultSet::from_json("x", text),
            Err(LoadError::MissingVersion)
        ));
    }

    #[test]
    fn rejects_empty_documents() {
        assert!(matches!(
            ResultSet::from_json("x", r#"{ "version": "0.2" }"#),
            Err(LoadError::NoBenchmarks)
        ));
        assert!(matches!(
            ResultSet::from_json("x", r#"{ "version": "0.2", "benchmarks": {} }"#),
            Err(LoadError::NoBenchmarks)
        ));
    }

    #[test]
    fn rejects_bad_samples() {
        let text = r#"{ "version": "0.2", "benchmarks": { "a": { "unit": "second", "samples": [] } } }"#;
        match ResultSet::from_json("x", text) {
            Err(LoadError::EmptySamples(name)) => assert_eq!(name, "a"),
            other => panic!("unexpected: {other:?}"),
        }
        let text = r#"{ "version": "0.2", "benchmarks": { "b": { "unit": "second", "samples": [1.0, -2.0] } } }"#;
        match ResultSet::from_json("x", text) {
            Err(LoadError::InvalidSample { benchmark, value }) => {
                assert_eq!(benchmark, "b");
                assert_eq!(value, -2.0);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_all_zero_samples() {
        for samples in ["[0.0]", "[0, 0.0, 0]"] {
            let text = format!(
                r#"{{ "version": "0.2", "benchmarks": {{ "idle": {{ "unit": "second", "samples": {samples} }} }} }}"#
            );
            match ResultSet::from_json("x", &text) {
                Err(err @ LoadError::ZeroSamples(_)) => {
                    assert_eq!(err.to_string(), "benchmark 'idle' has only zero samples");
                }
                other => panic!("unexpected: {other:?}"),
            }
        }

        let some_zero = BenchmarkResult::new("warm", Unit::Time, vec![0.0, 0.2]).unwrap();
        assert!((some_zero.center() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn rejects_duplicate_names() {
        let text = r#"{ "version": "0.2", "benchmarks": {
            "a": { "unit": "second", "samples": [1.0] },
            "a": { "unit": "second", "samples": [2.0] }
        } }"#;
        match ResultSet::from_json("x", text) {
            Err(LoadError::DuplicateBenchmark(name)) => assert_eq!(name, "a"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(matches!(
            ResultSet::from_json("x", "{ not json"),
            Err(LoadError::Json(_))
        ));
        let text = r#"{ "version": "0.2", "benchmarks": { "a": { "unit": "furlong", "samples": [1.0] } } }"#;
        assert!(matches!(
            ResultSet::from_json("x", text),
            Err(LoadError::Json(_))
        ));
    }

    #[test]
    fn load_titles_by_file_name() {
        let dir = std::env::temp_dir().join(format!("perfcmp-suite-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("base.json");
        std::fs::write(
            &path,
            r#"{ "version": "0.2", "benchmarks": { "a": { "unit": "second", "samples": [1.0] } } }"#,
        )
        .unwrap();

        let set = ResultSet::load(&path).unwrap();
        assert_eq!(set.name(), "base.json");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let err = ResultSet::load(Path::new("/nonexistent/perfcmp/missing.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
        assert!(std::error::Error::source(&err).is_some());
    }
}
