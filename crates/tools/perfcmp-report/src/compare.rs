//! Per-benchmark comparison: ratio, direction and significance.

use core::fmt;

use perfcmp_stats::{Significance, significance};

use crate::format::{format_value, format_values};
use crate::pair::BenchmarkPair;
use crate::suite::{BenchmarkResult, Unit};

/// Which way a benchmark moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Took more time.
    Slower,
    /// Took less (or equal) time.
    Faster,
    /// Used more memory.
    Larger,
    /// Used less (or equal) memory.
    Smaller,
}

impl Direction {
    /// Direction for a `changed / base` ratio of `unit` values.
    ///
    /// A ratio of exactly 1 uses the faster/smaller wording.
    #[must_use]
    pub fn from_ratio(unit: Unit, ratio: f64) -> Self {
        match (unit, ratio > 1.0) {
            (Unit::Time, true) => Self::Slower,
            (Unit::Time, false) => Self::Faster,
            (Unit::Memory, true) => Self::Larger,
            (Unit::Memory, false) => Self::Smaller,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Slower => "slower",
            Self::Faster => "faster",
            Self::Larger => "larger",
            Self::Smaller => "smaller",
        })
    }
}

/// Comparison of one benchmark between the base and changed sets.
#[derive(Debug, Clone)]
pub struct Comparison<'a> {
    /// Benchmark name.
    pub name: &'a str,
    /// Result from the base set.
    pub base: &'a BenchmarkResult,
    /// Result from the changed set.
    pub changed: &'a BenchmarkResult,
    /// `center(changed) / center(base)`; finite and positive since centers
    /// are never zero.
    pub ratio: f64,
    /// Direction derived from the ratio and unit.
    pub direction: Direction,
    /// Significance test verdict.
    pub significance: Significance,
}

impl<'a> Comparison<'a> {
    /// Compare a paired benchmark.
    #[must_use]
    pub fn new(pair: BenchmarkPair<'a>) -> Self {
        let ratio = pair.changed.center() / pair.base.center();
        Self {
            name: pair.name,
            base: pair.base,
            changed: pair.changed,
            ratio,
            direction: Direction::from_ratio(pair.base.unit(), ratio),
            significance: significance(pair.base.samples(), pair.changed.samples()),
        }
    }

    /// Change magnitude, always at least 1.
    #[must_use]
    pub fn factor(&self) -> f64 {
        if self.ratio > 1.0 {
            self.ratio
        } else {
            1.0 / self.ratio
        }
    }

    /// `"1.19x slower"`.
    #[must_use]
    pub fn change_label(&self) -> String {
        format!("{:.2}x {}", self.factor(), self.direction)
    }

    /// Returns `true` if either side has a single sample.
    #[must_use]
    pub fn is_single_sample(&self) -> bool {
        self.base.is_single_sample() || self.changed.is_single_sample()
    }

    /// First line of the text report:
    /// `Median +- Std dev: 11.4 ms +- 2.1 ms -> 13.6 ms +- 1.3 ms: 1.19x slower`.
    #[must_use]
    pub fn summary_line(&self) -> String {
        let base = describe(self.base);
        let changed = describe(self.changed);
        if self.is_single_sample() {
            format!("{base} -> {changed}: {}", self.change_label())
        } else {
            format!(
                "Median +- Std dev: {base} -> {changed}: {}",
                self.change_label()
            )
        }
    }

    /// Second line of the text report, absent for single-sample benchmarks.
    #[must_use]
    pub fn significance_line(&self) -> Option<String> {
        match self.significance {
            Significance::SingleSample => None,
            other => Some(other.to_string()),
        }
    }

    /// Table cell for the base side: median, or the single value.
    #[must_use]
    pub fn base_cell(&self) -> String {
        display_value(self.base)
    }

    /// Table cell for the changed side: median, or the single value.
    #[must_use]
    pub fn changed_cell(&self) -> String {
        display_value(self.changed)
    }
}

/// `"<median> +- <stddev>"`, or the bare value for a single sample.
fn describe(result: &BenchmarkResult) -> String {
    if result.is_single_sample() {
        return format_value(result.unit(), result.center());
    }
    let summary = result.summary();
    let parts = format_values(result.unit(), &[summary.median, summary.stddev]);
    format!("{} +- {}", parts[0], parts[1])
}

fn display_value(result: &BenchmarkResult) -> String {
    if result.is_single_sample() {
        format_value(result.unit(), result.center())
    } else {
        format_value(result.unit(), result.summary().median)
    }
}
