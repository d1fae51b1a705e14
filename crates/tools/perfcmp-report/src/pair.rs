//! Matching benchmarks between two result sets.

use crate::suite::{BenchmarkResult, ResultSet};

/// A benchmark present in both result sets.
#[derive(Debug, Clone, Copy)]
pub struct BenchmarkPair<'a> {
    /// Shared benchmark name.
    pub name: &'a str,
    /// Result from the first (base) set.
    pub base: &'a BenchmarkResult,
    /// Result from the second (changed) set.
    pub changed: &'a BenchmarkResult,
}

/// Outcome of pairing two result sets.
#[derive(Debug, Clone, Default)]
pub struct Pairing<'a> {
    /// Comparable benchmarks, in base-set order.
    pub pairs: Vec<BenchmarkPair<'a>>,
    /// Names found only in the base set.
    pub base_only: Vec<&'a str>,
    /// Names found only in the changed set.
    pub changed_only: Vec<&'a str>,
    /// Names present in both sets but measured in different units.
    pub unit_mismatch: Vec<&'a str>,
}

/// Pair benchmarks of `base` and `changed` by name.
///
/// Iterates in `base` order. Benchmarks missing from either side are left
/// out of [`Pairing::pairs`] and listed separately; an empty intersection
/// is a valid, empty pairing.
#[must_use]
pub fn pair_benchmarks<'a>(base: &'a ResultSet, changed: &'a ResultSet) -> Pairing<'a> {
    let mut pairing = Pairing::default();

    for bench in base.iter() {
        let name = bench.name();
        match changed.get(name) {
            Some(other) if other.unit() == bench.unit() => pairing.pairs.push(BenchmarkPair {
                name,
                base: bench,
                changed: other,
            }),
            Some(_) => pairing.unit_mismatch.push(name),
            None => pairing.base_only.push(name),
        }
    }

    pairing.changed_only = changed.names().filter(|name| !base.contains(name)).collect();
    pairing
}
