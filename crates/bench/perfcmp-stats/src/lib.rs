//! Statistics for benchmark sample comparison.
//!
//! Provides descriptive statistics over floating-point samples and a
//! pooled-variance Student t-test used to decide whether the difference
//! between two benchmark runs is significant at the 95% level.
//!
//! All functions take plain `&[f64]` slices and never mutate their input.

#![warn(missing_docs)]

/// Descriptive statistics (mean, median, standard deviation).
pub mod summary;
/// Two-sample significance testing.
pub mod ttest;

pub use summary::{Summary, mean, median, stddev};
pub use ttest::{Significance, critical_value_95, significance, t_score};
