//! Two-sample Student t-test at the 95% confidence level.
//!
//! Uses the pooled-variance form of the test and a two-tailed critical value
//! lookup, so no distribution functions are needed at runtime.

use core::fmt;

use crate::summary::{mean, sum_of_squares};

/// Two-tailed 95% critical values of Student's t distribution, indexed by
/// degrees of freedom (index 0 is unused).
const T_DIST_95: [f64; 31] = [
    0.0, 12.706, 4.303, 3.182, 2.776, 2.571, 2.447, 2.365, 2.306, 2.262, 2.228, 2.201, 2.179,
    2.160, 2.145, 2.131, 2.120, 2.110, 2.101, 2.093, 2.086, 2.080, 2.074, 2.069, 2.064, 2.060,
    2.056, 2.052, 2.048, 2.045, 2.042,
];

/// Outcome of comparing two benchmark sample sets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Significance {
    /// The difference is significant; carries the t statistic.
    Significant {
        /// `(mean(base) - mean(changed))` over the pooled standard error.
        t_score: f64,
    },
    /// The difference is within sampling noise.
    NotSignificant {
        /// The t statistic that failed to cross the critical value.
        t_score: f64,
    },
    /// At least one side has a single sample, so no test was run.
    SingleSample,
}

impl Significance {
    /// The t statistic, if a test was run.
    #[must_use]
    pub fn t_score(&self) -> Option<f64> {
        match *self {
            Self::Significant { t_score } | Self::NotSignificant { t_score } => Some(t_score),
            Self::SingleSample => None,
        }
    }
}

impl fmt::Display for Significance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Significant { t_score } => write!(f, "Significant (t={t_score:.2})"),
            Self::NotSignificant { .. } => write!(f, "Not significant"),
            Self::SingleSample => write!(f, "(benchmark only contains a single sample)"),
        }
    }
}

/// Two-tailed 95% critical value for `df` degrees of freedom.
///
/// Exact table entries up to 30; beyond that the next lower tabulated
/// value is used, converging on the normal approximation of 1.960.
#[must_use]
pub fn critical_value_95(df: usize) -> f64 {
    match df {
        200.. => 1.960,
        100.. => 1.984,
        80.. => 1.990,
        60.. => 2.000,
        50.. => 2.009,
        40.. => 2.021,
        _ if df >= T_DIST_95.len() => T_DIST_95[T_DIST_95.len() - 1],
        _ => T_DIST_95[df],
    }
}

/// Pooled-variance t statistic of `base` against `changed`.
///
/// Returns `None` when either side has fewer than two samples. A negative
/// value means `changed` has the larger mean.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn t_score(base: &[f64], changed: &[f64]) -> Option<f64> {
    let (n1, n2) = (base.len(), changed.len());
    if n1 < 2 || n2 < 2 {
        return None;
    }

    let m1 = mean(base)?;
    let m2 = mean(changed)?;
    let df = (n1 + n2 - 2) as f64;
    let pooled_variance = (sum_of_squares(base, m1) + sum_of_squares(changed, m2)) / df;
    let diff = m1 - m2;

    if pooled_variance == 0.0 {
        // No spread on either side: identical means are indistinguishable,
        // anything else is an exact shift.
        return Some(if diff == 0.0 {
            0.0
        } else {
            f64::INFINITY.copysign(diff)
        });
    }

    let error = pooled_variance * (1.0 / n1 as f64 + 1.0 / n2 as f64);
    Some(diff / error.sqrt())
}

/// Run a two-tailed t-test between `base` and `changed` at 95% confidence.
#[must_use]
pub fn significance(base: &[f64], changed: &[f64]) -> Significance {
    let Some(t_score) = t_score(base, changed) else {
        return Significance::SingleSample;
    };

    let df = base.len() + changed.len() - 2;
    if t_score.abs() >= critical_value_95(df) {
        Significance::Significant { t_score }
    } else {
        Significance::NotSignificant { t_score }
    }
}
