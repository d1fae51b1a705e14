//! Floating-point descriptive statistics for benchmark samples.
//!
//! Every function returns `None` for an empty slice rather than producing
//! `NaN`, so callers decide how to treat missing data.

/// Computed statistics for one benchmark's samples.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Median sample value.
    pub median: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (0 for a single sample).
    pub stddev: f64,
}

impl Summary {
    /// Compute statistics from a slice of samples.
    ///
    /// Returns `None` if the slice is empty.
    #[must_use]
    pub fn compute(samples: &[f64]) -> Option<Self> {
        Some(Self {
            median: median(samples)?,
            mean: mean(samples)?,
            stddev: stddev(samples)?,
        })
    }
}

/// Arithmetic mean of `samples`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let sum: f64 = samples.iter().sum();
    Some(sum / samples.len() as f64)
}

/// Median of `samples`; the average of the two middle values for even counts.
#[must_use]
pub fn median(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(median_of_sorted(&sorted_copy(samples)))
}

/// Sample standard deviation (Bessel-corrected, `n - 1` denominator).
///
/// A single sample has no spread, so it yields `0.0` instead of dividing by
/// zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn stddev(samples: &[f64]) -> Option<f64> {
    let m = mean(samples)?;
    let n = samples.len();
    if n < 2 {
        return Some(0.0);
    }
    Some((sum_of_squares(samples, m) / (n - 1) as f64).sqrt())
}

/// Sum of squared deviations from the mean.
pub(crate) fn sum_of_squares(samples: &[f64], mean: f64) -> f64 {
    samples.iter().map(|&x| (x - mean) * (x - mean)).sum()
}

fn sorted_copy(samples: &[f64]) -> Vec<f64> {
    let mut sorted = samples.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 0 {
        f64::midpoint(sorted[n / 2 - 1], sorted[n / 2])
    } else {
        sorted[n / 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn summary_single_sample() {
        let stats = Summary::compute(&[42.0]).unwrap();
        assert_eq!(stats.median, 42.0);
        assert_eq!(stats.mean, 42.0);
        assert_eq!(stats.stddev, 0.0);
    }

    #[test]
    fn summary_two_samples() {
        let stats = Summary::compute(&[10.0, 20.0]).unwrap();
        assert_eq!(stats.median, 15.0);
        assert_eq!(stats.mean, 15.0);
        assert!(approx(stats.stddev, 50.0_f64.sqrt()));
    }

    #[test]
    fn summary_odd_count_unsorted() {
        let stats = Summary::compute(&[5.0, 1.0, 9.0, 3.0, 7.0]).unwrap();
        assert_eq!(stats.median, 5.0);
        assert_eq!(stats.mean, 5.0);
        assert!(approx(stats.stddev, 10.0_f64.sqrt()));
    }

    #[test]
    fn summary_empty() {
        assert!(Summary::compute(&[]).is_none());
        assert!(mean(&[]).is_none());
        assert!(median(&[]).is_none());
        assert!(stddev(&[]).is_none());
    }

    #[test]
    fn median_even_count() {
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
        assert_eq!(median(&[f64::MAX, f64::MAX]), Some(f64::MAX));
    }

    #[test]
    fn stddev_single_is_zero() {
        assert_eq!(stddev(&[7896.0]), Some(0.0));
    }

    #[test]
    fn stddev_constant_samples() {
        assert_eq!(stddev(&[3.0, 3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn input_is_not_reordered() {
        let samples = [3.0, 1.0, 2.0];
        let _ = Summary::compute(&samples);
        assert_eq!(samples, [3.0, 1.0, 2.0]);
    }
}
