//! Descriptive statistics over spread and volume series.
//!
//! Empty inputs yield `0.0` rather than an error so callers can fold
//! partial histories without special cases.

/// Arithmetic mean, `0.0` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median (mean of the two middle values for even lengths), `0.0` when empty.
#[must_use]
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Sample standard deviation (n - 1), `0.0` below two points.
#[must_use]
pub fn sample_std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    (sum_sq / (values.len() - 1) as f64).sqrt()
}

/// Mean over strictly positive entries only, `0.0` if there are none.
#[must_use]
pub fn nonzero_mean(values: &[f64]) -> f64 {
    let positive: Vec<f64> = values.iter().copied().filter(|v| *v > 0.0).collect();
    mean(&positive)
}

#[must_use]
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

#[must_use]
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::INFINITY, f64::min)
}

/// Ordinary least-squares slope of `ys` against `x = 0..n-1`.
///
/// `Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²`. Returns `None` when the x variance is zero
/// (fewer than two points).
#[must_use]
pub fn ols_slope(ys: &[f64]) -> Option<f64> {
    let n = ys.len();
    if n < 2 {
        return None;
    }
    let mean_x = (n - 1) as f64 / 2.0;

    let denominator: f64 = (0..n).map(|x| (x as f64 - mean_x).powi(2)).sum();
    if denominator == 0.0 {
        return None;
    }

    // x - x̄ is antisymmetric around the centre, so each point pairs with its
    // mirror and ȳ cancels. A constant series gives exactly zero.
    let numerator: f64 = (0..n / 2)
        .map(|x| (x as f64 - mean_x) * (ys[x] - ys[n - 1 - x]))
        .sum();

    Some(numerator / denominator)
}

/// Percentage of `values` strictly below `value`, `0.0` when empty.
///
/// Order of `values` does not matter.
#[must_use]
pub fn rank_percentile(value: f64, values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let below = values.iter().filter(|v| **v < value).count();
    below as f64 / values.len() as f64 * 100.0
}
