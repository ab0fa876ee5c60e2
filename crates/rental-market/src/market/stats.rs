//! Descriptive statistics over listing prices.
//!
//! None of these guard against an empty sample; they return `NaN` and callers
//! short-circuit to a "no data" state before analysing an empty collection.

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn median(values: &[f64]) -> f64 {
    let sorted = sorted(values);
    let len = sorted.len();
    if len == 0 {
        return f64::NAN;
    }

    let mid = len / 2;
    if len % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

/// Picks an element of the sorted sample rather than interpolating between two.
///
/// The index is `round(p / 100 × (n − 1))`, clamped to `[0, n − 1]`, so
/// `[10, 20, 30, 40]` gives 20 at p25 and 30 at p75.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    let sorted = sorted(values);
    let len = sorted.len();
    if len == 0 {
        return f64::NAN;
    }

    let last = len - 1;
    let position = (p / 100.0 * last as f64).round();
    let index = if position.is_nan() || position < 0.0 {
        0
    } else {
        (position as usize).min(last)
    };
    sorted[index]
}

pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

pub fn price_range(values: &[f64]) -> f64 {
    max(values) - min(values)
}

fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
}
