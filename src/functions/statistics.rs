// Copyright 2025 Tablesplit Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Descriptive statistics over `f64` slices
//!
//! Every routine expects missing values to be filtered out already and
//! returns NaN for input too short to define the statistic.

// ============================================================================
// Sums and products
// ============================================================================

/// Sum of values. NaN when empty.
pub fn sum(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum()
}

/// Product of values. NaN when empty.
pub fn product(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().product()
}

/// Sum of squares. NaN when empty.
pub fn sum_of_squares(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().map(|x| x * x).sum()
}

/// Sum of natural logarithms. NaN when empty.
pub fn sum_of_logs(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().map(|x| x.ln()).sum()
}

// ============================================================================
// Location
// ============================================================================

/// Arithmetic mean. NaN when empty.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Geometric mean, `exp(sum(ln x) / n)`. NaN when empty.
pub fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    (sum_of_logs(values) / values.len() as f64).exp()
}

/// Root mean square. NaN when empty.
pub fn quadratic_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    (sum_of_squares(values) / values.len() as f64).sqrt()
}

/// Minimum. NaN when empty.
pub fn min(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::min).unwrap_or(f64::NAN)
}

/// Maximum. NaN when empty.
pub fn max(values: &[f64]) -> f64 {
    values.iter().copied().reduce(f64::max).unwrap_or(f64::NAN)
}

/// Percentile `p` in `(0, 100]`.
///
/// Estimated at position `p * (n + 1) / 100` in the sorted data, linearly
/// interpolating between the two neighbouring order statistics. Positions
/// before the first or past the last element clamp to the minimum or
/// maximum. NaN when empty or when `p` is out of range.
pub fn percentile(values: &[f64], p: f64) -> f64 {
    if values.is_empty() || !(p > 0.0 && p <= 100.0) {
        return f64::NAN;
    }
    if values.len() == 1 {
        return values[0];
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let pos = p * (n + 1.0) / 100.0;
    let fpos = pos.floor();
    let dif = pos - fpos;

    if pos < 1.0 {
        return sorted[0];
    }
    if pos >= n {
        return sorted[sorted.len() - 1];
    }

    let int_pos = fpos as usize;
    let lower = sorted[int_pos - 1];
    let upper = sorted[int_pos];
    lower + dif * (upper - lower)
}

// ============================================================================
// Dispersion and shape
// ============================================================================

/// Sum of squared deviations from the mean, with a compensation term for
/// rounding in the mean
fn centered_sum_of_squares(values: &[f64], m: f64) -> f64 {
    let (accum, accum2) = values.iter().fold((0.0, 0.0), |(a, a2), x| {
        let dev = x - m;
        (a + dev * dev, a2 + dev)
    });
    accum - accum2 * accum2 / values.len() as f64
}

/// Sample variance (n - 1 denominator). NaN when empty, 0 for one value.
pub fn variance(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => 0.0,
        n => centered_sum_of_squares(values, mean(values)) / (n as f64 - 1.0),
    }
}

/// Population variance (n denominator). NaN when empty, 0 for one value.
pub fn population_variance(values: &[f64]) -> f64 {
    match values.len() {
        0 => f64::NAN,
        1 => 0.0,
        n => centered_sum_of_squares(values, mean(values)) / n as f64,
    }
}

/// Sample standard deviation
pub fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Bias-corrected sample skewness. NaN for fewer than 3 values.
pub fn skewness(values: &[f64]) -> f64 {
    let len = values.len();
    if len < 3 {
        return f64::NAN;
    }

    let m = mean(values);
    let var = variance(values);
    if var < 10e-20 {
        return 0.0;
    }

    let n = len as f64;
    let accum3 = values.iter().map(|x| (x - m).powi(3)).sum::<f64>() / (var * var.sqrt());
    (n / ((n - 1.0) * (n - 2.0))) * accum3
}

/// Bias-corrected sample excess kurtosis. NaN for fewer than 4 values.
pub fn kurtosis(values: &[f64]) -> f64 {
    let len = values.len();
    if len < 4 {
        return f64::NAN;
    }

    let m = mean(values);
    let std_dev = standard_deviation(values);
    let accum3 = values.iter().map(|x| (x - m).powi(4)).sum::<f64>() / std_dev.powi(4);

    let n = len as f64;
    let coefficient_one = (n * (n + 1.0)) / ((n - 1.0) * (n - 2.0) * (n - 3.0));
    let term_two = (3.0 * (n - 1.0).powi(2)) / ((n - 2.0) * (n - 3.0));
    coefficient_one * accum3 - term_two
}

// ============================================================================
// Paired samples
// ============================================================================

/// Sum of pairwise differences `a[i] - b[i]`. NaN when empty.
/// Callers guarantee equal lengths.
pub fn sum_difference(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() {
        return f64::NAN;
    }
    a.iter().zip(b).map(|(x, y)| x - y).sum()
}

/// Mean of pairwise differences `a[i] - b[i]`. NaN when empty.
/// Callers guarantee equal lengths.
pub fn mean_difference(a: &[f64], b: &[f64]) -> f64 {
    sum_difference(a, b) / a.len() as f64
}
