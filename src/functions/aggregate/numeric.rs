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

//! Numeric aggregate functions
//!
//! Accept DOUBLE, FLOAT, SHORT, INTEGER and LONG columns, plus STRING/TEXT
//! columns whose cells parse as numbers. All return DOUBLE.
//!
//! Missing entries are dropped before reduction, except for the positional
//! functions ([`first`], [`last`], [`change`], [`pct_change`]) which read
//! raw entries by position.

use crate::core::{Column, ColumnType, Error, Result, Value};
use crate::functions::statistics;
use crate::functions::{AggregateFunction, FunctionFamily, Reducer};

fn numeric(
    name: &'static str,
    description: &'static str,
    column: impl Into<String>,
    reducer: Reducer,
) -> AggregateFunction {
    AggregateFunction::new(
        name,
        description,
        column,
        FunctionFamily::Numeric,
        ColumnType::Double,
        reducer,
    )
}

/// Apply a statistic to the non-missing values of a column
fn over_values(column: &Column, statistic: fn(&[f64]) -> f64) -> Result<Value> {
    Ok(Value::Float(statistic(&column.to_doubles()?)))
}

// ============================================================================
// Sums and means
// ============================================================================

/// SUM - sum of non-missing values
pub fn sum(column: impl Into<String>) -> AggregateFunction {
    numeric("Sum", "Sum of the non-missing values", column, |c| {
        over_values(c, statistics::sum)
    })
}

/// MEAN - arithmetic mean of non-missing values
pub fn mean(column: impl Into<String>) -> AggregateFunction {
    numeric("Mean", "Arithmetic mean of the non-missing values", column, |c| {
        over_values(c, statistics::mean)
    })
}

/// PRODUCT - product of non-missing values
pub fn product(column: impl Into<String>) -> AggregateFunction {
    numeric("Product", "Product of the non-missing values", column, |c| {
        over_values(c, statistics::product)
    })
}

/// GEOMETRIC MEAN - `exp(mean(ln x))` of non-missing values
pub fn geometric_mean(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Geometric Mean",
        "Geometric mean of the non-missing values",
        column,
        |c| over_values(c, statistics::geometric_mean),
    )
}

/// QUADRATIC MEAN - root mean square of non-missing values
pub fn quadratic_mean(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Quadratic Mean",
        "Root mean square of the non-missing values",
        column,
        |c| over_values(c, statistics::quadratic_mean),
    )
}

/// SUM OF SQUARES
pub fn sum_of_squares(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Sum of Squares",
        "Sum of the squared non-missing values",
        column,
        |c| over_values(c, statistics::sum_of_squares),
    )
}

/// SUM OF LOGS - sum of natural logarithms
pub fn sum_of_logs(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Sum of Logs",
        "Sum of the natural logarithms of the non-missing values",
        column,
        |c| over_values(c, statistics::sum_of_logs),
    )
}

// ============================================================================
// Order statistics
// ============================================================================

/// MEDIAN - 50th percentile
pub fn median(column: impl Into<String>) -> AggregateFunction {
    numeric("Median", "50th percentile of the non-missing values", column, |c| {
        percentile_value(c, 50.0)
    })
}

/// FIRST QUARTILE - 25th percentile
pub fn quartile1(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "First Quartile",
        "25th percentile of the non-missing values",
        column,
        |c| percentile_value(c, 25.0),
    )
}

/// THIRD QUARTILE - 75th percentile
pub fn quartile3(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Third Quartile",
        "75th percentile of the non-missing values",
        column,
        |c| percentile_value(c, 75.0),
    )
}

/// 90TH PERCENTILE
pub fn percentile90(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "90th Percentile",
        "90th percentile of the non-missing values",
        column,
        |c| percentile_value(c, 90.0),
    )
}

/// 95TH PERCENTILE
pub fn percentile95(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "95th Percentile",
        "95th percentile of the non-missing values",
        column,
        |c| percentile_value(c, 95.0),
    )
}

/// 99TH PERCENTILE
pub fn percentile99(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "99th Percentile",
        "99th percentile of the non-missing values",
        column,
        |c| percentile_value(c, 99.0),
    )
}

/// MIN - smallest non-missing value
pub fn min(column: impl Into<String>) -> AggregateFunction {
    numeric("Min", "Smallest non-missing value", column, |c| {
        over_values(c, statistics::min)
    })
}

/// MAX - largest non-missing value
pub fn max(column: impl Into<String>) -> AggregateFunction {
    numeric("Max", "Largest non-missing value", column, |c| {
        over_values(c, statistics::max)
    })
}

/// RANGE - max minus min
pub fn range(column: impl Into<String>) -> AggregateFunction {
    numeric("Range", "Largest minus smallest non-missing value", column, |c| {
        let values = c.to_doubles()?;
        Ok(Value::Float(
            statistics::max(&values) - statistics::min(&values),
        ))
    })
}

fn percentile_value(column: &Column, p: f64) -> Result<Value> {
    Ok(Value::Float(statistics::percentile(&column.to_doubles()?, p)))
}

/// Percentile `p` of the non-missing values of a numeric or numeric-text column
pub fn percentile(column: &Column, p: f64) -> Result<f64> {
    let coerced = FunctionFamily::Numeric.coerce(column)?;
    Ok(statistics::percentile(&coerced.to_doubles()?, p))
}

// ============================================================================
// Dispersion and shape
// ============================================================================

/// VARIANCE - sample variance
pub fn variance(column: impl Into<String>) -> AggregateFunction {
    numeric("Variance", "Sample variance of the non-missing values", column, |c| {
        over_values(c, statistics::variance)
    })
}

/// POPULATION VARIANCE
pub fn population_variance(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Population Variance",
        "Population variance of the non-missing values",
        column,
        |c| over_values(c, statistics::population_variance),
    )
}

/// STD. DEVIATION - sample standard deviation
pub fn std_dev(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Std. Deviation",
        "Sample standard deviation of the non-missing values",
        column,
        |c| over_values(c, statistics::standard_deviation),
    )
}

/// Synonym for [`std_dev`]
pub fn standard_deviation(column: impl Into<String>) -> AggregateFunction {
    std_dev(column)
}

/// SKEWNESS - bias-corrected sample skewness
pub fn skewness(column: impl Into<String>) -> AggregateFunction {
    numeric("Skewness", "Sample skewness of the non-missing values", column, |c| {
        over_values(c, statistics::skewness)
    })
}

/// KURTOSIS - bias-corrected sample excess kurtosis
pub fn kurtosis(column: impl Into<String>) -> AggregateFunction {
    numeric("Kurtosis", "Sample kurtosis of the non-missing values", column, |c| {
        over_values(c, statistics::kurtosis)
    })
}

// ============================================================================
// Positional
// ============================================================================

/// FIRST - the first entry; missing when the column is empty
pub fn first(column: impl Into<String>) -> AggregateFunction {
    numeric("First", "First entry of the column", column, |c| {
        if c.is_empty() {
            return Ok(Value::Float(f64::NAN));
        }
        Ok(Value::Float(c.get_double(0)?))
    })
}

/// LAST - the last entry; missing when the column is empty
pub fn last(column: impl Into<String>) -> AggregateFunction {
    numeric("Last", "Last entry of the column", column, |c| {
        if c.is_empty() {
            return Ok(Value::Float(f64::NAN));
        }
        Ok(Value::Float(c.get_double(c.len() - 1)?))
    })
}

/// CHANGE - last entry minus first entry; missing with fewer than 2 entries
pub fn change(column: impl Into<String>) -> AggregateFunction {
    numeric("Change", "Last entry minus first entry", column, |c| {
        if c.len() < 2 {
            return Ok(Value::Float(f64::NAN));
        }
        Ok(Value::Float(c.get_double(c.len() - 1)? - c.get_double(0)?))
    })
}

/// PERCENT CHANGE - (last - first) / first; missing with fewer than 2 entries
pub fn pct_change(column: impl Into<String>) -> AggregateFunction {
    numeric(
        "Percent Change",
        "Change from the first to the last entry, relative to the first",
        column,
        |c| {
            if c.len() < 2 {
                return Ok(Value::Float(f64::NAN));
            }
            let first = c.get_double(0)?;
            Ok(Value::Float((c.get_double(c.len() - 1)? - first) / first))
        },
    )
}

// ============================================================================
// Two-column reductions
// ============================================================================

fn paired(a: &Column, b: &Column) -> Result<(Vec<f64>, Vec<f64>)> {
    if a.len() != b.len() {
        return Err(Error::invalid_argument(format!(
            "columns '{}' and '{}' differ in length ({} vs {})",
            a.name(),
            b.name(),
            a.len(),
            b.len()
        )));
    }
    let a = FunctionFamily::Numeric.coerce(a)?;
    let b = FunctionFamily::Numeric.coerce(b)?;
    let left = (0..a.len()).map(|r| a.get_double(r)).collect::<Result<_>>()?;
    let right = (0..b.len()).map(|r| b.get_double(r)).collect::<Result<_>>()?;
    Ok((left, right))
}

/// Sum of row-wise differences `a - b`
pub fn sum_difference(a: &Column, b: &Column) -> Result<f64> {
    let (left, right) = paired(a, b)?;
    Ok(statistics::sum_difference(&left, &right))
}

/// Mean of row-wise differences `a - b`
pub fn mean_difference(a: &Column, b: &Column) -> Result<f64> {
    let (left, right) = paired(a, b)?;
    Ok(statistics::mean_difference(&left, &right))
}
