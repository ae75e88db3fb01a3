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

//! Aggregate Functions
//!
//! Factories for the built-in [`AggregateFunction`](super::AggregateFunction)s,
//! one module per family:
//!
//! - [`numeric`] - sum, mean, median, quartiles, percentiles, variance, ...
//! - [`boolean`] - countTrue, allTrue, proportionTrue, ...
//! - [`temporal`] - earliest and latest dates and date-times
//! - [`count`] - counts valid for any column type
//!
//! Every factory takes the target column name:
//!
//! ```
//! use tablesplit::functions::aggregate::{count_unique, mean};
//!
//! let avg = mean("rating").with_alias("average rating");
//! assert_eq!(avg.output_column_name(), "average rating");
//! assert_eq!(count_unique("who").output_column_name(), "who [Count Unique]");
//! ```

pub mod boolean;
pub mod count;
pub mod numeric;
pub mod temporal;

pub use boolean::{
    all_true, any_true, count_false, count_true, none_true, proportion_false, proportion_true,
};
pub use count::{count, count_missing, count_non_missing, count_unique, count_with_missing};
pub use numeric::{
    change, first, geometric_mean, kurtosis, last, max, mean, mean_difference, median, min,
    pct_change, percentile, percentile90, percentile95, percentile99, population_variance,
    product, quadratic_mean, quartile1, quartile3, range, skewness, standard_deviation, std_dev,
    sum, sum_difference, sum_of_logs, sum_of_squares, variance,
};
pub use temporal::{earliest_date, earliest_date_time, latest_date, latest_date_time};
