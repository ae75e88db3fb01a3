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

//! Function Registry
//!
//! This module provides lookup of the built-in aggregate function factories
//! by name, for callers that pick functions at runtime.

use std::sync::OnceLock;

use rustc_hash::FxHashMap;

use super::aggregate;
use super::{AggregateFunction, FunctionInfo};
use crate::core::{Error, Result};

/// Global function registry instance
static GLOBAL_REGISTRY: OnceLock<FunctionRegistry> = OnceLock::new();

/// Get the global function registry
#[inline]
pub fn global_registry() -> &'static FunctionRegistry {
    GLOBAL_REGISTRY.get_or_init(FunctionRegistry::new)
}

/// Type alias for aggregate function factory
type AggregateFnFactory = fn(String) -> AggregateFunction;

/// Read-only table of aggregate function factories
///
/// Keys are case-insensitive and ignore underscores, so `"stdDev"`,
/// `"STD_DEV"` and `"stddev"` name the same function.
pub struct FunctionRegistry {
    factories: FxHashMap<&'static str, AggregateFnFactory>,
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FunctionRegistry {
    /// Create a new function registry with all built-in functions registered
    pub fn new() -> Self {
        let mut registry = Self {
            factories: FxHashMap::default(),
        };

        // Numeric functions
        registry.register("sum", |c| aggregate::sum(c));
        registry.register("mean", |c| aggregate::mean(c));
        registry.register("median", |c| aggregate::median(c));
        registry.register("quartile1", |c| aggregate::quartile1(c));
        registry.register("quartile3", |c| aggregate::quartile3(c));
        registry.register("percentile90", |c| aggregate::percentile90(c));
        registry.register("percentile95", |c| aggregate::percentile95(c));
        registry.register("percentile99", |c| aggregate::percentile99(c));
        registry.register("min", |c| aggregate::min(c));
        registry.register("max", |c| aggregate::max(c));
        registry.register("range", |c| aggregate::range(c));
        registry.register("product", |c| aggregate::product(c));
        registry.register("geometricmean", |c| aggregate::geometric_mean(c));
        registry.register("populationvariance", |c| aggregate::population_variance(c));
        registry.register("variance", |c| aggregate::variance(c));
        registry.register("stddev", |c| aggregate::std_dev(c));
        registry.register("standarddeviation", |c| aggregate::standard_deviation(c));
        registry.register("quadraticmean", |c| aggregate::quadratic_mean(c));
        registry.register("skewness", |c| aggregate::skewness(c));
        registry.register("kurtosis", |c| aggregate::kurtosis(c));
        registry.register("sumofsquares", |c| aggregate::sum_of_squares(c));
        registry.register("sumoflogs", |c| aggregate::sum_of_logs(c));
        registry.register("first", |c| aggregate::first(c));
        registry.register("last", |c| aggregate::last(c));
        registry.register("change", |c| aggregate::change(c));
        registry.register("pctchange", |c| aggregate::pct_change(c));

        // Boolean functions
        registry.register("counttrue", |c| aggregate::count_true(c));
        registry.register("countfalse", |c| aggregate::count_false(c));
        registry.register("alltrue", |c| aggregate::all_true(c));
        registry.register("anytrue", |c| aggregate::any_true(c));
        registry.register("nonetrue", |c| aggregate::none_true(c));
        registry.register("proportiontrue", |c| aggregate::proportion_true(c));
        registry.register("proportionfalse", |c| aggregate::proportion_false(c));

        // Date/Time functions
        registry.register("earliestdate", |c| aggregate::earliest_date(c));
        registry.register("latestdate", |c| aggregate::latest_date(c));
        registry.register("earliestdatetime", |c| aggregate::earliest_date_time(c));
        registry.register("latestdatetime", |c| aggregate::latest_date_time(c));

        // Counting functions
        registry.register("count", |c| aggregate::count(c));
        registry.register("countnonmissing", |c| aggregate::count_non_missing(c));
        registry.register("countmissing", |c| aggregate::count_missing(c));
        registry.register("countwithmissing", |c| aggregate::count_with_missing(c));
        registry.register("countunique", |c| aggregate::count_unique(c));

        registry
    }

    fn register(&mut self, key: &'static str, factory: AggregateFnFactory) {
        self.factories.insert(key, factory);
    }

    fn lookup(&self, key: &str) -> Option<AggregateFnFactory> {
        // Fast path - key is already normalized
        if let Some(f) = self.factories.get(key) {
            return Some(*f);
        }
        let normalized: String = key
            .chars()
            .filter(|c| *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        self.factories.get(normalized.as_str()).copied()
    }

    /// Build the function registered under `key`, targeting `column`
    pub fn create(&self, key: &str, column: impl Into<String>) -> Result<AggregateFunction> {
        self.lookup(key)
            .map(|f| f(column.into()))
            .ok_or_else(|| Error::invalid_argument(format!("unknown aggregate function '{}'", key)))
    }

    /// Check if a function is registered under `key`
    pub fn contains(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Get function info by key
    pub fn info(&self, key: &str) -> Option<FunctionInfo> {
        self.lookup(key).map(|f| f(String::new()).info())
    }

    /// List all registered keys, sorted
    pub fn function_names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnType;
    use crate::functions::FunctionFamily;

    #[test]
    fn test_registry_case_insensitive() {
        let registry = global_registry();
        assert!(registry.contains("sum"));
        assert!(registry.contains("SUM"));
        assert!(registry.contains("countUnique"));
        assert!(registry.contains("count_unique"));
        assert!(!registry.contains("string_agg"));
    }

    #[test]
    fn test_create() {
        let f = global_registry().create("StdDev", "rating").unwrap();
        assert_eq!(f.function_name(), "Std. Deviation");
        assert_eq!(f.target_column(), "rating");

        let err = global_registry().create("nope", "rating").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_function_names_sorted() {
        let names = global_registry().function_names();
        assert_eq!(names.len(), 42);
        let mut sorted = names.clone();
        sorted.sort_unstable();
        assert_eq!(names, sorted);
        assert!(names.contains(&"percentile90"));
    }

    #[test]
    fn test_info() {
        let info = global_registry().info("earliestDate").unwrap();
        assert_eq!(info.name, "Earliest Date");
        assert_eq!(info.family, FunctionFamily::Date);
        assert_eq!(info.return_type, ColumnType::LocalDate);
        assert!(global_registry().info("nope").is_none());
    }
}
