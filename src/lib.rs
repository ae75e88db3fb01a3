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

//! # Tablesplit - Split-apply-combine aggregation for columnar tables
//!
//! Tablesplit partitions the rows of a typed, columnar table into groups,
//! reduces member columns of each group with aggregate functions, and
//! recombines the results into one summary table.
//!
//! ## Key Features
//!
//! - **Typed Columns** - Numeric, textual, boolean and temporal columns with missing-value sentinels
//! - **40+ Aggregate Functions** - Moments, percentiles, boolean quantifiers, counts, date extremes
//! - **Value and Positional Grouping** - Group by column values or by fixed-size row windows
//! - **Automatic Coercion** - Numeric functions parse textual columns
//! - **Parallel Reduction** - Large groupings reduce slices on Rayon
//!
//! ## Quick Start
//!
//! ```rust
//! use tablesplit::core::{Column, Table};
//! use tablesplit::functions::aggregate::{mean, sum};
//!
//! let table = Table::with_columns(
//!     "Cute Animals",
//!     vec![
//!         Column::strings("types", ["cat", "bear", "giraffe", "cat"]),
//!         Column::doubles("rating", [90.1, 84.3, 99.7, 2.0]),
//!     ],
//! )
//! .unwrap();
//!
//! let summary = table
//!     .summarize(vec![sum("rating"), mean("rating").with_alias("avg")])
//!     .unwrap()
//!     .by(&["types"])
//!     .unwrap();
//!
//! assert_eq!(summary.row_count(), 3);
//! assert_eq!(summary.column_names(), vec!["types", "rating [Sum]", "avg"]);
//! ```
//!
//! ## Modules
//!
//! - [`core`] - Core types ([`ColumnType`], [`Value`], [`Column`], [`Table`], [`Error`])
//! - [`functions`] - Aggregate functions, their families, and the registry
//! - [`executor`] - Slice groups and the [`Summarizer`]
//! - [`common`] - Number parsing utilities

pub mod common;
pub mod core;
pub mod executor;
pub mod functions;

// Re-export main types for convenience
pub use core::{Column, ColumnType, Error, Result, Table, Value};

// Re-export function types
pub use functions::{
    aggregate, global_registry, AggregateFunction, FunctionFamily, FunctionInfo, FunctionRegistry,
};

// Re-export executor types
pub use executor::{ParallelConfig, Summarizer, TableSlice, TableSliceGroup};
