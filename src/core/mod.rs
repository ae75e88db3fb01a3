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

//! Core types and definitions for Tablesplit
//!
//! This module contains the columnar substrate the aggregation engine runs on:
//!
//! - [`ColumnType`] - Column kinds (DOUBLE, INTEGER, STRING, BOOLEAN, ...)
//! - [`Value`] - Scalar values with type information
//! - [`Column`] - Named, typed value sequences with missing-value sentinels
//! - [`Table`] - Ordered sets of equal-length columns
//! - [`Error`] - Error types for all operations

pub mod column;
pub mod error;
pub mod table;
pub mod types;
pub mod value;

// Re-export main types for convenience
pub use column::{missing, Column};
pub use error::{Error, Result};
pub use table::Table;
pub use types::ColumnType;
pub use value::{parse_date, parse_date_time, Value};
