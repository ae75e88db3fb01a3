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

//! Split-Apply-Combine Executor
//!
//! This module splits tables into groups and reduces each group with
//! aggregate functions.
//!
//! # Architecture
//!
//! ```text
//! Summarizer (working table, compatibility resolution)
//!   ↓
//! TableSliceGroup (standard | selection | whole)
//!   ↓
//! per slice: AggregateFunction::summarize
//!   ↓
//! partial table per target column
//!   ↓
//! combine_tables
//! ```
//!
//! # Components
//!
//! - [`Summarizer`] - Orchestrates a summary of one table
//! - [`TableSliceGroup`] - Ordered grouping of rows, with aggregation
//! - [`TableSlice`] - Named row subset of a source table
//! - [`ParallelConfig`] - When per-slice reduction runs on Rayon

pub mod parallel;
pub mod selection;
pub mod slice;
pub mod slice_group;
pub mod standard;
pub mod summarizer;

// Re-export main types
pub use parallel::{ParallelConfig, DEFAULT_PARALLEL_SLICE_THRESHOLD};
pub use slice::TableSlice;
pub use slice_group::{
    combine_tables, SliceGroupKind, TableSliceGroup, SELECTION_GROUP_COLUMN, SUMMARY_TABLE_SUFFIX,
};
pub use standard::{group_key, SPLIT_STRING};
pub use summarizer::Summarizer;
