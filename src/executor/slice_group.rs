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

//! Table slice groups
//!
//! A [`TableSliceGroup`] is an ordered partition of a source table's rows
//! into [`TableSlice`]s, plus the machinery to reduce each slice with a batch
//! of [`AggregateFunction`]s and lay the results out as one summary row per
//! slice.
//!
//! Groups are built by one of three splitters:
//!
//! - [`TableSliceGroup::standard`] - rows with equal values in the grouping
//!   columns share a slice (see `standard.rs`)
//! - [`TableSliceGroup::selection`] - fixed-size positional windows (see
//!   `selection.rs`)
//! - [`TableSliceGroup::whole`] - a single slice over every row

use std::borrow::Cow;

use log::{debug, trace};
use rustc_hash::FxHashMap;

use super::parallel::{ordered_map, ParallelConfig};
use super::slice::TableSlice;
use crate::core::{Column, ColumnType, Result, Table, Value};
use crate::functions::{aggregate_column_name, AggregateFunction};

/// Name of the key column of a positional grouping
pub const SELECTION_GROUP_COLUMN: &str = "Group";

/// Suffix appended to the source table name to name a summary table
pub const SUMMARY_TABLE_SUFFIX: &str = "summary";

/// How the rows of a group were split
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliceGroupKind {
    /// By equality of grouping column values
    Standard,
    /// By fixed-size row windows
    Selection,
    /// One slice over the whole table
    Whole,
}

/// An ordered grouping of one table's rows
#[derive(Debug, Clone)]
pub struct TableSliceGroup<'a> {
    source: &'a Table,
    split_columns: Vec<&'a Column>,
    slices: Vec<TableSlice>,
    kind: SliceGroupKind,
    parallel: ParallelConfig,
}

impl<'a> TableSliceGroup<'a> {
    pub(crate) fn from_parts(
        source: &'a Table,
        split_columns: Vec<&'a Column>,
        slices: Vec<TableSlice>,
        kind: SliceGroupKind,
    ) -> Self {
        debug!(
            "split '{}' into {} slices over {} rows ({:?})",
            source.name(),
            slices.len(),
            source.row_count(),
            kind
        );
        Self {
            source,
            split_columns,
            slices,
            kind,
            parallel: ParallelConfig::default(),
        }
    }

    /// Group every row of `source` into one unnamed slice
    pub fn whole(source: &'a Table) -> Self {
        let slice = TableSlice::with_rows("", (0..source.row_count()).collect());
        Self::from_parts(source, Vec::new(), vec![slice], SliceGroupKind::Whole)
    }

    /// Set the parallel execution config used by aggregation
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// The table being grouped
    pub fn source(&self) -> &'a Table {
        self.source
    }

    /// Slices in group order
    pub fn slices(&self) -> &[TableSlice] {
        &self.slices
    }

    /// Number of slices
    pub fn len(&self) -> usize {
        self.slices.len()
    }

    /// Returns true if there are no slices
    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }

    pub fn kind(&self) -> SliceGroupKind {
        self.kind
    }

    /// Names of the columns the rows were split on, in declared order
    pub fn split_column_names(&self) -> Vec<&str> {
        self.split_columns.iter().map(|c| c.name()).collect()
    }

    /// Apply each function to its own target column.
    ///
    /// Functions are batched by target column in first-seen order; the
    /// partial tables are then combined column-wise.
    pub fn aggregate(&self, functions: &[AggregateFunction]) -> Result<Table> {
        let mut batches: Vec<(&str, Vec<AggregateFunction>)> = Vec::new();
        let mut index: FxHashMap<&str, usize> = FxHashMap::default();
        for function in functions {
            let column = function.target_column();
            let at = *index.entry(column).or_insert_with(|| {
                batches.push((column, Vec::new()));
                batches.len() - 1
            });
            batches[at].1.push(function.clone());
        }

        let partials = batches
            .iter()
            .map(|(column, fns)| self.aggregate_column(column, fns))
            .collect::<Result<Vec<_>>>()?;
        combine_tables(partials)
    }

    /// Apply every function to the named column.
    ///
    /// The result has one row per slice: the key columns, then one column per
    /// function named by its alias or `"<column> [<function>]"`.
    pub fn aggregate_column(&self, column: &str, functions: &[AggregateFunction]) -> Result<Table> {
        let source_column = self.source.column(column)?;
        let inputs = functions
            .iter()
            .map(|f| f.compatible_column(source_column))
            .collect::<Result<Vec<Cow<'_, Column>>>>()?;

        trace!(
            "aggregating '{}' with {} functions over {} slices",
            column,
            functions.len(),
            self.slices.len()
        );

        let rows: Vec<Vec<Value>> = ordered_map(&self.slices, &self.parallel, |slice| {
            functions
                .iter()
                .zip(&inputs)
                .map(|(function, input)| function.summarize(&slice.select(input)?))
                .collect()
        })?;

        let mut output = Table::new(self.summary_table_name());
        for key in self.key_columns()? {
            output.add_column(key)?;
        }
        for (i, function) in functions.iter().enumerate() {
            let name = match function.alias() {
                Some(alias) if !alias.is_empty() => alias.to_string(),
                _ => aggregate_column_name(source_column.name(), function.function_name()),
            };
            let mut result = Column::new(name, function.return_type());
            for row in &rows {
                result.append(&row[i])?;
            }
            output.add_column(result)?;
        }
        Ok(output)
    }

    fn summary_table_name(&self) -> String {
        format!("{} {}", self.source.name(), SUMMARY_TABLE_SUFFIX)
    }

    /// One key cell per slice: the grouping values of its first row, or the
    /// slice name for a positional grouping.
    fn key_columns(&self) -> Result<Vec<Column>> {
        match self.kind {
            SliceGroupKind::Whole => Ok(Vec::new()),
            SliceGroupKind::Selection => {
                let mut group = Column::new(SELECTION_GROUP_COLUMN, ColumnType::String);
                for slice in &self.slices {
                    group.append(&Value::text(slice.name()))?;
                }
                Ok(vec![group])
            }
            SliceGroupKind::Standard => self
                .split_columns
                .iter()
                .map(|split| {
                    let mut key = split.empty_copy();
                    for slice in &self.slices {
                        match slice.rows().first() {
                            Some(&row) => key.append(&split.get(row)?)?,
                            None => key.append_missing(),
                        }
                    }
                    Ok(key)
                })
                .collect(),
        }
    }
}

/// Combine partial summary tables that share one slice sequence.
///
/// The first table is the base; every column of a later table whose name is
/// not already present is appended to it.
pub fn combine_tables(partials: Vec<Table>) -> Result<Table> {
    let mut partials = partials.into_iter();
    let Some(mut base) = partials.next() else {
        return Ok(Table::default());
    };
    let mut merged = 0;
    for partial in partials {
        for column in partial.columns() {
            base.add_column_ignore_exists(column.clone())?;
        }
        merged += 1;
    }
    if merged > 0 {
        debug!(
            "combined {} partial tables into '{}' ({} columns)",
            merged + 1,
            base.name(),
            base.column_count()
        );
    }
    Ok(base)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use crate::functions::aggregate::{count, max, mean, sum};

    fn animals() -> Table {
        Table::with_columns(
            "Cute Animals",
            vec![
                Column::strings("types", ["cat", "bear", "giraffe", "cat"]),
                Column::doubles("rating", [90.1, 84.3, 99.7, 2.0]),
                Column::integers("legs", [4, 4, 4, 3]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_whole_group() {
        let table = animals();
        let group = TableSliceGroup::whole(&table);
        assert_eq!(group.len(), 1);
        assert_eq!(group.slices()[0].row_count(), 4);

        let out = group.aggregate(&[sum("rating"), count("types")]).unwrap();
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.column_names(), vec!["rating [Sum]", "types [CountNonMissing]"]);
        assert_eq!(out.name(), "Cute Animals summary");
    }

    #[test]
    fn test_aggregate_batches_by_column_in_first_seen_order() {
        let table = animals();
        let group = TableSliceGroup::standard(&table, &["types"]).unwrap();
        let out = group
            .aggregate(&[sum("legs"), mean("rating"), max("legs")])
            .unwrap();
        assert_eq!(
            out.column_names(),
            vec!["types", "legs [Sum]", "legs [Max]", "rating [Mean]"]
        );
    }

    #[test]
    fn test_aggregate_column_overrides_target() {
        let table = animals();
        let group = TableSliceGroup::standard(&table, &["types"]).unwrap();
        let out = group.aggregate_column("legs", &[sum("rating")]).unwrap();
        assert_eq!(out.column_names(), vec!["types", "legs [Sum]"]);
        assert_eq!(out.get_string(0, "legs [Sum]").unwrap(), "7.0");
    }

    #[test]
    fn test_duplicate_output_name_is_rejected() {
        let table = animals();
        let group = TableSliceGroup::whole(&table);
        let err = group
            .aggregate_column("rating", &[sum("rating"), sum("rating")])
            .unwrap_err();
        assert_eq!(err, Error::DuplicateColumn("rating [Sum]".to_string()));
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let n = 3000;
        let keys: Vec<String> = (0..n).map(|i| format!("k{}", i % 1500)).collect();
        let values: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let table = Table::with_columns(
            "big",
            vec![Column::strings("k", keys), Column::doubles("v", values)],
        )
        .unwrap();

        let group = TableSliceGroup::standard(&table, &["k"]).unwrap();
        let sequential = group
            .clone()
            .with_parallel_config(ParallelConfig::disabled())
            .aggregate(&[sum("v")])
            .unwrap();
        let parallel = group
            .with_parallel_config(ParallelConfig::new(true, 1))
            .aggregate(&[sum("v")])
            .unwrap();

        assert_eq!(sequential.row_count(), 1500);
        for row in 0..sequential.row_count() {
            assert_eq!(
                sequential.get_string(row, "v [Sum]").unwrap(),
                parallel.get_string(row, "v [Sum]").unwrap()
            );
            assert_eq!(
                sequential.get_string(row, "k").unwrap(),
                parallel.get_string(row, "k").unwrap()
            );
        }
    }

    #[test]
    fn test_combine_tables() {
        let a = Table::with_columns("s", vec![Column::strings("k", ["x"]), Column::doubles("a", [1.0])])
            .unwrap();
        let b = Table::with_columns("s", vec![Column::strings("k", ["x"]), Column::doubles("b", [2.0])])
            .unwrap();
        let combined = combine_tables(vec![a.clone(), b]).unwrap();
        assert_eq!(combined.column_names(), vec!["k", "a", "b"]);

        let single = combine_tables(vec![a]).unwrap();
        assert_eq!(single.column_names(), vec!["k", "a"]);
    }
}
