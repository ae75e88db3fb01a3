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

//! Summarizer
//!
//! Binds a source table and a list of aggregate functions, and produces a
//! summary table either for the whole table ([`Summarizer::apply`]) or per
//! group ([`Summarizer::by`], [`Summarizer::by_columns`],
//! [`Summarizer::by_step`]).
//!
//! # Execution
//!
//! 1. A working table is built from the distinct target columns only.
//! 2. Each function is checked against its column's type. Compatible
//!    functions coerce the working column in place (once per column);
//!    incompatible ones are dropped. If none remain the call fails with
//!    [`Error::IncompatibleAggregation`].
//! 3. The rows are split, each batch of functions sharing a target column
//!    is aggregated into a partial table, and the partials are combined.
//!
//! A failure at any step returns the error and no table.

use std::borrow::Cow;

use log::debug;

use super::parallel::ParallelConfig;
use super::slice_group::{combine_tables, TableSliceGroup};
use crate::core::{Column, Error, Result, Table};
use crate::functions::AggregateFunction;

const NO_COMPATIBLE_FUNCTIONS: &str =
    "None of the aggregate functions provided apply to the summarized column type(s).";

/// Functions sharing one target column
type Batch = (String, Vec<AggregateFunction>);

/// Single-use summarization of one table
#[derive(Debug)]
pub struct Summarizer<'a> {
    source: &'a Table,
    working: Table,
    functions: Vec<AggregateFunction>,
    parallel: ParallelConfig,
}

impl<'a> Summarizer<'a> {
    /// Bind `functions` to `source`.
    ///
    /// Fails with [`Error::ColumnNotFound`] if a function targets a column
    /// the table lacks, or [`Error::InvalidArgument`] if no functions are given.
    pub fn new(source: &'a Table, functions: Vec<AggregateFunction>) -> Result<Self> {
        if functions.is_empty() {
            return Err(Error::invalid_argument(
                "a summary needs at least one aggregate function",
            ));
        }

        let mut working = Table::new(source.name());
        for function in &functions {
            let column = source.column(function.target_column())?;
            working.add_column_ignore_exists(column.clone())?;
        }

        Ok(Self {
            source,
            working,
            functions,
            parallel: ParallelConfig::default(),
        })
    }

    /// Set the parallel execution config used by aggregation
    pub fn with_parallel_config(mut self, config: ParallelConfig) -> Self {
        self.parallel = config;
        self
    }

    /// Summarize the whole table as one group: one output row
    pub fn apply(mut self) -> Result<Table> {
        let batches = self.resolve()?;
        let group = TableSliceGroup::whole(&self.working);
        self.summarize(group, &batches)
    }

    /// Summarize per distinct value combination of the named source columns
    pub fn by(mut self, column_names: &[&str]) -> Result<Table> {
        let batches = self.resolve()?;
        let keys = column_names
            .iter()
            .map(|name| self.source.column(name))
            .collect::<Result<Vec<_>>>()?;
        let group = TableSliceGroup::standard_from_columns(&self.working, keys)?;
        self.summarize(group, &batches)
    }

    /// Summarize per distinct value combination of the given columns, which
    /// must have one entry per source row
    pub fn by_columns(mut self, columns: &[Column]) -> Result<Table> {
        let batches = self.resolve()?;
        let group = TableSliceGroup::standard_from_columns(&self.working, columns.iter().collect())?;
        self.summarize(group, &batches)
    }

    /// Summarize consecutive windows of `step` rows, named `"<template>: <n>"`
    pub fn by_step(mut self, template: &str, step: usize) -> Result<Table> {
        let batches = self.resolve()?;
        let group = TableSliceGroup::selection(&self.working, template, step)?;
        self.summarize(group, &batches)
    }

    /// Check every function against its working column, coercing the column
    /// for the functions that apply and dropping the rest.
    fn resolve(&mut self) -> Result<Vec<Batch>> {
        let mut batches: Vec<Batch> = Vec::new();

        for function in &self.functions {
            let name = function.target_column();
            let column = self.working.column(name)?;
            if !function.is_compatible_column(column.column_type()) {
                debug!(
                    "dropping {} on '{}': {} column is outside the {} family",
                    function,
                    name,
                    column.column_type(),
                    function.family()
                );
                continue;
            }

            let coerced = match function.compatible_column(column)? {
                Cow::Owned(coerced) => Some(coerced),
                Cow::Borrowed(_) => None,
            };
            if let Some(coerced) = coerced {
                self.working.replace_column(name, coerced)?;
            }

            match batches
                .iter_mut()
                .find(|(column, _)| column.eq_ignore_ascii_case(name))
            {
                Some((_, fns)) => fns.push(function.clone()),
                None => batches.push((name.to_string(), vec![function.clone()])),
            }
        }

        if batches.is_empty() {
            return Err(Error::incompatible_aggregation(NO_COMPATIBLE_FUNCTIONS));
        }
        Ok(batches)
    }

    fn summarize(&self, group: TableSliceGroup<'_>, batches: &[Batch]) -> Result<Table> {
        let group = group.with_parallel_config(self.parallel);
        let partials = batches
            .iter()
            .map(|(column, fns)| group.aggregate_column(column, fns))
            .collect::<Result<Vec<_>>>()?;
        combine_tables(partials)
    }
}

impl Table {
    /// Start a summary of this table's columns
    ///
    /// ```
    /// use tablesplit::core::{Column, Table};
    /// use tablesplit::functions::aggregate::sum;
    ///
    /// let table = Table::with_columns(
    ///     "animals",
    ///     vec![
    ///         Column::strings("kind", ["cat", "dog", "cat"]),
    ///         Column::doubles("weight", [4.0, 20.0, 5.0]),
    ///     ],
    /// )?;
    /// let summary = table.summarize(vec![sum("weight")])?.by(&["kind"])?;
    /// assert_eq!(summary.get_string(0, "weight [Sum]")?, "9.0");
    /// # Ok::<(), tablesplit::core::Error>(())
    /// ```
    pub fn summarize(&self, functions: Vec<AggregateFunction>) -> Result<Summarizer<'_>> {
        Summarizer::new(self, functions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ColumnType, Value};
    use crate::functions::aggregate::{count_true, count_unique, mean, sum};

    fn prices() -> Table {
        Table::with_columns(
            "prices",
            vec![
                Column::strings("shop", ["a", "b", "a"]),
                Column::strings("price", ["1.5", "2", "3.5"]),
                Column::booleans("open", [true, false, true]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_working_table_holds_targets_only() {
        let table = prices();
        let summarizer = Summarizer::new(&table, vec![sum("price"), mean("price")]).unwrap();
        assert_eq!(summarizer.working.column_names(), vec!["price"]);
    }

    #[test]
    fn test_unknown_target_column() {
        let table = prices();
        assert!(matches!(
            Summarizer::new(&table, vec![sum("weight")]),
            Err(Error::ColumnNotFound(_))
        ));
        assert!(matches!(
            Summarizer::new(&table, Vec::new()),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_text_column_is_coerced_once() {
        let table = prices();
        let mut summarizer = Summarizer::new(&table, vec![sum("price"), mean("price")]).unwrap();
        let batches = summarizer.resolve().unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].1.len(), 2);
        assert_eq!(
            summarizer.working.column("price").unwrap().column_type(),
            ColumnType::Double
        );
    }

    #[test]
    fn test_incompatible_functions_are_dropped() {
        let table = prices();
        let out = table
            .summarize(vec![count_true("price"), sum("price")])
            .unwrap()
            .apply()
            .unwrap();
        assert_eq!(out.column_names(), vec!["price [Sum]"]);
        assert_eq!(out.column("price [Sum]").unwrap().get(0).unwrap(), Value::Float(7.0));
    }

    #[test]
    fn test_nothing_compatible() {
        let table = prices();
        let err = table
            .summarize(vec![count_true("price"), sum("open")])
            .unwrap()
            .by(&["shop"])
            .unwrap_err();
        assert_eq!(
            err,
            Error::IncompatibleAggregation(NO_COMPATIBLE_FUNCTIONS.to_string())
        );
    }

    #[test]
    fn test_by_groups_on_source_values() {
        let table = prices();
        let out = table
            .summarize(vec![sum("price"), count_unique("shop")])
            .unwrap()
            .by(&["shop"])
            .unwrap();
        assert_eq!(out.name(), "prices summary");
        assert_eq!(
            out.column_names(),
            vec!["shop", "price [Sum]", "shop [Count Unique]"]
        );
        assert_eq!(out.get_string(0, "shop").unwrap(), "a");
        assert_eq!(out.get_string(0, "price [Sum]").unwrap(), "5.0");
        assert_eq!(out.get_string(1, "shop [Count Unique]").unwrap(), "1");
    }
}
