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

//! Positional grouping into fixed-size row windows

use super::slice::TableSlice;
use super::slice_group::{SliceGroupKind, TableSliceGroup};
use crate::core::{Error, Result, Table};

impl<'a> TableSliceGroup<'a> {
    /// Split `source` into consecutive windows of `step` rows.
    ///
    /// Slice `i` (0-based) covers rows `[i * step, min((i + 1) * step, n))`
    /// and is named `"<template>: <i + 1>"`. The last window may be short.
    pub fn selection(source: &'a Table, template: &str, step: usize) -> Result<Self> {
        if step == 0 {
            return Err(Error::invalid_argument(format!(
                "selection step must be positive, got {}",
                step
            )));
        }

        let row_count = source.row_count();
        let slices = (0..row_count)
            .step_by(step)
            .enumerate()
            .map(|(i, start)| {
                let end = (start + step).min(row_count);
                TableSlice::with_rows(format!("{}: {}", template, i + 1), (start..end).collect())
            })
            .collect();

        Ok(Self::from_parts(
            source,
            Vec::new(),
            slices,
            SliceGroupKind::Selection,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Column;

    fn numbers(n: usize) -> Table {
        Table::with_columns("n", vec![Column::longs("x", (0..n as i64).collect::<Vec<_>>())])
            .unwrap()
    }

    #[test]
    fn test_windows() {
        let table = numbers(25);
        let group = TableSliceGroup::selection(&table, "Batch", 10).unwrap();
        assert_eq!(group.len(), 3);
        assert_eq!(group.slices()[0].name(), "Batch: 1");
        assert_eq!(group.slices()[2].name(), "Batch: 3");
        assert_eq!(group.slices()[1].rows(), (10..20).collect::<Vec<_>>().as_slice());
        assert_eq!(group.slices()[2].row_count(), 5);
    }

    #[test]
    fn test_even_division() {
        let table = numbers(20);
        let group = TableSliceGroup::selection(&table, "B", 5).unwrap();
        assert_eq!(group.len(), 4);
        assert!(group.slices().iter().all(|s| s.row_count() == 5));
    }

    #[test]
    fn test_empty_table_and_bad_step() {
        let table = numbers(0);
        assert!(TableSliceGroup::selection(&table, "B", 3).unwrap().is_empty());
        assert!(matches!(
            TableSliceGroup::selection(&table, "B", 0),
            Err(Error::InvalidArgument(_))
        ));
    }
}
