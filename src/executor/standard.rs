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

//! Value-equality grouping
//!
//! Rows are grouped in a single pass by a composite key: the canonical
//! string of each grouping column, joined with [`SPLIT_STRING`]. A hash map
//! finds the slice for a key; the slice vector keeps first-seen order.
//!
//! # Key collisions
//!
//! Two distinct value combinations whose joined strings are equal share a
//! slice, e.g. `("a~~~b", "c")` and `("a", "b~~~c")`. Values containing the
//! delimiter are not escaped.

use rustc_hash::FxHashMap;

use super::slice::TableSlice;
use super::slice_group::{SliceGroupKind, TableSliceGroup};
use crate::core::{Column, Error, Result, Table};

/// Delimiter between the parts of a composite group key
pub const SPLIT_STRING: &str = "~~~";

impl<'a> TableSliceGroup<'a> {
    /// Group the rows of `source` by the values of the named columns
    pub fn standard(source: &'a Table, column_names: &[&str]) -> Result<Self> {
        let columns = column_names
            .iter()
            .map(|name| source.column(name))
            .collect::<Result<Vec<_>>>()?;
        Self::standard_from_columns(source, columns)
    }

    /// Group the rows of `source` by the values of the given columns.
    ///
    /// The columns need not belong to `source`, but must have one entry per
    /// source row.
    pub fn standard_from_columns(source: &'a Table, columns: Vec<&'a Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::invalid_argument(
                "standard grouping needs at least one column",
            ));
        }
        let row_count = source.row_count();
        if let Some(bad) = columns.iter().find(|c| c.len() != row_count) {
            return Err(Error::ColumnLengthMismatch {
                column: bad.name().to_string(),
                expected: row_count,
                got: bad.len(),
            });
        }

        let slices = split_rows(&columns, row_count)?;
        Ok(Self::from_parts(
            source,
            columns,
            slices,
            SliceGroupKind::Standard,
        ))
    }
}

/// Composite key of one row
pub fn group_key(columns: &[&Column], row: usize) -> Result<String> {
    let mut key = String::new();
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            key.push_str(SPLIT_STRING);
        }
        key.push_str(&column.get_string(row)?);
    }
    Ok(key)
}

fn split_rows(columns: &[&Column], row_count: usize) -> Result<Vec<TableSlice>> {
    let mut slices: Vec<TableSlice> = Vec::new();
    let mut index: FxHashMap<String, usize> = FxHashMap::default();

    for row in 0..row_count {
        let key = group_key(columns, row)?;
        match index.get(&key) {
            Some(&at) => slices[at].add_row(row),
            None => {
                let mut slice = TableSlice::new(key.clone());
                slice.add_row(row);
                index.insert(key, slices.len());
                slices.push(slice);
            }
        }
    }
    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let table = Table::with_columns(
            "t",
            vec![Column::strings("k", ["b", "a", "b", "c", "a"])],
        )
        .unwrap();
        let group = TableSliceGroup::standard(&table, &["k"]).unwrap();
        let names: Vec<&str> = group.slices().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(group.slices()[0].rows(), &[0, 2]);
        assert_eq!(group.slices()[1].rows(), &[1, 4]);
        assert_eq!(group.slices()[2].rows(), &[3]);
    }

    #[test]
    fn test_composite_key() {
        let table = Table::with_columns(
            "t",
            vec![
                Column::strings("a", ["x", "x", "y"]),
                Column::integers("b", [1, 2, 1]),
            ],
        )
        .unwrap();
        let group = TableSliceGroup::standard(&table, &["a", "b"]).unwrap();
        assert_eq!(group.len(), 3);
        assert_eq!(group.slices()[1].name(), "x~~~2");
        assert_eq!(group.split_column_names(), vec!["a", "b"]);
    }

    #[test]
    fn test_missing_values_form_a_group() {
        let mut k = Column::new("k", crate::core::ColumnType::Integer);
        for cell in ["1", "", "1", ""] {
            k.append_cell(cell).unwrap();
        }
        let table = Table::with_columns("t", vec![k]).unwrap();
        let group = TableSliceGroup::standard(&table, &["k"]).unwrap();
        assert_eq!(group.len(), 2);
        assert_eq!(group.slices()[1].name(), "");
        assert_eq!(group.slices()[1].rows(), &[1, 3]);
    }

    #[test]
    fn test_errors() {
        let table = Table::with_columns("t", vec![Column::strings("k", ["a"])]).unwrap();
        assert!(matches!(
            TableSliceGroup::standard(&table, &["nope"]),
            Err(Error::ColumnNotFound(_))
        ));
        assert!(matches!(
            TableSliceGroup::standard(&table, &[]),
            Err(Error::InvalidArgument(_))
        ));

        let other = Column::strings("other", ["a", "b"]);
        assert!(matches!(
            TableSliceGroup::standard_from_columns(&table, vec![&other]),
            Err(Error::ColumnLengthMismatch { .. })
        ));
    }
}
