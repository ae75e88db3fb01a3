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

//! Table slices

use crate::core::{Column, Result, Table};

/// A named, ordered set of row positions into one source table
///
/// Holds no data of its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSlice {
    name: String,
    rows: Vec<usize>,
}

impl TableSlice {
    /// Create an empty slice
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    /// Create a slice over the given rows
    pub fn with_rows(name: impl Into<String>, rows: Vec<usize>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Row positions in source order
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub(crate) fn add_row(&mut self, row: usize) {
        self.rows.push(row);
    }

    /// The named column of `source`, restricted to this slice's rows
    pub fn column(&self, source: &Table, name: &str) -> Result<Column> {
        source.column(name)?.select(&self.rows)
    }

    /// This slice's rows of `column`
    pub fn select(&self, column: &Column) -> Result<Column> {
        column.select(&self.rows)
    }
}
