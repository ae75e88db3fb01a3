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

//! Tables
//!
//! A [`Table`] is an ordered collection of equal-length [`Column`]s sharing
//! one row index space. Column lookup by name is case-insensitive.

use super::column::Column;
use super::error::{Error, Result};

/// An ordered set of equal-length, uniquely named columns
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: String,
    columns: Vec<Column>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Create a table from columns, validating names and lengths
    pub fn with_columns(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let mut table = Self::new(name);
        for column in columns {
            table.add_column(column)?;
        }
        Ok(table)
    }

    /// Table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the table
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Number of rows (0 for a table without columns)
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    /// Number of columns
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Position of the named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(name))
    }

    /// Returns true if the table has a column with this name
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// The named column
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.column_index(name)
            .map(|i| &self.columns[i])
            .ok_or_else(|| Error::column_not_found(name))
    }

    /// The column at `index`
    pub fn column_at(&self, index: usize) -> Result<&Column> {
        self.columns
            .get(index)
            .ok_or_else(|| Error::column_not_found(format!("#{}", index)))
    }

    /// All columns in order
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column names in order
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    fn check_length(&self, column: &Column) -> Result<()> {
        if !self.columns.is_empty() && column.len() != self.row_count() {
            return Err(Error::ColumnLengthMismatch {
                column: column.name().to_string(),
                expected: self.row_count(),
                got: column.len(),
            });
        }
        Ok(())
    }

    /// Append a column. Fails on a duplicate name or a row-count mismatch.
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        if self.has_column(column.name()) {
            return Err(Error::DuplicateColumn(column.name().to_string()));
        }
        self.check_length(&column)?;
        self.columns.push(column);
        Ok(())
    }

    /// Append a column unless one with the same name already exists.
    ///
    /// Returns true if the column was added.
    pub fn add_column_ignore_exists(&mut self, column: Column) -> Result<bool> {
        if self.has_column(column.name()) {
            return Ok(false);
        }
        self.check_length(&column)?;
        self.columns.push(column);
        Ok(true)
    }

    /// Replace the named column in place, keeping its position
    pub fn replace_column(&mut self, name: &str, column: Column) -> Result<()> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::column_not_found(name))?;
        if self.columns.len() > 1 && column.len() != self.row_count() {
            return Err(Error::ColumnLengthMismatch {
                column: column.name().to_string(),
                expected: self.row_count(),
                got: column.len(),
            });
        }
        self.columns[index] = column;
        Ok(())
    }

    /// Remove and return the named column
    pub fn remove_column(&mut self, name: &str) -> Result<Column> {
        let index = self
            .column_index(name)
            .ok_or_else(|| Error::column_not_found(name))?;
        Ok(self.columns.remove(index))
    }

    /// Canonical formatted string of one cell
    pub fn get_string(&self, row: usize, column: &str) -> Result<String> {
        self.column(column)?.get_string(row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ColumnType;

    fn animals() -> Table {
        Table::with_columns(
            "Cute Animals",
            vec![
                Column::strings("types", ["cat", "bear", "giraffe", "cat"]),
                Column::doubles("rating", [90.1, 84.3, 99.7, 2.0]),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_shape() {
        let t = animals();
        assert_eq!(t.name(), "Cute Animals");
        assert_eq!(t.row_count(), 4);
        assert_eq!(t.column_count(), 2);
        assert_eq!(t.column_names(), vec!["types", "rating"]);
        assert_eq!(Table::new("empty").row_count(), 0);
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let t = animals();
        assert_eq!(t.column("RATING").unwrap().column_type(), ColumnType::Double);
        assert_eq!(t.column_index("Types"), Some(0));
        assert!(matches!(t.column("speed"), Err(Error::ColumnNotFound(_))));
    }

    #[test]
    fn test_add_column_rules() {
        let mut t = animals();
        assert!(matches!(
            t.add_column(Column::doubles("rating", [1.0, 2.0, 3.0, 4.0])),
            Err(Error::DuplicateColumn(_))
        ));
        assert!(matches!(
            t.add_column(Column::doubles("weight", [1.0])),
            Err(Error::ColumnLengthMismatch { .. })
        ));
        assert!(!t
            .add_column_ignore_exists(Column::doubles("rating", [0.0; 4]))
            .unwrap());
        assert!(t
            .add_column_ignore_exists(Column::doubles("weight", [0.0; 4]))
            .unwrap());
        assert_eq!(t.column_count(), 3);
    }

    #[test]
    fn test_replace_and_remove() {
        let mut t = animals();
        t.replace_column("rating", Column::integers("rating", [1, 2, 3, 4]))
            .unwrap();
        assert_eq!(t.column_at(1).unwrap().column_type(), ColumnType::Integer);
        assert!(t.replace_column("speed", Column::integers("speed", [1])).is_err());

        let removed = t.remove_column("types").unwrap();
        assert_eq!(removed.len(), 4);
        assert_eq!(t.column_count(), 1);
    }

    #[test]
    fn test_get_string() {
        let t = animals();
        assert_eq!(t.get_string(3, "rating").unwrap(), "2.0");
        assert_eq!(t.get_string(1, "types").unwrap(), "bear");
    }
}
