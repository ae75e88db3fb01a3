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

//! Error types for Tablesplit
//!
//! This module defines all error types used by the table substrate, the
//! aggregate functions and the summarization executor.

use thiserror::Error;

use super::types::ColumnType;

/// Result type alias for Tablesplit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Tablesplit operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // =========================================================================
    // Table errors
    // =========================================================================
    /// Column not found in table
    #[error("column '{0}' not found")]
    ColumnNotFound(String),

    /// A column with the same name already exists in the table
    #[error("column '{0}' already exists")]
    DuplicateColumn(String),

    /// Column length does not match the table row count
    #[error("column '{column}' has {got} rows, expected {expected}")]
    ColumnLengthMismatch {
        column: String,
        expected: usize,
        got: usize,
    },

    /// Row index past the end of a column
    #[error("row index {index} out of bounds for length {len}")]
    RowIndexOutOfBounds { index: usize, len: usize },

    // =========================================================================
    // Aggregation errors
    // =========================================================================
    /// No aggregate function applies to the column types it targets
    #[error("incompatible aggregation: {0}")]
    IncompatibleAggregation(String),

    /// A textual cell could not be converted to the requested type
    #[error("cannot parse '{value}' in column '{column}' at row {row} as {target}")]
    ParseFailure {
        column: String,
        row: usize,
        value: String,
        target: ColumnType,
    },

    /// An operation was given a column or value of the wrong type
    #[error("type mismatch in {context}: expected {expected}, got {got}")]
    TypeMismatch {
        context: String,
        expected: String,
        got: ColumnType,
    },

    // =========================================================================
    // Argument errors
    // =========================================================================
    /// Invalid argument
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl Error {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    /// Create an incompatible aggregation error
    pub fn incompatible_aggregation(msg: impl Into<String>) -> Self {
        Error::IncompatibleAggregation(msg.into())
    }

    /// Create a column not found error
    pub fn column_not_found(name: impl Into<String>) -> Self {
        Error::ColumnNotFound(name.into())
    }

    /// Create a parse failure error for one cell
    pub fn parse_failure(
        column: impl Into<String>,
        row: usize,
        value: impl Into<String>,
        target: ColumnType,
    ) -> Self {
        Error::ParseFailure {
            column: column.into(),
            row,
            value: value.into(),
            target,
        }
    }

    /// Create a type mismatch error
    pub fn type_mismatch(
        context: impl Into<String>,
        expected: impl Into<String>,
        got: ColumnType,
    ) -> Self {
        Error::TypeMismatch {
            context: context.into(),
            expected: expected.into(),
            got,
        }
    }

    /// Returns true if this error was raised while parsing a cell
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Error::ParseFailure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::ColumnNotFound("rating".to_string()).to_string(),
            "column 'rating' not found"
        );
        assert_eq!(
            Error::invalid_argument("step must be positive").to_string(),
            "invalid argument: step must be positive"
        );
        assert_eq!(
            Error::parse_failure("price", 3, "abc", ColumnType::Double).to_string(),
            "cannot parse 'abc' in column 'price' at row 3 as DOUBLE"
        );
        assert_eq!(
            Error::type_mismatch("Number True", "BOOLEAN", ColumnType::Double).to_string(),
            "type mismatch in Number True: expected BOOLEAN, got DOUBLE"
        );
    }

    #[test]
    fn test_error_predicates() {
        assert!(Error::parse_failure("c", 0, "x", ColumnType::Double).is_parse_failure());
        assert!(!Error::column_not_found("c").is_parse_failure());
    }

    #[test]
    fn test_error_clone_eq() {
        let err = Error::ColumnLengthMismatch {
            column: "a".to_string(),
            expected: 3,
            got: 4,
        };
        assert_eq!(err.clone(), err);
        assert_eq!(err.to_string(), "column 'a' has 4 rows, expected 3");
    }
}
