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

//! Aggregate Function System
//!
//! This module provides the reductions a summarization applies to columns:
//!
//! - [`AggregateFunction`] - Immutable record binding a reduction to a target column
//! - [`FunctionFamily`] - Closed set of column-type families a function accepts
//! - [`aggregate`] - Built-in factories (sum, mean, countTrue, earliestDate, ...)
//! - [`statistics`] - Numeric primitives the numeric family reduces with
//! - [`FunctionRegistry`] - Lookup of built-in factories by name

pub mod aggregate;
pub mod registry;
pub mod statistics;

use std::borrow::Cow;
use std::fmt;

use crate::common::number::parse_decimal;
use crate::core::{Column, ColumnType, Error, Result, Value};

/// Reduction from a (compatible, coerced) column to a scalar
pub type Reducer = fn(&Column) -> Result<Value>;

/// Column-type family of an aggregate function
///
/// The family decides which column types a function accepts and how an
/// accepted column is coerced before reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionFamily {
    /// Numbers, plus text parsed into numbers
    Numeric,
    /// Boolean columns only
    Boolean,
    /// Date columns only
    Date,
    /// Date-time columns only
    DateTime,
    /// Any column type
    Generic,
}

impl FunctionFamily {
    /// Returns true if a function of this family can reduce a column of `column_type`
    pub fn accepts(&self, column_type: ColumnType) -> bool {
        match self {
            FunctionFamily::Numeric => column_type.is_numeric() || column_type.is_textual(),
            FunctionFamily::Boolean => column_type == ColumnType::Boolean,
            FunctionFamily::Date => column_type == ColumnType::LocalDate,
            FunctionFamily::DateTime => column_type == ColumnType::LocalDateTime,
            FunctionFamily::Generic => true,
        }
    }

    /// Description of accepted column types, for error messages
    pub fn expected(&self) -> &'static str {
        match self {
            FunctionFamily::Numeric => "numeric or textual",
            FunctionFamily::Boolean => "BOOLEAN",
            FunctionFamily::Date => "LOCAL_DATE",
            FunctionFamily::DateTime => "LOCAL_DATE_TIME",
            FunctionFamily::Generic => "any",
        }
    }

    /// Convert an accepted column into the shape the family reduces.
    ///
    /// Numeric functions parse textual columns into a `Double` column; an
    /// unparseable cell is a [`Error::ParseFailure`]. Every other case is the
    /// identity.
    pub fn coerce<'a>(&self, column: &'a Column) -> Result<Cow<'a, Column>> {
        if *self != FunctionFamily::Numeric || !column.column_type().is_textual() {
            return Ok(Cow::Borrowed(column));
        }

        let mut doubles = Column::new(column.name(), ColumnType::Double);
        for row in 0..column.len() {
            if column.is_missing(row)? {
                doubles.append_missing();
                continue;
            }
            let cell = column.get_string(row)?;
            let parsed = parse_decimal(&cell).ok_or_else(|| {
                Error::parse_failure(column.name(), row, cell.as_str(), ColumnType::Double)
            })?;
            doubles.append(&Value::Float(parsed))?;
        }
        Ok(Cow::Owned(doubles))
    }
}

impl fmt::Display for FunctionFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FunctionFamily::Numeric => write!(f, "numeric"),
            FunctionFamily::Boolean => write!(f, "boolean"),
            FunctionFamily::Date => write!(f, "date"),
            FunctionFamily::DateTime => write!(f, "date-time"),
            FunctionFamily::Generic => write!(f, "generic"),
        }
    }
}

/// Descriptive information about an aggregate function
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionInfo {
    /// Display name, used in output column names
    pub name: &'static str,
    /// Column-type family
    pub family: FunctionFamily,
    /// Type of the result column
    pub return_type: ColumnType,
    /// Description
    pub description: &'static str,
}

/// An immutable, typed reduction from one named column to a scalar
///
/// Built by the factories in [`aggregate`]; cheap to clone and safe to
/// share across threads.
#[derive(Clone)]
pub struct AggregateFunction {
    name: &'static str,
    description: &'static str,
    column: String,
    alias: Option<String>,
    family: FunctionFamily,
    return_type: ColumnType,
    reducer: Reducer,
}

impl AggregateFunction {
    /// Create a function reducing `column` with `reducer`
    pub fn new(
        name: &'static str,
        description: &'static str,
        column: impl Into<String>,
        family: FunctionFamily,
        return_type: ColumnType,
        reducer: Reducer,
    ) -> Self {
        Self {
            name,
            description,
            column: column.into(),
            alias: None,
            family,
            return_type,
            reducer,
        }
    }

    /// Return this function with an output column alias
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Display name of the function
    pub fn function_name(&self) -> &'static str {
        self.name
    }

    /// Name of the column this function reduces
    pub fn target_column(&self) -> &str {
        &self.column
    }

    /// Output column alias, if one was set
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    /// Column-type family
    pub fn family(&self) -> FunctionFamily {
        self.family
    }

    /// Type of the result column
    pub fn return_type(&self) -> ColumnType {
        self.return_type
    }

    /// Function information
    pub fn info(&self) -> FunctionInfo {
        FunctionInfo {
            name: self.name,
            family: self.family,
            return_type: self.return_type,
            description: self.description,
        }
    }

    /// Returns true if this function can reduce a column of `column_type`
    pub fn is_compatible_column(&self, column_type: ColumnType) -> bool {
        self.family.accepts(column_type)
    }

    /// Coerce `column` into a column this function reduces directly
    pub fn compatible_column<'a>(&self, column: &'a Column) -> Result<Cow<'a, Column>> {
        self.check_compatible(column)?;
        self.family.coerce(column)
    }

    /// Name of the output column this function produces for its target
    pub fn output_column_name(&self) -> String {
        match self.alias.as_deref() {
            Some(alias) if !alias.is_empty() => alias.to_string(),
            _ => aggregate_column_name(&self.column, self.name),
        }
    }

    /// Reduce `column` to a scalar.
    ///
    /// Fails with [`Error::TypeMismatch`] if the column type is outside this
    /// function's family.
    pub fn summarize(&self, column: &Column) -> Result<Value> {
        let column = self.compatible_column(column)?;
        (self.reducer)(&column)
    }

    fn check_compatible(&self, column: &Column) -> Result<()> {
        if !self.is_compatible_column(column.column_type()) {
            return Err(Error::type_mismatch(
                self.name,
                self.family.expected(),
                column.column_type(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AggregateFunction")
            .field("name", &self.name)
            .field("column", &self.column)
            .field("alias", &self.alias)
            .field("family", &self.family)
            .field("return_type", &self.return_type)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Default output column name: `"<column> [<function>]"`
pub fn aggregate_column_name(column: &str, function_name: &str) -> String {
    format!("{} [{}]", column, function_name)
}

// Re-export main types
pub use registry::{global_registry, FunctionRegistry};
