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

//! Core type definitions for Tablesplit
//!
//! This module defines [`ColumnType`], the closed set of column kinds a
//! [`Column`](super::Column) can hold.

use std::fmt;
use std::str::FromStr;

use super::column::Column;
use super::error::Error;

/// Column types supported by Tablesplit
///
/// Every type reserves one missing-value sentinel in its physical storage,
/// see [`Column`] for the concrete encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ColumnType {
    /// 64-bit floating point number
    Double = 0,

    /// 32-bit floating point number
    Float = 1,

    /// 16-bit signed integer
    Short = 2,

    /// 32-bit signed integer
    Integer = 3,

    /// 64-bit signed integer
    Long = 4,

    /// Categorical UTF-8 string
    String = 5,

    /// Free-form UTF-8 text
    Text = 6,

    /// Boolean true/false
    Boolean = 7,

    /// Calendar date without time zone
    LocalDate = 8,

    /// Date and time without time zone, millisecond precision
    LocalDateTime = 9,
}

impl ColumnType {
    /// All column types, in declaration order
    pub const ALL: [ColumnType; 10] = [
        ColumnType::Double,
        ColumnType::Float,
        ColumnType::Short,
        ColumnType::Integer,
        ColumnType::Long,
        ColumnType::String,
        ColumnType::Text,
        ColumnType::Boolean,
        ColumnType::LocalDate,
        ColumnType::LocalDateTime,
    ];

    /// Returns true if this type stores numbers
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Double
                | ColumnType::Float
                | ColumnType::Short
                | ColumnType::Integer
                | ColumnType::Long
        )
    }

    /// Returns true if this type stores text
    pub fn is_textual(&self) -> bool {
        matches!(self, ColumnType::String | ColumnType::Text)
    }

    /// Returns true if this type stores dates or date-times
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnType::LocalDate | ColumnType::LocalDateTime)
    }

    /// Returns the upper-case type name
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Double => "DOUBLE",
            ColumnType::Float => "FLOAT",
            ColumnType::Short => "SHORT",
            ColumnType::Integer => "INTEGER",
            ColumnType::Long => "LONG",
            ColumnType::String => "STRING",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::LocalDate => "LOCAL_DATE",
            ColumnType::LocalDateTime => "LOCAL_DATE_TIME",
        }
    }

    /// Human readable name used in diagnostics
    pub fn printer_friendly_name(&self) -> &'static str {
        match self {
            ColumnType::Double => "Double",
            ColumnType::Float => "Float",
            ColumnType::Short => "Short",
            ColumnType::Integer => "Integer",
            ColumnType::Long => "Long",
            ColumnType::String => "String",
            ColumnType::Text => "Text",
            ColumnType::Boolean => "Boolean",
            ColumnType::LocalDate => "Date",
            ColumnType::LocalDateTime => "DateTime",
        }
    }

    /// Create an empty column of this type
    pub fn create(&self, name: impl Into<String>) -> Column {
        Column::new(name, *self)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ColumnType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "DOUBLE" | "FLOAT64" => Ok(ColumnType::Double),
            "FLOAT" | "FLOAT32" => Ok(ColumnType::Float),
            "SHORT" | "INT16" => Ok(ColumnType::Short),
            "INTEGER" | "INT" | "INT32" => Ok(ColumnType::Integer),
            "LONG" | "INT64" | "BIGINT" => Ok(ColumnType::Long),
            "STRING" | "CATEGORY" => Ok(ColumnType::String),
            "TEXT" => Ok(ColumnType::Text),
            "BOOLEAN" | "BOOL" => Ok(ColumnType::Boolean),
            "LOCAL_DATE" | "DATE" => Ok(ColumnType::LocalDate),
            "LOCAL_DATE_TIME" | "DATETIME" | "DATE_TIME" => Ok(ColumnType::LocalDateTime),
            _ => Err(Error::invalid_argument(format!("unknown column type '{}'", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_classification() {
        assert!(ColumnType::Double.is_numeric());
        assert!(ColumnType::Short.is_numeric());
        assert!(!ColumnType::String.is_numeric());
        assert!(ColumnType::Text.is_textual());
        assert!(ColumnType::LocalDate.is_temporal());
        assert!(!ColumnType::Boolean.is_temporal());
    }

    #[test]
    fn test_display_from_str() {
        for ty in ColumnType::ALL {
            let parsed: ColumnType = ty.to_string().parse().unwrap();
            assert_eq!(parsed, ty);
        }
        assert_eq!("bool".parse::<ColumnType>().unwrap(), ColumnType::Boolean);
        assert!("uuid".parse::<ColumnType>().is_err());
    }

    #[test]
    fn test_create_empty_column() {
        let col = ColumnType::Integer.create("n");
        assert_eq!(col.name(), "n");
        assert_eq!(col.column_type(), ColumnType::Integer);
        assert!(col.is_empty());
    }
}
