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

//! Scalar values
//!
//! [`Value`] is the unit exchanged between columns and aggregate functions:
//! cell reads produce one, reductions return one, and result columns are
//! built by appending them.

use std::fmt;
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use super::types::ColumnType;

/// Date-time formats accepted when parsing text cells
/// Order matters - more specific formats first
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f", // ISO with fractional seconds
    "%Y-%m-%dT%H:%M:%S",    // ISO
    "%Y-%m-%d %H:%M:%S%.f", // SQL-style with fractional seconds
    "%Y-%m-%d %H:%M:%S",    // SQL-style
    "%Y-%m-%dT%H:%M",       // ISO without seconds
    "%Y-%m-%d %H:%M",       // SQL-style without seconds
];

/// Date formats accepted when parsing text cells
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // ISO
    "%Y/%m/%d", // Alternative with slashes
    "%m/%d/%Y", // US format
];

/// Canonical date rendering
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Canonical date-time rendering
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f";

/// A scalar value with type information
///
/// Text uses `Arc<str>` so values read out of string columns clone cheaply.
#[derive(Debug, Clone)]
pub enum Value {
    /// Missing value, tagged with the column type it came from
    Null(ColumnType),

    /// 64-bit signed integer
    Integer(i64),

    /// 64-bit floating point
    Float(f64),

    /// UTF-8 text
    Text(Arc<str>),

    /// Boolean
    Boolean(bool),

    /// Calendar date
    Date(NaiveDate),

    /// Date and time
    DateTime(NaiveDateTime),
}

impl Value {
    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a missing value of the given type
    pub fn null(column_type: ColumnType) -> Self {
        Value::Null(column_type)
    }

    /// Create an integer value
    pub fn integer(value: i64) -> Self {
        Value::Integer(value)
    }

    /// Create a float value
    pub fn float(value: f64) -> Self {
        Value::Float(value)
    }

    /// Create a text value
    pub fn text(value: impl Into<String>) -> Self {
        Value::Text(Arc::from(value.into().as_str()))
    }

    /// Create a boolean value
    pub fn boolean(value: bool) -> Self {
        Value::Boolean(value)
    }

    /// Create a date value
    pub fn date(value: NaiveDate) -> Self {
        Value::Date(value)
    }

    /// Create a date-time value
    pub fn date_time(value: NaiveDateTime) -> Self {
        Value::DateTime(value)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Returns true if this is a missing value
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null(_))
    }

    /// Returns the column type that naturally stores this value
    pub fn column_type(&self) -> ColumnType {
        match self {
            Value::Null(ty) => *ty,
            Value::Integer(_) => ColumnType::Long,
            Value::Float(_) => ColumnType::Double,
            Value::Text(_) => ColumnType::String,
            Value::Boolean(_) => ColumnType::Boolean,
            Value::Date(_) => ColumnType::LocalDate,
            Value::DateTime(_) => ColumnType::LocalDateTime,
        }
    }

    /// Extract as i64, if integral
    pub fn as_int64(&self) -> Option<i64> {
        match self {
            Value::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as f64, if numeric
    pub fn as_float64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Extract as bool
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Borrow as str
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract as date
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Extract as date-time
    pub fn as_date_time(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(t) => Some(*t),
            _ => None,
        }
    }
}

/// Format a float the way cells are rendered: shortest round-trip form,
/// always with a fractional part for integral values
pub(crate) fn format_float(value: f64) -> String {
    format!("{:?}", value)
}

/// Parse a date cell
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
}

/// Parse a date-time cell; a bare date is read as midnight
pub fn parse_date_time(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .or_else(|| parse_date(s).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

// =========================================================================
// Trait implementations
// =========================================================================

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null(_) => Ok(()),
            Value::Integer(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&format_float(*v)),
            Value::Text(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Date(d) => write!(f, "{}", d.format(DATE_FORMAT)),
            Value::DateTime(t) => write!(f, "{}", t.format(DATE_TIME_FORMAT)),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            // Missing equals missing, whatever column it came from
            (Value::Null(_), Value::Null(_)) => true,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Integer(a), Value::Float(b)) | (Value::Float(b), Value::Integer(a)) => {
                (*a as f64) == *b
            }
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Date(a), Value::Date(b)) => a == b,
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<usize> for Value {
    fn from(v: usize) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(Arc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(Arc::from(v.as_str()))
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_equality() {
        assert_eq!(Value::null(ColumnType::Double), Value::null(ColumnType::Text));
        assert_ne!(Value::null(ColumnType::Double), Value::float(0.0));
        assert!(Value::null(ColumnType::Boolean).is_null());
    }

    #[test]
    fn test_numeric_equality() {
        assert_eq!(Value::integer(3), Value::float(3.0));
        assert_ne!(Value::float(f64::NAN), Value::float(f64::NAN));
        assert_eq!(Value::integer(3).as_float64(), Some(3.0));
        assert_eq!(Value::float(3.5).as_int64(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::float(2.0).to_string(), "2.0");
        assert_eq!(Value::float(92.1).to_string(), "92.1");
        assert_eq!(Value::integer(-7).to_string(), "-7");
        assert_eq!(Value::boolean(true).to_string(), "true");
        assert_eq!(Value::null(ColumnType::Double).to_string(), "");
        let d = NaiveDate::from_ymd_opt(2014, 7, 9).unwrap();
        assert_eq!(Value::date(d).to_string(), "2014-07-09");
        let t = d.and_hms_milli_opt(13, 3, 44, 700).unwrap();
        assert_eq!(Value::date_time(t).to_string(), "2014-07-09T13:03:44.700");
    }

    #[test]
    fn test_parse_temporal() {
        let d = NaiveDate::from_ymd_opt(2014, 7, 9).unwrap();
        assert_eq!(parse_date("2014-07-09"), Some(d));
        assert_eq!(parse_date("07/09/2014"), Some(d));
        assert_eq!(parse_date("yesterday"), None);

        let t = parse_date_time("2014-07-09 13:03:44.7").unwrap();
        assert_eq!(t, d.and_hms_milli_opt(13, 3, 44, 700).unwrap());
        assert_eq!(
            parse_date_time("2014-07-09"),
            Some(d.and_hms_opt(0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_from_impls() {
        assert_eq!(Value::from(5i32), Value::integer(5));
        assert_eq!(Value::from("cat"), Value::text("cat"));
        assert_eq!(Value::from(true).as_boolean(), Some(true));
        assert_eq!(Value::from(1.5f64).column_type(), ColumnType::Double);
    }
}
