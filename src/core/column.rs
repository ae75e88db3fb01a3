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

//! Typed columns
//!
//! A [`Column`] is a named, ordered sequence of values of one [`ColumnType`].
//! Storage is a plain vector per type; missing entries are encoded in-band
//! with a per-type sentinel (see [`missing`]).

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rustc_hash::FxHashSet;

use super::error::{Error, Result};
use super::types::ColumnType;
use super::value::{format_float, parse_date, parse_date_time, Value, DATE_FORMAT, DATE_TIME_FORMAT};
use crate::common::number::parse_decimal;

/// Missing-value sentinels, one per physical storage type
pub mod missing {
    /// Missing `Double`
    pub const DOUBLE: f64 = f64::NAN;
    /// Missing `Float`
    pub const FLOAT: f32 = f32::NAN;
    /// Missing `Short`
    pub const SHORT: i16 = i16::MIN;
    /// Missing `Integer`
    pub const INTEGER: i32 = i32::MIN;
    /// Missing `Long`
    pub const LONG: i64 = i64::MIN;
    /// Missing `Boolean`
    pub const BOOLEAN: i8 = i8::MIN;
    /// Missing `LocalDate` (packed as days from CE)
    pub const LOCAL_DATE: i32 = i32::MIN;
    /// Missing `LocalDateTime` (packed as epoch milliseconds)
    pub const LOCAL_DATE_TIME: i64 = i64::MIN;
    /// Missing `String` / `Text`
    pub const STRING: &str = "";
}

const BYTE_TRUE: i8 = 1;
const BYTE_FALSE: i8 = 0;

/// Physical storage for a column
#[derive(Debug, Clone)]
enum ColumnData {
    Double(Vec<f64>),
    Float(Vec<f32>),
    Short(Vec<i16>),
    Integer(Vec<i32>),
    Long(Vec<i64>),
    String(Vec<String>),
    Text(Vec<String>),
    Boolean(Vec<i8>),
    LocalDate(Vec<i32>),
    LocalDateTime(Vec<i64>),
}

impl ColumnData {
    fn empty(column_type: ColumnType) -> Self {
        match column_type {
            ColumnType::Double => ColumnData::Double(Vec::new()),
            ColumnType::Float => ColumnData::Float(Vec::new()),
            ColumnType::Short => ColumnData::Short(Vec::new()),
            ColumnType::Integer => ColumnData::Integer(Vec::new()),
            ColumnType::Long => ColumnData::Long(Vec::new()),
            ColumnType::String => ColumnData::String(Vec::new()),
            ColumnType::Text => ColumnData::Text(Vec::new()),
            ColumnType::Boolean => ColumnData::Boolean(Vec::new()),
            ColumnType::LocalDate => ColumnData::LocalDate(Vec::new()),
            ColumnType::LocalDateTime => ColumnData::LocalDateTime(Vec::new()),
        }
    }

    fn len(&self) -> usize {
        match self {
            ColumnData::Double(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Short(v) => v.len(),
            ColumnData::Integer(v) => v.len(),
            ColumnData::Long(v) => v.len(),
            ColumnData::String(v) | ColumnData::Text(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::LocalDate(v) => v.len(),
            ColumnData::LocalDateTime(v) => v.len(),
        }
    }

    /// Copy the given rows, in order. Callers check bounds.
    fn gather(&self, rows: &[usize]) -> Self {
        fn pick<T: Clone>(v: &[T], rows: &[usize]) -> Vec<T> {
            rows.iter().map(|&r| v[r].clone()).collect()
        }
        match self {
            ColumnData::Double(v) => ColumnData::Double(pick(v, rows)),
            ColumnData::Float(v) => ColumnData::Float(pick(v, rows)),
            ColumnData::Short(v) => ColumnData::Short(pick(v, rows)),
            ColumnData::Integer(v) => ColumnData::Integer(pick(v, rows)),
            ColumnData::Long(v) => ColumnData::Long(pick(v, rows)),
            ColumnData::String(v) => ColumnData::String(pick(v, rows)),
            ColumnData::Text(v) => ColumnData::Text(pick(v, rows)),
            ColumnData::Boolean(v) => ColumnData::Boolean(pick(v, rows)),
            ColumnData::LocalDate(v) => ColumnData::LocalDate(pick(v, rows)),
            ColumnData::LocalDateTime(v) => ColumnData::LocalDateTime(pick(v, rows)),
        }
    }
}

fn pack_date(d: NaiveDate) -> i32 {
    chrono::Datelike::num_days_from_ce(&d)
}

fn unpack_date(packed: i32) -> Option<NaiveDate> {
    if packed == missing::LOCAL_DATE {
        return None;
    }
    NaiveDate::from_num_days_from_ce_opt(packed)
}

fn pack_date_time(t: NaiveDateTime) -> i64 {
    t.and_utc().timestamp_millis()
}

fn unpack_date_time(packed: i64) -> Option<NaiveDateTime> {
    if packed == missing::LOCAL_DATE_TIME {
        return None;
    }
    DateTime::from_timestamp_millis(packed).map(|t| t.naive_utc())
}

fn parse_boolean(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "t" | "yes" | "y" | "1" => Some(true),
        "false" | "f" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

/// A named, typed, ordered sequence of values
#[derive(Debug, Clone)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    // =========================================================================
    // Construction
    // =========================================================================

    /// Create an empty column of the given type
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::empty(column_type),
        }
    }

    /// Create a `Double` column; NaN entries are missing
    pub fn doubles(name: impl Into<String>, values: impl IntoIterator<Item = f64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Double(values.into_iter().collect()),
        }
    }

    /// Create a `Float` column; NaN entries are missing
    pub fn floats(name: impl Into<String>, values: impl IntoIterator<Item = f32>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Float(values.into_iter().collect()),
        }
    }

    /// Create a `Short` column
    pub fn shorts(name: impl Into<String>, values: impl IntoIterator<Item = i16>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Short(values.into_iter().collect()),
        }
    }

    /// Create an `Integer` column
    pub fn integers(name: impl Into<String>, values: impl IntoIterator<Item = i32>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Integer(values.into_iter().collect()),
        }
    }

    /// Create a `Long` column
    pub fn longs(name: impl Into<String>, values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Long(values.into_iter().collect()),
        }
    }

    /// Create a `String` column; empty strings are missing
    pub fn strings<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::String(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a `Text` column; empty strings are missing
    pub fn texts<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Text(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Create a `Boolean` column
    pub fn booleans(name: impl Into<String>, values: impl IntoIterator<Item = bool>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::Boolean(
                values
                    .into_iter()
                    .map(|b| if b { BYTE_TRUE } else { BYTE_FALSE })
                    .collect(),
            ),
        }
    }

    /// Create a `LocalDate` column
    pub fn dates(name: impl Into<String>, values: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::LocalDate(values.into_iter().map(pack_date).collect()),
        }
    }

    /// Create a `LocalDateTime` column
    pub fn date_times(
        name: impl Into<String>,
        values: impl IntoIterator<Item = NaiveDateTime>,
    ) -> Self {
        Self {
            name: name.into(),
            data: ColumnData::LocalDateTime(values.into_iter().map(pack_date_time).collect()),
        }
    }

    /// Create a column of the given type from scalar values
    pub fn from_values(
        name: impl Into<String>,
        column_type: ColumnType,
        values: &[Value],
    ) -> Result<Self> {
        let mut column = Self::new(name, column_type);
        for value in values {
            column.append(value)?;
        }
        Ok(column)
    }

    /// Create an empty column with the same name and type
    pub fn empty_copy(&self) -> Self {
        Self::new(self.name.clone(), self.column_type())
    }

    // =========================================================================
    // Metadata
    // =========================================================================

    /// Column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the column
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Return the column renamed
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Column type
    pub fn column_type(&self) -> ColumnType {
        match &self.data {
            ColumnData::Double(_) => ColumnType::Double,
            ColumnData::Float(_) => ColumnType::Float,
            ColumnData::Short(_) => ColumnType::Short,
            ColumnData::Integer(_) => ColumnType::Integer,
            ColumnData::Long(_) => ColumnType::Long,
            ColumnData::String(_) => ColumnType::String,
            ColumnData::Text(_) => ColumnType::Text,
            ColumnData::Boolean(_) => ColumnType::Boolean,
            ColumnData::LocalDate(_) => ColumnType::LocalDate,
            ColumnData::LocalDateTime(_) => ColumnType::LocalDateTime,
        }
    }

    /// Number of entries, missing included
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the column has no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn check_row(&self, row: usize) -> Result<()> {
        if row >= self.len() {
            return Err(Error::RowIndexOutOfBounds {
                index: row,
                len: self.len(),
            });
        }
        Ok(())
    }

    // =========================================================================
    // Missing values
    // =========================================================================

    /// Callers check bounds
    fn missing_at(&self, row: usize) -> bool {
        match &self.data {
            ColumnData::Double(v) => v[row].is_nan(),
            ColumnData::Float(v) => v[row].is_nan(),
            ColumnData::Short(v) => v[row] == missing::SHORT,
            ColumnData::Integer(v) => v[row] == missing::INTEGER,
            ColumnData::Long(v) => v[row] == missing::LONG,
            ColumnData::String(v) | ColumnData::Text(v) => v[row] == missing::STRING,
            ColumnData::Boolean(v) => v[row] == missing::BOOLEAN,
            ColumnData::LocalDate(v) => v[row] == missing::LOCAL_DATE,
            ColumnData::LocalDateTime(v) => v[row] == missing::LOCAL_DATE_TIME,
        }
    }

    /// Returns true if the entry at `row` is the missing sentinel
    pub fn is_missing(&self, row: usize) -> Result<bool> {
        self.check_row(row)?;
        Ok(self.missing_at(row))
    }

    /// Number of missing entries
    pub fn count_missing(&self) -> usize {
        (0..self.len()).filter(|&row| self.missing_at(row)).count()
    }

    /// Copy of the column without its missing entries
    pub fn remove_missing(&self) -> Self {
        let rows: Vec<usize> = (0..self.len()).filter(|&r| !self.missing_at(r)).collect();
        Self {
            name: self.name.clone(),
            data: self.data.gather(&rows),
        }
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Append the missing sentinel
    pub fn append_missing(&mut self) {
        match &mut self.data {
            ColumnData::Double(v) => v.push(missing::DOUBLE),
            ColumnData::Float(v) => v.push(missing::FLOAT),
            ColumnData::Short(v) => v.push(missing::SHORT),
            ColumnData::Integer(v) => v.push(missing::INTEGER),
            ColumnData::Long(v) => v.push(missing::LONG),
            ColumnData::String(v) | ColumnData::Text(v) => v.push(missing::STRING.to_string()),
            ColumnData::Boolean(v) => v.push(missing::BOOLEAN),
            ColumnData::LocalDate(v) => v.push(missing::LOCAL_DATE),
            ColumnData::LocalDateTime(v) => v.push(missing::LOCAL_DATE_TIME),
        }
    }

    /// Append a scalar value.
    ///
    /// Numeric values convert between numeric column types when no
    /// information is lost; a NaN float appends missing to integer columns.
    /// `Value::Null` appends the missing sentinel.
    pub fn append(&mut self, value: &Value) -> Result<()> {
        if value.is_null() {
            self.append_missing();
            return Ok(());
        }

        let column_type = self.column_type();
        if column_type.is_numeric() && matches!(value, Value::Float(f) if f.is_nan()) {
            self.append_missing();
            return Ok(());
        }

        let mismatch = || {
            Error::type_mismatch(
                format!("append to column '{}'", self.name),
                value.column_type().name(),
                column_type,
            )
        };

        match (&mut self.data, value) {
            (ColumnData::Double(v), Value::Float(f)) => v.push(*f),
            (ColumnData::Double(v), Value::Integer(i)) => v.push(*i as f64),
            (ColumnData::Float(v), Value::Float(f)) => v.push(*f as f32),
            (ColumnData::Float(v), Value::Integer(i)) => v.push(*i as f32),
            (ColumnData::Short(v), _) => {
                let i = integral(value).ok_or_else(mismatch)?;
                v.push(i16::try_from(i).map_err(|_| out_of_range(i, column_type))?);
            }
            (ColumnData::Integer(v), _) => {
                let i = integral(value).ok_or_else(mismatch)?;
                v.push(i32::try_from(i).map_err(|_| out_of_range(i, column_type))?);
            }
            (ColumnData::Long(v), _) => {
                let i = integral(value).ok_or_else(mismatch)?;
                v.push(i);
            }
            (ColumnData::String(v), Value::Text(s)) | (ColumnData::Text(v), Value::Text(s)) => {
                v.push(s.to_string())
            }
            (ColumnData::Boolean(v), Value::Boolean(b)) => {
                v.push(if *b { BYTE_TRUE } else { BYTE_FALSE })
            }
            (ColumnData::LocalDate(v), Value::Date(d)) => v.push(pack_date(*d)),
            (ColumnData::LocalDateTime(v), Value::DateTime(t)) => v.push(pack_date_time(*t)),
            (ColumnData::LocalDateTime(v), Value::Date(d)) => {
                let midnight = d.and_hms_opt(0, 0, 0).ok_or_else(mismatch)?;
                v.push(pack_date_time(midnight))
            }
            _ => return Err(mismatch()),
        }
        Ok(())
    }

    /// Parse one textual cell and append it. The empty string appends missing.
    pub fn append_cell(&mut self, cell: &str) -> Result<()> {
        if cell.trim().is_empty() {
            self.append_missing();
            return Ok(());
        }

        let column_type = self.column_type();
        let row = self.len();
        let failure = || Error::parse_failure(self.name.clone(), row, cell, column_type);

        let value = match column_type {
            ColumnType::Double | ColumnType::Float => {
                Value::Float(parse_decimal(cell).ok_or_else(failure)?)
            }
            ColumnType::Short | ColumnType::Integer | ColumnType::Long => {
                Value::Integer(cell.trim().parse::<i64>().map_err(|_| failure())?)
            }
            ColumnType::String | ColumnType::Text => Value::text(cell),
            ColumnType::Boolean => Value::Boolean(parse_boolean(cell).ok_or_else(failure)?),
            ColumnType::LocalDate => Value::Date(parse_date(cell).ok_or_else(failure)?),
            ColumnType::LocalDateTime => {
                Value::DateTime(parse_date_time(cell).ok_or_else(failure)?)
            }
        };
        self.append(&value)
    }

    // =========================================================================
    // Cell access
    // =========================================================================

    /// Read one entry as a scalar; missing entries read as `Value::Null`
    pub fn get(&self, row: usize) -> Result<Value> {
        self.check_row(row)?;
        if self.missing_at(row) {
            return Ok(Value::null(self.column_type()));
        }
        let value = match &self.data {
            ColumnData::Double(v) => Value::Float(v[row]),
            ColumnData::Float(v) => Value::Float(v[row] as f64),
            ColumnData::Short(v) => Value::Integer(v[row] as i64),
            ColumnData::Integer(v) => Value::Integer(v[row] as i64),
            ColumnData::Long(v) => Value::Integer(v[row]),
            ColumnData::String(v) | ColumnData::Text(v) => Value::text(v[row].as_str()),
            ColumnData::Boolean(v) => Value::Boolean(v[row] == BYTE_TRUE),
            ColumnData::LocalDate(v) => match unpack_date(v[row]) {
                Some(d) => Value::Date(d),
                None => Value::null(ColumnType::LocalDate),
            },
            ColumnData::LocalDateTime(v) => match unpack_date_time(v[row]) {
                Some(t) => Value::DateTime(t),
                None => Value::null(ColumnType::LocalDateTime),
            },
        };
        Ok(value)
    }

    /// Read a numeric entry as f64; missing entries read as NaN
    pub fn get_double(&self, row: usize) -> Result<f64> {
        self.check_row(row)?;
        if self.missing_at(row) {
            return Ok(f64::NAN);
        }
        match &self.data {
            ColumnData::Double(v) => Ok(v[row]),
            ColumnData::Float(v) => Ok(v[row] as f64),
            ColumnData::Short(v) => Ok(v[row] as f64),
            ColumnData::Integer(v) => Ok(v[row] as f64),
            ColumnData::Long(v) => Ok(v[row] as f64),
            _ => Err(Error::type_mismatch(
                format!("numeric read of column '{}'", self.name),
                "numeric",
                self.column_type(),
            )),
        }
    }

    /// Canonical formatted string of one entry; missing entries are ""
    pub fn get_string(&self, row: usize) -> Result<String> {
        self.check_row(row)?;
        if self.missing_at(row) {
            return Ok(String::new());
        }
        let s = match &self.data {
            ColumnData::Double(v) => format_float(v[row]),
            ColumnData::Float(v) => format!("{:?}", v[row]),
            ColumnData::Short(v) => v[row].to_string(),
            ColumnData::Integer(v) => v[row].to_string(),
            ColumnData::Long(v) => v[row].to_string(),
            ColumnData::String(v) | ColumnData::Text(v) => v[row].clone(),
            ColumnData::Boolean(v) => (v[row] == BYTE_TRUE).to_string(),
            ColumnData::LocalDate(v) => unpack_date(v[row])
                .map(|d| d.format(DATE_FORMAT).to_string())
                .unwrap_or_default(),
            ColumnData::LocalDateTime(v) => unpack_date_time(v[row])
                .map(|t| t.format(DATE_TIME_FORMAT).to_string())
                .unwrap_or_default(),
        };
        Ok(s)
    }

    /// Raw byte representation of one entry, sentinels included
    pub fn cell_bytes(&self, row: usize) -> Result<Vec<u8>> {
        self.check_row(row)?;
        let bytes = match &self.data {
            ColumnData::Double(v) => v[row].to_bits().to_be_bytes().to_vec(),
            ColumnData::Float(v) => v[row].to_bits().to_be_bytes().to_vec(),
            ColumnData::Short(v) => v[row].to_be_bytes().to_vec(),
            ColumnData::Integer(v) => v[row].to_be_bytes().to_vec(),
            ColumnData::Long(v) => v[row].to_be_bytes().to_vec(),
            ColumnData::String(v) | ColumnData::Text(v) => v[row].as_bytes().to_vec(),
            ColumnData::Boolean(v) => v[row].to_be_bytes().to_vec(),
            ColumnData::LocalDate(v) => v[row].to_be_bytes().to_vec(),
            ColumnData::LocalDateTime(v) => v[row].to_be_bytes().to_vec(),
        };
        Ok(bytes)
    }

    /// Iterate entries as scalars
    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        // Rows come from 0..len so the read cannot fail
        (0..self.len()).filter_map(move |row| self.get(row).ok())
    }

    // =========================================================================
    // Derived columns and summaries
    // =========================================================================

    /// Copy of the given rows, in the order given
    pub fn select(&self, rows: &[usize]) -> Result<Self> {
        if let Some(&bad) = rows.iter().find(|&&r| r >= self.len()) {
            return Err(Error::RowIndexOutOfBounds {
                index: bad,
                len: self.len(),
            });
        }
        Ok(Self {
            name: self.name.clone(),
            data: self.data.gather(rows),
        })
    }

    /// Number of distinct non-missing values
    pub fn count_unique(&self) -> usize {
        let mut seen: FxHashSet<Vec<u8>> = FxHashSet::default();
        for row in 0..self.len() {
            if self.missing_at(row) {
                continue;
            }
            if let Ok(bytes) = self.cell_bytes(row) {
                seen.insert(bytes);
            }
        }
        seen.len()
    }

    /// Non-missing entries of a numeric column, as f64
    pub fn to_doubles(&self) -> Result<Vec<f64>> {
        let out = match &self.data {
            ColumnData::Double(v) => v.iter().copied().filter(|x| !x.is_nan()).collect(),
            ColumnData::Float(v) => v
                .iter()
                .filter(|x| !x.is_nan())
                .map(|&x| x as f64)
                .collect(),
            ColumnData::Short(v) => v
                .iter()
                .filter(|&&x| x != missing::SHORT)
                .map(|&x| x as f64)
                .collect(),
            ColumnData::Integer(v) => v
                .iter()
                .filter(|&&x| x != missing::INTEGER)
                .map(|&x| x as f64)
                .collect(),
            ColumnData::Long(v) => v
                .iter()
                .filter(|&&x| x != missing::LONG)
                .map(|&x| x as f64)
                .collect(),
            _ => {
                return Err(Error::type_mismatch(
                    format!("numeric read of column '{}'", self.name),
                    "numeric",
                    self.column_type(),
                ))
            }
        };
        Ok(out)
    }

    fn booleans_only(&self) -> Result<&[i8]> {
        match &self.data {
            ColumnData::Boolean(v) => Ok(v),
            _ => Err(Error::type_mismatch(
                format!("boolean read of column '{}'", self.name),
                ColumnType::Boolean.name(),
                self.column_type(),
            )),
        }
    }

    /// Number of `true` entries of a boolean column
    pub fn count_true(&self) -> Result<usize> {
        Ok(self.booleans_only()?.iter().filter(|&&b| b == BYTE_TRUE).count())
    }

    /// Number of `false` entries of a boolean column
    pub fn count_false(&self) -> Result<usize> {
        Ok(self.booleans_only()?.iter().filter(|&&b| b == BYTE_FALSE).count())
    }

    /// Smallest non-missing value of a numeric or temporal column
    pub fn min_value(&self) -> Result<Value> {
        self.extreme(|a, b| a < b)
    }

    /// Largest non-missing value of a numeric or temporal column
    pub fn max_value(&self) -> Result<Value> {
        self.extreme(|a, b| a > b)
    }

    fn extreme(&self, better: impl Fn(f64, f64) -> bool) -> Result<Value> {
        let column_type = self.column_type();
        match &self.data {
            ColumnData::LocalDate(v) => {
                let best = v
                    .iter()
                    .copied()
                    .filter(|&x| x != missing::LOCAL_DATE)
                    .reduce(|a, b| if better(b as f64, a as f64) { b } else { a });
                Ok(best
                    .and_then(unpack_date)
                    .map(Value::Date)
                    .unwrap_or(Value::null(column_type)))
            }
            ColumnData::LocalDateTime(v) => {
                let best = v
                    .iter()
                    .copied()
                    .filter(|&x| x != missing::LOCAL_DATE_TIME)
                    .reduce(|a, b| if better(b as f64, a as f64) { b } else { a });
                Ok(best
                    .and_then(unpack_date_time)
                    .map(Value::DateTime)
                    .unwrap_or(Value::null(column_type)))
            }
            _ if column_type.is_numeric() => {
                let best = self
                    .to_doubles()?
                    .into_iter()
                    .reduce(|a, b| if better(b, a) { b } else { a });
                Ok(best.map(Value::Float).unwrap_or(Value::null(column_type)))
            }
            _ => Err(Error::type_mismatch(
                format!("ordered read of column '{}'", self.name),
                "numeric or temporal",
                column_type,
            )),
        }
    }
}

/// Integral value of a scalar, if it has one
fn integral(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Float(f) if f.fract() == 0.0 && f.abs() < i64::MAX as f64 => Some(*f as i64),
        _ => None,
    }
}

fn out_of_range(value: i64, column_type: ColumnType) -> Error {
    Error::invalid_argument(format!("{} is out of range for {}", value, column_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_missing_sentinels() {
        let mut col = Column::doubles("d", [1.0, f64::NAN, 3.0]);
        assert_eq!(col.count_missing(), 1);
        assert!(col.is_missing(1).unwrap());
        col.append_missing();
        assert_eq!(col.len(), 4);
        assert_eq!(col.count_missing(), 2);

        let col = Column::integers("i", [1, missing::INTEGER]);
        assert_eq!(col.count_missing(), 1);
        assert!(col.get(1).unwrap().is_null());
        assert!(col.get_double(1).unwrap().is_nan());

        let col = Column::strings("s", ["a", "", "b"]);
        assert_eq!(col.count_missing(), 1);
    }

    #[test]
    fn test_append_coerces_numbers() {
        let mut col = Column::new("n", ColumnType::Integer);
        col.append(&Value::integer(4)).unwrap();
        col.append(&Value::float(5.0)).unwrap();
        col.append(&Value::float(f64::NAN)).unwrap();
        col.append(&Value::null(ColumnType::Integer)).unwrap();
        assert_eq!(col.len(), 4);
        assert_eq!(col.count_missing(), 2);
        assert!(col.append(&Value::float(5.5)).is_err());
        assert!(col.append(&Value::integer(i64::MAX)).is_err());
        assert!(matches!(
            col.append(&Value::text("x")),
            Err(Error::TypeMismatch { .. })
        ));

        let mut col = Column::new("d", ColumnType::Double);
        col.append(&Value::integer(2)).unwrap();
        assert_eq!(col.get(0).unwrap(), Value::float(2.0));
    }

    #[test]
    fn test_append_cell() {
        let mut col = Column::new("b", ColumnType::Boolean);
        col.append_cell("true").unwrap();
        col.append_cell("").unwrap();
        col.append_cell("F").unwrap();
        assert_eq!(col.count_true().unwrap(), 1);
        assert_eq!(col.count_false().unwrap(), 1);
        assert_eq!(col.count_missing(), 1);

        let mut col = Column::new("d", ColumnType::Double);
        col.append_cell("12.5").unwrap();
        let err = col.append_cell("twelve").unwrap_err();
        assert_eq!(
            err,
            Error::parse_failure("d", 1, "twelve", ColumnType::Double)
        );

        let mut col = Column::new("when", ColumnType::LocalDateTime);
        col.append_cell("2014-07-09 13:03:44.7").unwrap();
        assert_eq!(col.get_string(0).unwrap(), "2014-07-09T13:03:44.700");
    }

    #[test]
    fn test_get_string_formats() {
        let col = Column::doubles("d", [2.0, 84.3, f64::NAN]);
        assert_eq!(col.get_string(0).unwrap(), "2.0");
        assert_eq!(col.get_string(1).unwrap(), "84.3");
        assert_eq!(col.get_string(2).unwrap(), "");

        let col = Column::dates("when", [date(2020, 1, 31)]);
        assert_eq!(col.get_string(0).unwrap(), "2020-01-31");
        assert!(col.get_string(1).is_err());
    }

    #[test]
    fn test_select_and_remove_missing() {
        let col = Column::longs("l", [10, missing::LONG, 30, 40]);
        let picked = col.select(&[3, 0]).unwrap();
        assert_eq!(picked.len(), 2);
        assert_eq!(picked.get(0).unwrap(), Value::integer(40));
        assert_eq!(picked.name(), "l");
        assert!(col.select(&[4]).is_err());

        let present = col.remove_missing();
        assert_eq!(present.len(), 3);
        assert_eq!(present.count_missing(), 0);
    }

    #[test]
    fn test_count_unique_ignores_missing() {
        let col = Column::doubles("d", [1.0, 1.0, 2.0, f64::NAN, f64::NAN]);
        assert_eq!(col.count_unique(), 2);
        let col = Column::strings("s", ["a", "b", "a", ""]);
        assert_eq!(col.count_unique(), 2);
    }

    #[test]
    fn test_to_doubles() {
        let col = Column::shorts("s", [1, missing::SHORT, 3]);
        assert_eq!(col.to_doubles().unwrap(), vec![1.0, 3.0]);
        assert!(Column::booleans("b", [true]).to_doubles().is_err());
    }

    #[test]
    fn test_temporal_extremes() {
        let col = Column::dates("d", [date(2020, 5, 1), date(2019, 1, 1), date(2021, 2, 2)]);
        assert_eq!(col.min_value().unwrap(), Value::date(date(2019, 1, 1)));
        assert_eq!(col.max_value().unwrap(), Value::date(date(2021, 2, 2)));

        let empty = Column::new("d", ColumnType::LocalDate);
        assert!(empty.min_value().unwrap().is_null());

        let mut col = Column::new("t", ColumnType::LocalDateTime);
        col.append_cell("2014-07-09 13:00:00").unwrap();
        col.append_missing();
        col.append_cell("2014-07-09 09:30:00").unwrap();
        assert_eq!(
            col.min_value().unwrap(),
            Value::date_time(date(2014, 7, 9).and_hms_opt(9, 30, 0).unwrap())
        );

        assert!(Column::strings("s", ["a"]).min_value().is_err());
    }

    #[test]
    fn test_cell_bytes_distinguish_values() {
        let col = Column::integers("i", [1, 2, 1]);
        assert_eq!(col.cell_bytes(0).unwrap(), col.cell_bytes(2).unwrap());
        assert_ne!(col.cell_bytes(0).unwrap(), col.cell_bytes(1).unwrap());
    }
}
