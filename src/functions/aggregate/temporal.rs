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

//! Date and date-time aggregate functions

use crate::core::ColumnType;
use crate::functions::{AggregateFunction, FunctionFamily};

/// EARLIEST DATE - smallest non-missing date
pub fn earliest_date(column: impl Into<String>) -> AggregateFunction {
    AggregateFunction::new(
        "Earliest Date",
        "Earliest non-missing date",
        column,
        FunctionFamily::Date,
        ColumnType::LocalDate,
        |c| c.min_value(),
    )
}

/// LATEST DATE - largest non-missing date
pub fn latest_date(column: impl Into<String>) -> AggregateFunction {
    AggregateFunction::new(
        "Latest Date",
        "Latest non-missing date",
        column,
        FunctionFamily::Date,
        ColumnType::LocalDate,
        |c| c.max_value(),
    )
}

/// EARLIEST DATE-TIME - smallest non-missing date-time
pub fn earliest_date_time(column: impl Into<String>) -> AggregateFunction {
    AggregateFunction::new(
        "Earliest Date-Time",
        "Earliest non-missing date-time",
        column,
        FunctionFamily::DateTime,
        ColumnType::LocalDateTime,
        |c| c.min_value(),
    )
}

/// LATEST DATE-TIME - largest non-missing date-time
pub fn latest_date_time(column: impl Into<String>) -> AggregateFunction {
    AggregateFunction::new(
        "Latest Date-Time",
        "Latest non-missing date-time",
        column,
        FunctionFamily::DateTime,
        ColumnType::LocalDateTime,
        |c| c.max_value(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Column, Value};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_date_extremes_skip_missing() {
        let mut c = Column::dates("when", [date(2020, 5, 1), date(2019, 1, 31)]);
        c.append_missing();
        c.append(&Value::Date(date(2021, 2, 3))).unwrap();

        assert_eq!(
            earliest_date("when").summarize(&c).unwrap(),
            Value::Date(date(2019, 1, 31))
        );
        assert_eq!(
            latest_date("when").summarize(&c).unwrap(),
            Value::Date(date(2021, 2, 3))
        );
    }

    #[test]
    fn test_date_time_extremes() {
        let a = date(2020, 1, 1).and_hms_opt(8, 30, 0).unwrap();
        let b = date(2020, 1, 1).and_hms_opt(17, 0, 0).unwrap();
        let c = Column::date_times("ts", [b, a]);
        assert_eq!(
            earliest_date_time("ts").summarize(&c).unwrap(),
            Value::DateTime(a)
        );
        assert_eq!(latest_date_time("ts").summarize(&c).unwrap(), Value::DateTime(b));
    }

    #[test]
    fn test_empty_is_missing() {
        let c = Column::new("when", ColumnType::LocalDate);
        assert!(earliest_date("when").summarize(&c).unwrap().is_null());
    }

    #[test]
    fn test_families_do_not_mix() {
        let c = Column::dates("when", [date(2020, 1, 1)]);
        assert!(earliest_date_time("when").summarize(&c).is_err());
        assert!(!earliest_date("x").is_compatible_column(ColumnType::LocalDateTime));
    }
}
