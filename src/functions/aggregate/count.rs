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

//! Counting aggregate functions, valid for every column type

use crate::core::{ColumnType, Value};
use crate::functions::{AggregateFunction, FunctionFamily, Reducer};

fn generic(
    name: &'static str,
    description: &'static str,
    column: impl Into<String>,
    reducer: Reducer,
) -> AggregateFunction {
    AggregateFunction::new(
        name,
        description,
        column,
        FunctionFamily::Generic,
        ColumnType::Integer,
        reducer,
    )
}

/// COUNT NON MISSING - entries that are not missing
pub fn count_non_missing(column: impl Into<String>) -> AggregateFunction {
    generic(
        "CountNonMissing",
        "Number of non-missing entries",
        column,
        |c| Ok(Value::from(c.len() - c.count_missing())),
    )
}

/// Synonym for [`count_non_missing`]
pub fn count(column: impl Into<String>) -> AggregateFunction {
    count_non_missing(column)
}

/// COUNT MISSING
pub fn count_missing(column: impl Into<String>) -> AggregateFunction {
    generic("Missing Values", "Number of missing entries", column, |c| {
        Ok(Value::from(c.count_missing()))
    })
}

/// COUNT WITH MISSING - every entry
pub fn count_with_missing(column: impl Into<String>) -> AggregateFunction {
    generic(
        "Count (incl. missing)",
        "Number of entries, missing included",
        column,
        |c| Ok(Value::from(c.len())),
    )
}

/// COUNT UNIQUE - distinct non-missing entries
pub fn count_unique(column: impl Into<String>) -> AggregateFunction {
    generic(
        "Count Unique",
        "Number of distinct non-missing entries",
        column,
        |c| Ok(Value::from(c.count_unique())),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Column;

    #[test]
    fn test_counts_on_text() {
        let c = Column::strings("s", ["a", "", "b", "a"]);
        assert_eq!(count("s").summarize(&c).unwrap(), Value::Integer(3));
        assert_eq!(count_missing("s").summarize(&c).unwrap(), Value::Integer(1));
        assert_eq!(count_with_missing("s").summarize(&c).unwrap(), Value::Integer(4));
        assert_eq!(count_unique("s").summarize(&c).unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_count_identity() {
        let c = Column::doubles("d", [1.0, f64::NAN, f64::NAN, 4.0, 4.0]);
        let with = count_with_missing("d").summarize(&c).unwrap().as_int64().unwrap();
        let missing = count_missing("d").summarize(&c).unwrap().as_int64().unwrap();
        let present = count_non_missing("d").summarize(&c).unwrap().as_int64().unwrap();
        assert_eq!(with - missing, present);
        assert_eq!(count_unique("d").summarize(&c).unwrap(), Value::Integer(2));
    }

    #[test]
    fn test_text_is_not_coerced() {
        // Generic functions take textual columns as they are
        let c = Column::strings("s", ["not a number"]);
        assert_eq!(count("s").summarize(&c).unwrap(), Value::Integer(1));
    }
}
