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

//! Boolean aggregate functions
//!
//! Missing entries count as neither true nor false.

use crate::core::{Column, ColumnType, Value};
use crate::functions::{AggregateFunction, FunctionFamily, Reducer};

fn boolean(
    name: &'static str,
    description: &'static str,
    column: impl Into<String>,
    return_type: ColumnType,
    reducer: Reducer,
) -> AggregateFunction {
    AggregateFunction::new(
        name,
        description,
        column,
        FunctionFamily::Boolean,
        return_type,
        reducer,
    )
}

/// COUNT TRUE
pub fn count_true(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "Number True",
        "Number of true entries",
        column,
        ColumnType::Integer,
        |c| Ok(Value::from(c.count_true()?)),
    )
}

/// COUNT FALSE
pub fn count_false(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "Number False",
        "Number of false entries",
        column,
        ColumnType::Integer,
        |c| Ok(Value::from(c.count_false()?)),
    )
}

/// ALL TRUE - no entry is false
pub fn all_true(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "All True",
        "True when no entry is false",
        column,
        ColumnType::Boolean,
        |c| Ok(Value::Boolean(c.count_false()? == 0)),
    )
}

/// ANY TRUE - at least one entry is true
pub fn any_true(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "Any True",
        "True when at least one entry is true",
        column,
        ColumnType::Boolean,
        |c| Ok(Value::Boolean(c.count_true()? > 0)),
    )
}

/// NONE TRUE - no entry is true
pub fn none_true(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "None True",
        "True when no entry is true",
        column,
        ColumnType::Boolean,
        |c| Ok(Value::Boolean(c.count_true()? == 0)),
    )
}

fn proportion(column: &Column, count: usize) -> Value {
    let present = column.len() - column.count_missing();
    if present == 0 {
        return Value::Float(f64::NAN);
    }
    Value::Float(count as f64 / present as f64)
}

/// PROPORTION TRUE - true entries over non-missing entries
pub fn proportion_true(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "Proportion True",
        "Share of non-missing entries that are true",
        column,
        ColumnType::Double,
        |c| Ok(proportion(c, c.count_true()?)),
    )
}

/// PROPORTION FALSE - false entries over non-missing entries
pub fn proportion_false(column: impl Into<String>) -> AggregateFunction {
    boolean(
        "Proportion False",
        "Share of non-missing entries that are false",
        column,
        ColumnType::Double,
        |c| Ok(proportion(c, c.count_false()?)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags() -> Column {
        let mut c = Column::booleans("flag", [true, false, true]);
        c.append_missing();
        c
    }

    #[test]
    fn test_counts() {
        let c = flags();
        assert_eq!(count_true("flag").summarize(&c).unwrap(), Value::Integer(2));
        assert_eq!(count_false("flag").summarize(&c).unwrap(), Value::Integer(1));
        assert_eq!(count_true("flag").return_type(), ColumnType::Integer);
    }

    #[test]
    fn test_quantifiers() {
        let c = flags();
        assert_eq!(all_true("flag").summarize(&c).unwrap(), Value::Boolean(false));
        assert_eq!(any_true("flag").summarize(&c).unwrap(), Value::Boolean(true));
        assert_eq!(none_true("flag").summarize(&c).unwrap(), Value::Boolean(false));

        let empty = Column::new("flag", ColumnType::Boolean);
        assert_eq!(all_true("flag").summarize(&empty).unwrap(), Value::Boolean(true));
        assert_eq!(any_true("flag").summarize(&empty).unwrap(), Value::Boolean(false));
        assert_eq!(none_true("flag").summarize(&empty).unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_proportions_skip_missing() {
        let c = flags();
        let t = proportion_true("flag").summarize(&c).unwrap();
        let f = proportion_false("flag").summarize(&c).unwrap();
        assert!((t.as_float64().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((f.as_float64().unwrap() - 1.0 / 3.0).abs() < 1e-12);

        let mut only_missing = Column::new("flag", ColumnType::Boolean);
        only_missing.append_missing();
        let p = proportion_true("flag").summarize(&only_missing).unwrap();
        assert!(p.as_float64().unwrap().is_nan());
    }
}
