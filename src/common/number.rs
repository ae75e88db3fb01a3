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

//! Decimal number parsing for text cells
//!
//! Accepts plain decimal literals (`12.5`, `-3`, `1e3`) and percentages
//! (`45%`, `1,250%`). Percentages are scaled by 1/100.

/// Suffix marking a percentage literal
pub const PERCENTAGE: char = '%';

/// Parse a decimal or percentage literal.
///
/// Returns `None` for anything that is not a finite number, including the
/// `NaN`/`inf` spellings `str::parse::<f64>` would otherwise accept.
pub fn parse_decimal(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(body) = s.strip_suffix(PERCENTAGE) {
        let body: String = body.trim_end().chars().filter(|c| *c != ',').collect();
        return parse_finite(&body).map(|v| v / 100.0);
    }

    parse_finite(s)
}

/// Returns true if `s` parses with [`parse_decimal`]
pub fn is_number(s: &str) -> bool {
    parse_decimal(s).is_some()
}

fn parse_finite(s: &str) -> Option<f64> {
    // Reject spelled-out specials before handing off to the float parser
    if !s
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'-' | b'+' | b'e' | b'E'))
    {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_decimals() {
        assert_eq!(parse_decimal("12.5"), Some(12.5));
        assert_eq!(parse_decimal("  -3 "), Some(-3.0));
        assert_eq!(parse_decimal("1e3"), Some(1000.0));
        assert_eq!(parse_decimal("+.5"), Some(0.5));
    }

    #[test]
    fn test_percentages() {
        assert_eq!(parse_decimal("45%"), Some(0.45));
        assert_eq!(parse_decimal("1,250%"), Some(12.5));
        assert_eq!(parse_decimal("-10 %"), Some(-0.1));
    }

    #[test]
    fn test_rejects_non_numbers() {
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("abc"), None);
        assert_eq!(parse_decimal("NaN"), None);
        assert_eq!(parse_decimal("inf"), None);
        assert_eq!(parse_decimal("1,250"), None);
        assert_eq!(parse_decimal("%"), None);
        assert!(!is_number("twelve"));
        assert!(is_number("12"));
    }
}
