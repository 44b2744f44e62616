//! Shared utilities for the sales pipeline.
//!
//! Parsing of raw text cells, small statistics over Series, and date/currency
//! formatting used by more than one module.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is textual.
#[inline]
pub fn is_string_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String | DataType::Categorical(_, _))
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Characters commonly used in numeric formatting that should be stripped.
pub const NUMERIC_FORMAT_CHARS: [char; 6] = [',', '$', '%', '€', '£', ' '];

/// Common error/missing value markers in data.
pub const ERROR_MARKERS: [&str; 10] = [
    "error", "unknown", "n/a", "na", "nan", "null", "missing", "none", "#n/a", "-",
];

/// Clean a string for numeric parsing by removing formatting characters.
///
/// ```rust,ignore
/// assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
/// ```
pub fn clean_numeric_string(s: &str) -> String {
    let mut result = s.trim().to_string();
    for c in NUMERIC_FORMAT_CHARS {
        result = result.replace(c, "");
    }
    result
}

/// Check if a string is an error/missing value marker.
pub fn is_error_marker(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    ERROR_MARKERS.iter().any(|&marker| lower == marker)
}

/// Try to parse a string as a finite numeric value.
///
/// Missing markers, empty strings, free text and non-finite values all yield
/// `None`.
pub fn parse_numeric_string(s: &str) -> Option<f64> {
    if is_error_marker(s) {
        return None;
    }
    let cleaned = clean_numeric_string(s);
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Try to parse a string as a whole number.
///
/// Accepts integral floats such as `"123.0"`, which is how some tools write
/// integer columns that once held a null.
pub fn parse_integer_string(s: &str) -> Option<i64> {
    let value = parse_numeric_string(s)?;
    if value.fract() != 0.0 || value < i64::MIN as f64 || value > i64::MAX as f64 {
        return None;
    }
    Some(value as i64)
}

/// Date formats accepted when coercing `purchase_date`.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y"];

/// Try to parse a calendar date. A trailing time component is ignored.
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() || is_error_marker(trimmed) {
        return None;
    }
    let date_part = trimmed
        .split(|c: char| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed);
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(date_part, fmt).ok())
}

// =============================================================================
// Date Utilities
// =============================================================================

/// Days from 0001-01-01 (CE day 1) to 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Convert a date to the day count polars stores in a `Date` column.
pub fn date_to_epoch_days(date: NaiveDate) -> i32 {
    use chrono::Datelike;
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

/// Convert a polars `Date` day count back to a calendar date.
pub fn epoch_days_to_date(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

// =============================================================================
// Series Statistics Utilities
// =============================================================================

/// Count the non-null values of a text Series.
pub fn string_value_counts(series: &Series) -> HashMap<String, usize> {
    let mut value_counts: HashMap<String, usize> = HashMap::new();
    if let Ok(str_chunked) = series.str() {
        for val in str_chunked.into_iter().flatten() {
            *value_counts.entry(val.to_string()).or_insert(0) += 1;
        }
    }
    value_counts
}

/// Calculate the mode (most frequent value) of a string Series.
///
/// Ties go to the lexicographically smallest value so the result never depends
/// on hash order.
pub fn string_mode(series: &Series) -> Option<String> {
    let non_null = series.drop_nulls();
    if non_null.is_empty() {
        return None;
    }

    let str_series = non_null.cast(&DataType::String).ok()?;

    string_value_counts(&str_series)
        .into_iter()
        .max_by(|(a_val, a_count), (b_val, b_count)| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(val, _)| val)
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let str_chunked = series.str()?;
    let filled: StringChunked = str_chunked
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value)))
        .collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}

/// Fill null values in an integer Series with a specific value.
pub fn fill_integer_nulls(series: &Series, fill_value: i64) -> PolarsResult<Series> {
    let as_i64 = series.cast(&DataType::Int64)?;
    let filled: Int64Chunked = as_i64
        .i64()?
        .into_iter()
        .map(|opt| Some(opt.unwrap_or(fill_value)))
        .collect();
    Ok(filled.with_name(series.name().clone()).into_series())
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Currency symbol used in printed summaries and chart axes.
pub const CURRENCY_SYMBOL: &str = "R$";

/// Format an amount with thousands separators and two decimals.
///
/// ```rust,ignore
/// assert_eq!(format_currency(1234567.891), "R$ 1,234,567.89");
/// ```
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let frac = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!(
        "{}{} {}.{:02}",
        if negative { "-" } else { "" },
        CURRENCY_SYMBOL,
        grouped,
        frac
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_numeric_dtype() {
        assert!(is_numeric_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::Float64));
        assert!(!is_numeric_dtype(&DataType::String));
        assert!(!is_numeric_dtype(&DataType::Boolean));
    }

    #[test]
    fn test_clean_numeric_string() {
        assert_eq!(clean_numeric_string("$1,234.56"), "1234.56");
        assert_eq!(clean_numeric_string("  42%  "), "42");
        assert_eq!(clean_numeric_string("1 000"), "1000");
    }

    #[test]
    fn test_is_error_marker() {
        assert!(is_error_marker("ERROR"));
        assert!(is_error_marker("nan"));
        assert!(is_error_marker("N/A"));
        assert!(is_error_marker("  MISSING  "));
        assert!(!is_error_marker("42"));
        assert!(!is_error_marker("invalid_value"));
    }

    #[test]
    fn test_parse_numeric_string() {
        assert_eq!(parse_numeric_string("42"), Some(42.0));
        assert_eq!(parse_numeric_string("5999.9"), Some(5999.9));
        assert_eq!(parse_numeric_string("$1,234.56"), Some(1234.56));
        assert_eq!(parse_numeric_string(""), None);
        assert_eq!(parse_numeric_string("invalid_value"), None);
        assert_eq!(parse_numeric_string("nan"), None);
        assert_eq!(parse_numeric_string("inf"), None);
    }

    #[test]
    fn test_parse_integer_string() {
        assert_eq!(parse_integer_string("123"), Some(123));
        assert_eq!(parse_integer_string("123.0"), Some(123));
        assert_eq!(parse_integer_string("12.5"), None);
        assert_eq!(parse_integer_string("nan"), None);
    }

    #[test]
    fn test_parse_date_string() {
        let expected = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(parse_date_string("2026-07-01"), Some(expected));
        assert_eq!(parse_date_string("2026-07-01 00:00:00"), Some(expected));
        assert_eq!(parse_date_string("2026-07-01T00:00:00"), Some(expected));
        assert_eq!(parse_date_string("01/07/2026"), Some(expected));
        assert_eq!(parse_date_string("not a date"), None);
        assert_eq!(parse_date_string(""), None);
    }

    #[test]
    fn test_epoch_days_round_trip() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap();
        assert_eq!(date_to_epoch_days(epoch), 0);
        let date = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
        assert_eq!(epoch_days_to_date(date_to_epoch_days(date)), Some(date));
    }

    #[test]
    fn test_string_mode() {
        let series = Series::new("test".into(), &["a", "b", "a", "c", "a"]);
        assert_eq!(string_mode(&series), Some("a".to_string()));
    }

    #[test]
    fn test_string_mode_tie_breaks_lexicographically() {
        let series = Series::new("test".into(), &["Pending", "Delivered", "Pending", "Delivered"]);
        assert_eq!(string_mode(&series), Some("Delivered".to_string()));
    }

    #[test]
    fn test_string_mode_all_null() {
        let series = Series::new("test".into(), &[Option::<&str>::None, None]);
        assert_eq!(string_mode(&series), None);
    }

    #[test]
    fn test_fill_string_nulls_keeps_values_unquoted() {
        let series = Series::new("test".into(), &[Some("a"), None, Some("b")]);
        let filled = fill_string_nulls(&series, "z").unwrap();
        let values: Vec<Option<&str>> = filled.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("a"), Some("z"), Some("b")]);
    }

    #[test]
    fn test_fill_integer_nulls() {
        let series = Series::new("test".into(), &[Some(1i64), None, Some(3)]);
        let filled = fill_integer_nulls(&series, 2).unwrap();
        let values: Vec<Option<i64>> = filled.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(1), Some(2), Some(3)]);
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234567.891), "R$ 1,234,567.89");
        assert_eq!(format_currency(0.5), "R$ 0.50");
        assert_eq!(format_currency(999.0), "R$ 999.00");
        assert_eq!(format_currency(-1000.0), "-R$ 1,000.00");
    }
}
