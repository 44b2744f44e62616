//! Column converters used by the type corrector.
//!
//! Every converter is total: a value it cannot interpret becomes null.

use crate::utils::{date_to_epoch_days, parse_date_string, parse_integer_string, parse_numeric_string};
use anyhow::Result;
use polars::prelude::*;

/// Convert a column to Int64.
///
/// Text is parsed with [`parse_integer_string`]; numeric columns are cast.
pub fn to_integer(series: &Series) -> Result<Series> {
    let name = series.name().clone();
    if let Ok(str_chunked) = series.str() {
        let converted: Int64Chunked = str_chunked
            .into_iter()
            .map(|opt| opt.and_then(parse_integer_string))
            .collect();
        return Ok(converted.with_name(name).into_series());
    }

    // Fractional floats are not valid integers; null them rather than truncate.
    let as_f64 = series.cast(&DataType::Float64)?;
    let converted: Int64Chunked = as_f64
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| v.is_finite() && v.fract() == 0.0).map(|v| v as i64))
        .collect();
    Ok(converted.with_name(name).into_series())
}

/// Convert a column to Float64.
pub fn to_decimal(series: &Series) -> Result<Series> {
    let name = series.name().clone();
    if let Ok(str_chunked) = series.str() {
        let converted: Float64Chunked = str_chunked
            .into_iter()
            .map(|opt| opt.and_then(parse_numeric_string))
            .collect();
        return Ok(converted.with_name(name).into_series());
    }

    let as_f64 = series.cast(&DataType::Float64)?;
    let converted: Float64Chunked = as_f64
        .f64()?
        .into_iter()
        .map(|opt| opt.filter(|v| v.is_finite()))
        .collect();
    Ok(converted.with_name(name).into_series())
}

/// Convert a column to Date.
pub fn to_date(series: &Series) -> Result<Series> {
    if series.dtype() == &DataType::Date {
        return Ok(series.clone());
    }

    let name = series.name().clone();
    let str_series = series.cast(&DataType::String)?;
    let days: Int32Chunked = str_series
        .str()?
        .into_iter()
        .map(|opt| opt.and_then(parse_date_string).map(date_to_epoch_days))
        .collect();
    Ok(days.with_name(name).into_series().cast(&DataType::Date)?)
}

/// Convert a column to String, turning blank cells into nulls.
pub fn to_text(series: &Series) -> Result<Series> {
    let name = series.name().clone();
    let str_series = series.cast(&DataType::String)?;
    let converted: StringChunked = str_series
        .str()?
        .into_iter()
        .map(|opt| opt.map(str::trim).filter(|s| !s.is_empty()))
        .collect();
    Ok(converted.with_name(name).into_series())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::epoch_days_to_date;
    use chrono::NaiveDate;

    #[test]
    fn test_to_integer_from_text() {
        let series = Series::new("id".into(), &[Some("101"), Some("nan"), None, Some("102.0"), Some("x")]);
        let out = to_integer(&series).unwrap();
        let values: Vec<Option<i64>> = out.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(101), None, None, Some(102), None]);
        assert_eq!(out.name().as_str(), "id");
    }

    #[test]
    fn test_to_integer_from_float() {
        let series = Series::new("q".into(), &[Some(2.0), Some(2.5), None]);
        let out = to_integer(&series).unwrap();
        let values: Vec<Option<i64>> = out.i64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(2), None, None]);
    }

    #[test]
    fn test_to_integer_is_idempotent() {
        let series = Series::new("q".into(), &[Some(1i64), None, Some(3)]);
        let once = to_integer(&series).unwrap();
        let twice = to_integer(&once).unwrap();
        assert!(once.equals_missing(&twice));
    }

    #[test]
    fn test_to_decimal_from_text() {
        let series = Series::new(
            "price".into(),
            &[Some("5999.90"), Some("invalid_value"), Some("850"), None],
        );
        let out = to_decimal(&series).unwrap();
        let values: Vec<Option<f64>> = out.f64().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some(5999.9), None, Some(850.0), None]);
    }

    #[test]
    fn test_to_date_from_text() {
        let series = Series::new("d".into(), &[Some("2026-07-01"), Some("garbage"), None]);
        let out = to_date(&series).unwrap();
        assert_eq!(out.dtype(), &DataType::Date);
        assert_eq!(out.null_count(), 2);

        let days = out.cast(&DataType::Int32).unwrap();
        let first = days.i32().unwrap().get(0).unwrap();
        assert_eq!(
            epoch_days_to_date(first),
            NaiveDate::from_ymd_opt(2026, 7, 1)
        );
    }

    #[test]
    fn test_to_text_blank_becomes_null() {
        let series = Series::new("s".into(), &[Some(" Pending "), Some("   "), None]);
        let out = to_text(&series).unwrap();
        let values: Vec<Option<&str>> = out.str().unwrap().into_iter().collect();
        assert_eq!(values, vec![Some("Pending"), None, None]);
    }
}
