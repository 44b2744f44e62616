//! Column descriptions used by the profiler.

use crate::types::{CategoricalDescription, DateDescription, NumericDescription};
use crate::utils::{epoch_days_to_date, string_value_counts};
use anyhow::Result;
use polars::prelude::*;

/// count / mean / std / min / median / max of a numeric column.
///
/// `std` uses the sample standard deviation (ddof 1).
pub(crate) fn describe_numeric(series: &Series) -> Result<NumericDescription> {
    let float_series = series.cast(&DataType::Float64)?;
    let ca = float_series.f64()?;

    Ok(NumericDescription {
        count: ca.len() - ca.null_count(),
        mean: ca.mean(),
        std: ca.std(1),
        min: ca.min(),
        median: ca.median(),
        max: ca.max(),
    })
}

/// count / unique / top / freq of a text column.
pub(crate) fn describe_categorical(series: &Series) -> Result<CategoricalDescription> {
    let str_series = series.cast(&DataType::String)?;
    let counts = string_value_counts(&str_series);

    let top = counts
        .iter()
        .max_by(|(a_val, a_count), (b_val, b_count)| {
            a_count.cmp(b_count).then_with(|| b_val.cmp(a_val))
        })
        .map(|(val, count)| (val.clone(), *count));

    Ok(CategoricalDescription {
        count: str_series.len() - str_series.null_count(),
        unique: counts.len(),
        freq: top.as_ref().map(|(_, c)| *c).unwrap_or(0),
        top: top.map(|(v, _)| v),
    })
}

/// count / first / last date of a `Date` column.
pub(crate) fn describe_date(series: &Series) -> Result<DateDescription> {
    let days = series.cast(&DataType::Int32)?;
    let ca = days.i32()?;

    Ok(DateDescription {
        count: ca.len() - ca.null_count(),
        min: ca.min().and_then(epoch_days_to_date),
        max: ca.max().and_then(epoch_days_to_date),
    })
}
