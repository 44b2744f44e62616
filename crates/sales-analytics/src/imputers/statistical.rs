//! Statistical imputation methods.
//!
//! Provides median and mode imputation for the order columns.

use crate::utils::{fill_integer_nulls, fill_string_nulls, string_mode};
use anyhow::Result;
use polars::prelude::*;

/// Statistical imputation methods for filling missing values.
pub struct StatisticalImputer;

impl StatisticalImputer {
    /// Fill nulls of an integer column with its median, rounded to the nearest
    /// whole number.
    ///
    /// Returns the fill value, or `None` when the column has no nulls or no
    /// values at all.
    pub fn apply_integer_median(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<Option<i64>> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }

        let Some(median_val) = series.median() else {
            processing_steps.push(format!(
                "Skipped median imputation for '{}': no values",
                col_name
            ));
            return Ok(None);
        };

        let fill = median_val.round() as i64;
        let filled = fill_integer_nulls(&series, fill)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing '{}' value(s) with median: {}",
            missing, col_name, fill
        ));
        Ok(Some(fill))
    }

    /// Fill nulls of a text column with its most frequent value.
    pub fn apply_mode_imputation(
        df: &mut DataFrame,
        col_name: &str,
        processing_steps: &mut Vec<String>,
    ) -> Result<Option<String>> {
        let series = df.column(col_name)?.as_materialized_series().clone();
        let missing = series.null_count();
        if missing == 0 {
            return Ok(None);
        }

        let Some(mode_val) = string_mode(&series) else {
            processing_steps.push(format!(
                "Skipped mode imputation for '{}': no values",
                col_name
            ));
            return Ok(None);
        };

        let filled = fill_string_nulls(&series, &mode_val)?;
        df.replace(col_name, filled)?;

        processing_steps.push(format!(
            "Filled {} missing '{}' value(s) with mode: '{}'",
            missing, col_name, mode_val
        ));
        Ok(Some(mode_val))
    }
}
