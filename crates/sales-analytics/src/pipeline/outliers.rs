//! Outlier handling module.
//!
//! Removes rows whose value in a numeric column lies beyond
//! `mean ± sigma · std`.

use anyhow::Result;
use polars::prelude::*;
use tracing::{debug, warn};

/// Upper bound on filter passes.
const MAX_PASSES: usize = 64;

/// Outcome of a sigma filter.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierRemoval {
    pub rows_removed: usize,
    /// `(lower, upper)` bounds of the final pass. `None` when the column had
    /// fewer than two values and no bounds could be computed.
    pub bounds: Option<(f64, f64)>,
    pub passes: usize,
    /// `false` when the pass limit was reached while rows were still being
    /// removed. The kept values may then lie outside the final bounds.
    pub converged: bool,
}

/// Handles outlier detection and treatment.
pub struct OutlierHandler;

impl OutlierHandler {
    /// Drop rows whose `col_name` lies outside `mean ± sigma · std`.
    ///
    /// The filter is repeated on the surviving rows until a pass removes
    /// nothing, so every kept value is within bounds of the kept
    /// distribution. Nulls are never treated as outliers.
    pub fn remove_sigma_outliers(
        df: &mut DataFrame,
        col_name: &str,
        sigma: f64,
        ddof: u8,
        processing_steps: &mut Vec<String>,
    ) -> Result<OutlierRemoval> {
        Self::filter_until_stable(df, col_name, sigma, ddof, MAX_PASSES, processing_steps)
    }

    fn filter_until_stable(
        df: &mut DataFrame,
        col_name: &str,
        sigma: f64,
        ddof: u8,
        max_passes: usize,
        processing_steps: &mut Vec<String>,
    ) -> Result<OutlierRemoval> {
        let original_rows = df.height();
        let mut bounds = None;
        let mut passes = 0;
        let mut converged = true;

        while passes < max_passes {
            let Some((lower, upper)) = Self::sigma_bounds(df, col_name, sigma, ddof)? else {
                break;
            };
            bounds = Some((lower, upper));
            passes += 1;

            let mask = Self::within_bounds_mask(df, col_name, lower, upper)?;
            let before = df.height();
            *df = df.filter(&mask)?;
            let removed = before - df.height();

            debug!(
                "Outlier pass {} on '{}': bounds [{:.3}, {:.3}], removed {}",
                passes, col_name, lower, upper, removed
            );
            if removed == 0 {
                break;
            }
            converged = passes < max_passes;
        }

        if !converged {
            warn!(
                "Outlier filter on '{}' stopped after {} passes while still removing rows",
                col_name, passes
            );
        }

        let rows_removed = original_rows - df.height();
        match bounds {
            Some((lower, upper)) if rows_removed > 0 => processing_steps.push(format!(
                "Removed {} outlier row(s) from '{}' outside [{:.2}, {:.2}]",
                rows_removed, col_name, lower, upper
            )),
            Some(_) => processing_steps.push(format!("No outliers found in '{}'", col_name)),
            None => processing_steps.push(format!(
                "Skipped outlier filter on '{}': not enough values",
                col_name
            )),
        }

        Ok(OutlierRemoval {
            rows_removed,
            bounds,
            passes,
            converged,
        })
    }

    /// `mean ± sigma · std` of the non-null values, if defined.
    pub fn sigma_bounds(
        df: &DataFrame,
        col_name: &str,
        sigma: f64,
        ddof: u8,
    ) -> Result<Option<(f64, f64)>> {
        let as_f64 = df
            .column(col_name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let ca = as_f64.f64()?;

        let (Some(mean), Some(std)) = (ca.mean(), ca.std(ddof)) else {
            return Ok(None);
        };
        if !mean.is_finite() || !std.is_finite() {
            return Ok(None);
        }
        Ok(Some((mean - sigma * std, mean + sigma * std)))
    }

    fn within_bounds_mask(
        df: &DataFrame,
        col_name: &str,
        lower: f64,
        upper: f64,
    ) -> Result<BooleanChunked> {
        let as_f64 = df
            .column(col_name)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;
        let keep: Vec<bool> = as_f64
            .f64()?
            .into_iter()
            .map(|opt| opt.is_none_or(|v| v >= lower && v <= upper))
            .collect();
        Ok(BooleanChunked::from_slice("mask".into(), &keep))
    }
}
