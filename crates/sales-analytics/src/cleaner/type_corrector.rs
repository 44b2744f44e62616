//! Type correction for the raw order columns.

use super::converters::{to_date, to_decimal, to_integer, to_text};
use crate::error::{Result, SalesError};
use crate::types::{ColumnKind, ColumnSummary};
use polars::prelude::*;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Result of coercing every column of a table.
#[derive(Debug, Clone, Default)]
pub struct CoercionReport {
    /// Non-null values that could not be parsed and became null, per column.
    pub coerced_to_null: HashMap<String, usize>,
    pub column_summaries: Vec<ColumnSummary>,
    pub steps: Vec<String>,
}

impl CoercionReport {
    pub fn total_coerced(&self) -> usize {
        self.coerced_to_null.values().sum()
    }
}

/// Converts each column of the order table to the type its name implies.
///
/// Values that cannot be parsed become null. Running it on an already
/// corrected table changes nothing.
pub struct TypeCorrector;

impl TypeCorrector {
    /// Coerce every column according to [`ColumnKind::of`].
    pub fn coerce_order_types(&self, df: DataFrame) -> Result<(DataFrame, CoercionReport)> {
        let mut df = df;
        let mut report = CoercionReport::default();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        for name in names {
            let kind = ColumnKind::of(&name);
            let series = df.column(&name)?.as_materialized_series().clone();

            let original_type = series.dtype().to_string();
            let nulls_before = series.null_count();

            let converted =
                Self::convert(&series, kind).map_err(|e| SalesError::CoercionFailed {
                    column: name.clone(),
                    target_type: kind.to_string(),
                    reason: format!("{:#}", e),
                })?;
            let nulls_after = converted.null_count();
            let coerced = nulls_after.saturating_sub(nulls_before);

            if coerced > 0 {
                warn!(
                    "Column '{}': {} value(s) could not be read as {} and became null",
                    name, coerced, kind
                );
                report.steps.push(format!(
                    "Coerced '{}' to {}: {} invalid value(s) set to null",
                    name, kind, coerced
                ));
            } else if series.dtype() != converted.dtype() {
                debug!("Column '{}': {} -> {}", name, original_type, converted.dtype());
                report
                    .steps
                    .push(format!("Coerced '{}' to {}", name, kind));
            }

            report.coerced_to_null.insert(name.clone(), coerced);
            report.column_summaries.push(ColumnSummary {
                name: name.clone(),
                original_type,
                final_type: converted.dtype().to_string(),
                missing_before: nulls_before,
                missing_after: nulls_after,
                imputation_method: None,
                values_coerced: coerced,
            });

            df.replace(&name, converted)?;
        }

        Ok((df, report))
    }

    fn convert(series: &Series, kind: ColumnKind) -> anyhow::Result<Series> {
        match kind {
            ColumnKind::Integer => to_integer(series),
            ColumnKind::Decimal => to_decimal(series),
            ColumnKind::Date => to_date(series),
            ColumnKind::Text => to_text(series),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
