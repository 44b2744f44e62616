//! Data cleaning stages for the order table.
//!
//! This module provides functionality for:
//! - Loading the interchange CSV with every column as raw text
//! - Type correction (see [`TypeCorrector`])
//! - Dropping rows that miss a required field
//! - Removing duplicate rows

mod converters;
mod type_corrector;

pub use type_corrector::{CoercionReport, TypeCorrector};

use crate::error::{ResultExt, SalesError};
use anyhow::Result;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Row-level cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Read the order CSV. Every column is read as text; types are fixed later
    /// by [`TypeCorrector`].
    pub fn load_orders(path: &Path) -> std::result::Result<DataFrame, SalesError> {
        if !path.exists() {
            return Err(SalesError::InputNotFound(path.to_path_buf()));
        }

        info!("Loading dataset from {}", path.display());
        let context = || format!("Failed to read orders from {}", path.display());
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .context(context())?
            .finish()
            .context(context())?;

        debug!("Loaded {} rows x {} columns", df.height(), df.width());
        Ok(df)
    }

    /// Drop every row where any of `required` is null.
    ///
    /// Returns the filtered table and the number of rows dropped.
    pub fn drop_incomplete_rows(
        &self,
        df: DataFrame,
        required: &[&str],
    ) -> Result<(DataFrame, usize)> {
        let before = df.height();
        if required.is_empty() || before == 0 {
            return Ok((df, 0));
        }

        let mut mask = BooleanChunked::full("mask".into(), true, before);
        for name in required {
            let present = df.column(name)?.is_not_null();
            mask = &mask & &present;
        }

        let df = df.filter(&mask)?;
        let dropped = before - df.height();
        debug!("Dropped {} rows missing one of {:?}", dropped, required);
        Ok((df, dropped))
    }

    /// Remove exact duplicate rows, keeping the first occurrence in place.
    pub fn remove_duplicates(&self, df: DataFrame) -> Result<(DataFrame, usize)> {
        let before = df.height();
        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        let removed = before - df.height();
        debug!("Removed {} duplicate rows", removed);
        Ok((df, removed))
    }
}

/// Count rows that repeat an earlier row exactly.
pub fn count_duplicates(df: &DataFrame) -> Result<usize> {
    let unique = df
        .clone()
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    Ok(df.height() - unique.height())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample() -> DataFrame {
        df![
            "order_id" => [1i64, 2, 3, 1, 4],
            "customer_id" => [Some(10i64), None, Some(12), Some(10), Some(13)],
            "unit_price" => [Some(1.0), Some(2.0), None, Some(1.0), Some(4.0)],
        ]
        .unwrap()
    }

    // ========================================================================
    // load_orders() tests
    // ========================================================================

    #[test]
    fn test_load_orders_missing_file() {
        let err = DataCleaner::load_orders(Path::new("/nonexistent/orders.csv")).unwrap_err();
        assert!(err.is_missing_input());
    }

    #[test]
    fn test_load_orders_reads_everything_as_text() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "order_id,quantity,unit_price").unwrap();
        writeln!(file, "1001,2,5999.90").unwrap();
        writeln!(file, "1002,,invalid_value").unwrap();
        file.flush().unwrap();

        let df = DataCleaner::load_orders(file.path()).unwrap();
        assert_eq!(df.shape(), (2, 3));
        for col in df.get_columns() {
            assert_eq!(col.dtype(), &DataType::String);
        }
        assert_eq!(df.column("quantity").unwrap().null_count(), 1);
    }

    #[test]
    fn test_load_orders_unreadable_path_has_context() {
        let dir = tempfile::tempdir().unwrap();

        let err = DataCleaner::load_orders(dir.path()).unwrap_err();

        assert!(!err.is_missing_input());
        assert!(matches!(err, SalesError::WithContext { .. }));
        assert!(err.to_string().contains("Failed to read orders from"));
    }

    // ========================================================================
    // Row cleaning tests
    // ========================================================================

    #[test]
    fn test_drop_incomplete_rows() {
        let (df, dropped) = DataCleaner
            .drop_incomplete_rows(sample(), &["unit_price", "customer_id"])
            .unwrap();
        assert_eq!(dropped, 2);
        assert_eq!(df.height(), 3);
        assert_eq!(df.column("unit_price").unwrap().null_count(), 0);
        assert_eq!(df.column("customer_id").unwrap().null_count(), 0);
    }

    #[test]
    fn test_drop_incomplete_rows_unknown_column() {
        assert!(DataCleaner.drop_incomplete_rows(sample(), &["nope"]).is_err());
    }

    #[test]
    fn test_remove_duplicates_keeps_first_in_order() {
        let (df, removed) = DataCleaner.remove_duplicates(sample()).unwrap();
        assert_eq!(removed, 1);
        let ids: Vec<Option<i64>> = df
            .column("order_id")
            .unwrap()
            .i64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(ids, vec![Some(1), Some(2), Some(3), Some(4)]);
    }

    #[test]
    fn test_count_duplicates() {
        assert_eq!(count_duplicates(&sample()).unwrap(), 1);
        let (deduped, _) = DataCleaner.remove_duplicates(sample()).unwrap();
        assert_eq!(count_duplicates(&deduped).unwrap(), 0);
    }
}
