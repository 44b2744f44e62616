//! Data profiling module for dataset inspection.
//!
//! This module provides functionality for profiling datasets, including:
//! - Shape and column types
//! - Null counts per column
//! - Duplicate row detection
//! - Numeric, categorical and date descriptions
//!
//! [`DataProfiler::profile_raw_orders`] inspects a freshly loaded order table
//! through its typed view, so missing markers count as nulls and numeric
//! columns get a numeric description before any row is cleaned.

mod statistics;

use crate::cleaner::{TypeCorrector, count_duplicates};
use crate::types::{ColumnProfile, DatasetProfile};
use crate::utils::{is_numeric_dtype, is_string_dtype};
use anyhow::Result;
use polars::prelude::*;
use tracing::debug;

pub(crate) use statistics::{describe_categorical, describe_date, describe_numeric};

/// Data profiler for inspecting dataset structure.
pub struct DataProfiler;

impl DataProfiler {
    /// Profile an entire dataset.
    pub fn profile_dataset(df: &DataFrame) -> Result<DatasetProfile> {
        let mut column_profiles = Vec::with_capacity(df.width());

        for col_name in df.get_column_names() {
            column_profiles.push(Self::profile_column(df, col_name)?);
        }

        let duplicate_count = count_duplicates(df)?;
        let duplicate_percentage = if df.height() > 0 {
            (duplicate_count as f64 / df.height() as f64) * 100.0
        } else {
            0.0
        };

        debug!(
            "Profiled {} rows x {} columns, {} duplicate rows",
            df.height(),
            df.width(),
            duplicate_count
        );

        Ok(DatasetProfile {
            shape: (df.height(), df.width()),
            column_profiles,
            duplicate_count,
            duplicate_percentage,
        })
    }

    /// Profile a raw order table as it will look once its columns are typed.
    ///
    /// Rows are neither dropped nor filled. Each column profile keeps the
    /// type it was read with in `source_dtype`.
    pub fn profile_raw_orders(raw: &DataFrame) -> Result<DatasetProfile> {
        let (typed, _) = TypeCorrector.coerce_order_types(raw.clone())?;
        let mut profile = Self::profile_dataset(&typed)?;

        for col in profile.column_profiles.iter_mut() {
            col.source_dtype = raw.column(&col.name).ok().map(|c| c.dtype().to_string());
        }
        Ok(profile)
    }

    fn profile_column(df: &DataFrame, col_name: &str) -> Result<ColumnProfile> {
        let series = df.column(col_name)?.as_materialized_series();
        let null_count = series.null_count();
        let null_percentage = if df.height() > 0 {
            (null_count as f64 / df.height() as f64) * 100.0
        } else {
            0.0
        };

        let (mut numeric, mut categorical, mut date) = (None, None, None);
        if is_numeric_dtype(series.dtype()) {
            numeric = Some(describe_numeric(series)?);
        } else if is_string_dtype(series.dtype()) {
            categorical = Some(describe_categorical(series)?);
        } else if series.dtype() == &DataType::Date {
            date = Some(describe_date(series)?);
        }

        Ok(ColumnProfile {
            name: col_name.to_string(),
            dtype: series.dtype().to_string(),
            source_dtype: None,
            null_count,
            null_percentage,
            numeric,
            categorical,
            date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_dataset() {
        let df = df![
            "quantity" => [Some(1i64), None, Some(3), Some(2)],
            "status" => [Some("a"), Some("b"), None, Some("a")],
        ]
        .unwrap();

        let profile = DataProfiler::profile_dataset(&df).unwrap();

        assert_eq!(profile.shape, (4, 2));
        assert_eq!(profile.total_nulls(), 2);
        assert_eq!(profile.duplicate_count, 0);

        let quantity = profile.column("quantity").unwrap();
        assert_eq!(quantity.null_count, 1);
        assert!((quantity.null_percentage - 25.0).abs() < 1e-9);
        assert!(quantity.numeric.is_some());
        assert!(quantity.categorical.is_none());

        let status = profile.column("status").unwrap();
        assert_eq!(status.dtype, "str");
        assert_eq!(status.categorical.as_ref().unwrap().top.as_deref(), Some("a"));
    }

    #[test]
    fn test_profile_dataset_duplicates() {
        let df = df![
            "a" => [1i64, 1, 2],
            "b" => ["x", "x", "y"],
        ]
        .unwrap();
        let profile = DataProfiler::profile_dataset(&df).unwrap();
        assert_eq!(profile.duplicate_count, 1);
    }

    #[test]
    fn test_profile_empty_dataset() {
        let df = df!["a" => Vec::<i64>::new()].unwrap();
        let profile = DataProfiler::profile_dataset(&df).unwrap();
        assert_eq!(profile.shape, (0, 1));
        assert_eq!(profile.duplicate_percentage, 0.0);
    }

    #[test]
    fn test_profile_date_column() {
        let df = df!["purchase_date" => [Some("2026-07-03"), None, Some("2026-06-20")]]
            .unwrap();
        let (typed, _) = TypeCorrector.coerce_order_types(df).unwrap();

        let profile = DataProfiler::profile_dataset(&typed).unwrap();

        let date = profile.column("purchase_date").unwrap().date.clone().unwrap();
        assert_eq!(date.count, 2);
        assert_eq!(date.min, chrono::NaiveDate::from_ymd_opt(2026, 6, 20));
        assert_eq!(date.max, chrono::NaiveDate::from_ymd_opt(2026, 7, 3));
    }

    // ========================================================================
    // profile_raw_orders() tests
    // ========================================================================

    fn raw_orders() -> DataFrame {
        df![
            "order_id" => ["1001", "1002", "1003", "1001"],
            "customer_id" => ["120", "nan", "131", "120"],
            "quantity" => [Some("2"), None, Some("50"), Some("2")],
            "unit_price" => ["850.00", "invalid_value", "799.50", "850.00"],
            "delivery_status" => [Some("Delivered"), Some("Pending"), None, Some("Delivered")],
        ]
        .unwrap()
    }

    #[test]
    fn test_profile_raw_orders_exposes_defects() {
        let profile = DataProfiler::profile_raw_orders(&raw_orders()).unwrap();

        let quantity = profile.column("quantity").unwrap();
        assert_eq!(quantity.dtype, "i64");
        assert_eq!(quantity.source_dtype.as_deref(), Some("str"));
        assert_eq!(quantity.null_count, 1);
        assert_eq!(quantity.numeric.as_ref().unwrap().max, Some(50.0));

        assert_eq!(profile.column("customer_id").unwrap().null_count, 1);
        assert_eq!(profile.column("unit_price").unwrap().null_count, 1);
        assert_eq!(profile.column("delivery_status").unwrap().null_count, 1);
        assert_eq!(profile.duplicate_count, 1);
        assert_eq!(profile.shape, (4, 5));
    }

    #[test]
    fn test_profile_raw_orders_leaves_input_untouched() {
        let raw = raw_orders();
        DataProfiler::profile_raw_orders(&raw).unwrap();
        assert_eq!(raw.column("quantity").unwrap().dtype(), &DataType::String);
        assert!(raw.equals_missing(&raw_orders()));
    }
}
