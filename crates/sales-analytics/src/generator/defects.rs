//! Data-quality defects injected into the synthetic orders.
//!
//! The defect positions are fixed so every run produces the same dirty file.
//! Indexes refer to row positions before the duplicates are appended.

use super::RawOrders;
use polars::prelude::*;
use std::ops::RangeInclusive;
use tracing::debug;

/// Token written in place of a missing customer id.
pub const MISSING_CUSTOMER_TOKEN: &str = "nan";
/// Malformed price text.
pub const INVALID_PRICE_TOKEN: &str = "invalid_value";

/// Where each defect goes.
#[derive(Debug, Clone, PartialEq)]
pub struct DefectPlan {
    pub missing_quantity_rows: RangeInclusive<usize>,
    pub missing_status_rows: RangeInclusive<usize>,
    pub missing_customer_rows: Vec<usize>,
    pub invalid_price_rows: Vec<usize>,
    /// `(row, quantity)` pairs.
    pub outliers: Vec<(usize, i64)>,
    /// The first `n` rows are appended again.
    pub duplicated_head_rows: usize,
}

impl DefectPlan {
    /// The defect set every generated file carries.
    pub fn standard() -> Self {
        Self {
            missing_quantity_rows: 5..=10,
            missing_status_rows: 20..=22,
            missing_customer_rows: vec![30],
            invalid_price_rows: vec![15],
            outliers: vec![(50, 50)],
            duplicated_head_rows: 3,
        }
    }

    /// Apply every per-cell defect. Positions past the end are skipped.
    pub fn apply_in_place(&self, orders: &mut RawOrders) {
        let n = orders.len();

        for i in self.missing_quantity_rows.clone().filter(|&i| i < n) {
            orders.quantity[i] = None;
        }
        for i in self.missing_status_rows.clone().filter(|&i| i < n) {
            orders.delivery_status[i] = None;
        }
        for &i in self.missing_customer_rows.iter().filter(|&&i| i < n) {
            orders.customer_id[i] = MISSING_CUSTOMER_TOKEN.to_string();
        }
        for &i in self.invalid_price_rows.iter().filter(|&&i| i < n) {
            orders.unit_price[i] = INVALID_PRICE_TOKEN.to_string();
        }
        for &(i, quantity) in self.outliers.iter().filter(|(i, _)| *i < n) {
            orders.quantity[i] = Some(quantity);
        }

        debug!("Injected cell defects into {} rows", n);
    }

    /// Append a copy of the first rows to the end of the table.
    pub fn append_duplicates(&self, mut df: DataFrame) -> PolarsResult<DataFrame> {
        if self.duplicated_head_rows == 0 {
            return Ok(df);
        }
        let head = df.head(Some(self.duplicated_head_rows));
        df.vstack_mut(&head)?;
        debug!("Appended {} duplicate rows", head.height());
        Ok(df)
    }
}
