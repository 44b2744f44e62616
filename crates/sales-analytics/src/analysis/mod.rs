//! Read-only aggregate queries over the cleaned order table.
//!
//! Every grouped result is ordered by value, descending, with ties broken by
//! ascending key so the output never depends on hash order.

use crate::types::{DailyRevenue, GroupTotal, SalesAnalysis, StatusShare, columns};
use crate::utils::{epoch_days_to_date, string_value_counts};
use anyhow::{Context, Result};
use chrono::Duration;
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::debug;

/// Add `total_sale = quantity × unit_price`.
pub fn derive_total_sale(df: DataFrame) -> PolarsResult<DataFrame> {
    df.lazy()
        .with_column(
            (col(columns::QUANTITY).cast(DataType::Float64) * col(columns::UNIT_PRICE))
                .alias(columns::TOTAL_SALE),
        )
        .collect()
}

/// Aggregate queries over a cleaned table that already has `total_sale`.
pub struct SalesAnalyzer<'a> {
    df: &'a DataFrame,
}

impl<'a> SalesAnalyzer<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        Self { df }
    }

    /// Run every query.
    pub fn analyze(&self) -> Result<SalesAnalysis> {
        let analysis = SalesAnalysis {
            total_revenue: self.total_revenue()?,
            revenue_by_category: self.revenue_by_category()?,
            units_by_product: self.units_by_product()?,
            daily_revenue: self.daily_revenue()?,
            status_distribution: self.status_distribution()?,
        };
        debug!(
            "Analysis: {} categories, {} products, {} days",
            analysis.revenue_by_category.len(),
            analysis.units_by_product.len(),
            analysis.daily_revenue.len()
        );
        Ok(analysis)
    }

    /// Sum of `total_sale`.
    pub fn total_revenue(&self) -> Result<f64> {
        let series = self.df.column(columns::TOTAL_SALE)?.as_materialized_series();
        Ok(series.f64()?.sum().unwrap_or(0.0))
    }

    /// Revenue per category.
    pub fn revenue_by_category(&self) -> Result<Vec<GroupTotal<f64>>> {
        let grouped = self.grouped_sum(columns::CATEGORY, columns::TOTAL_SALE)?;
        let keys = grouped.column(columns::CATEGORY)?.as_materialized_series().clone();
        let sums = grouped
            .column(columns::TOTAL_SALE)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        let mut totals: Vec<GroupTotal<f64>> = keys
            .str()?
            .into_iter()
            .zip(sums.f64()?)
            .filter_map(|(key, value)| {
                key.map(|k| GroupTotal {
                    key: k.to_string(),
                    value: value.unwrap_or(0.0),
                })
            })
            .collect();

        totals.sort_by(|a, b| {
            b.value
                .partial_cmp(&a.value)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.key.cmp(&b.key))
        });
        Ok(totals)
    }

    /// Units sold per product.
    pub fn units_by_product(&self) -> Result<Vec<GroupTotal<i64>>> {
        let grouped = self.grouped_sum(columns::PRODUCT, columns::QUANTITY)?;
        let keys = grouped.column(columns::PRODUCT)?.as_materialized_series().clone();
        let sums = grouped
            .column(columns::QUANTITY)?
            .as_materialized_series()
            .cast(&DataType::Int64)?;

        let mut totals: Vec<GroupTotal<i64>> = keys
            .str()?
            .into_iter()
            .zip(sums.i64()?)
            .filter_map(|(key, value)| {
                key.map(|k| GroupTotal {
                    key: k.to_string(),
                    value: value.unwrap_or(0),
                })
            })
            .collect();

        totals.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.key.cmp(&b.key)));
        Ok(totals)
    }

    /// Revenue per calendar day from the first to the last purchase date.
    ///
    /// Days without orders are reported as `0.0`. Rows without a date are
    /// not counted.
    pub fn daily_revenue(&self) -> Result<Vec<DailyRevenue>> {
        let days = self
            .df
            .column(columns::PURCHASE_DATE)?
            .as_materialized_series()
            .cast(&DataType::Int32)?;
        let sales = self.df.column(columns::TOTAL_SALE)?.as_materialized_series();

        let mut per_day: BTreeMap<i32, f64> = BTreeMap::new();
        for (day, sale) in days.i32()?.into_iter().zip(sales.f64()?) {
            if let Some(day) = day {
                *per_day.entry(day).or_insert(0.0) += sale.unwrap_or(0.0);
            }
        }

        let (Some((&first, _)), Some((&last, _))) =
            (per_day.first_key_value(), per_day.last_key_value())
        else {
            return Ok(Vec::new());
        };
        let start = epoch_days_to_date(first).context("Purchase date out of range")?;

        Ok((first..=last)
            .map(|day| DailyRevenue {
                date: start + Duration::days((day - first) as i64),
                revenue: per_day.get(&day).copied().unwrap_or(0.0),
            })
            .collect())
    }

    /// Order count and share per delivery status.
    pub fn status_distribution(&self) -> Result<Vec<StatusShare>> {
        let series = self
            .df
            .column(columns::DELIVERY_STATUS)?
            .as_materialized_series();
        let counts = string_value_counts(series);
        let total: usize = counts.values().sum();

        let mut shares: Vec<StatusShare> = counts
            .into_iter()
            .map(|(status, count)| StatusShare {
                status,
                count,
                percentage: if total > 0 {
                    count as f64 / total as f64 * 100.0
                } else {
                    0.0
                },
            })
            .collect();

        shares.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.status.cmp(&b.status)));
        Ok(shares)
    }

    fn grouped_sum(&self, key: &str, value: &str) -> PolarsResult<DataFrame> {
        self.df
            .clone()
            .lazy()
            .group_by([col(key)])
            .agg([col(value).sum()])
            .collect()
    }
}
