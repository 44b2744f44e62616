//! Synthetic order generator.
//!
//! Draws a reproducible table of orders from a seeded [`StdRng`], corrupts it
//! with the fixed set of defects in [`defects`], and writes it as CSV.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_analytics::{GeneratorConfig, SalesGenerator};
//!
//! let generator = SalesGenerator::new(GeneratorConfig::default());
//! let mut orders = generator.generate()?;
//! generator.write_csv(&mut orders)?;
//! ```

pub mod defects;

use crate::config::GeneratorConfig;
use crate::types::{DeliveryStatus, PRODUCT_CATALOGUE, columns};
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use polars::prelude::*;
use rand::distributions::WeightedIndex;
use rand::prelude::*;
use std::fs::{self, File};
use std::io::Write;
use tracing::{debug, info};

pub use defects::DefectPlan;

/// Raw order columns before they become a DataFrame.
///
/// Numeric fields the file stores as text are already text here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawOrders {
    pub order_id: Vec<i64>,
    pub purchase_date: Vec<String>,
    pub customer_id: Vec<String>,
    pub product: Vec<String>,
    pub category: Vec<String>,
    pub quantity: Vec<Option<i64>>,
    pub unit_price: Vec<String>,
    pub delivery_status: Vec<Option<String>>,
}

impl RawOrders {
    pub fn len(&self) -> usize {
        self.order_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order_id.is_empty()
    }

    /// Build the DataFrame in the fixed column order.
    pub fn into_dataframe(self) -> PolarsResult<DataFrame> {
        df!(
            columns::ORDER_ID => self.order_id,
            columns::PURCHASE_DATE => self.purchase_date,
            columns::CUSTOMER_ID => self.customer_id,
            columns::PRODUCT => self.product,
            columns::CATEGORY => self.category,
            columns::QUANTITY => self.quantity,
            columns::UNIT_PRICE => self.unit_price,
            columns::DELIVERY_STATUS => self.delivery_status,
        )
    }
}

/// Generates the synthetic sales dataset.
pub struct SalesGenerator {
    config: GeneratorConfig,
}

impl SalesGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Synthesize the clean orders, in order id order.
    pub fn synthesize(&self) -> Result<RawOrders> {
        let config = &self.config;
        let mut rng = StdRng::seed_from_u64(config.seed);
        let n = config.rows;

        // Columns are drawn one block at a time. The draw order is part of the
        // output: reordering these lines changes every generated file.
        let backdates: Vec<i64> = (0..n)
            .map(|_| rng.gen_range(0..config.max_backdate_days))
            .collect();
        let customers: Vec<i64> = (0..n).map(|_| rng.gen_range(100..150)).collect();
        let products: Vec<usize> = (0..n)
            .map(|_| rng.gen_range(0..PRODUCT_CATALOGUE.len()))
            .collect();
        let quantities: Vec<i64> = (0..n).map(|_| rng.gen_range(1..5)).collect();

        let weights = DeliveryStatus::WEIGHTED.map(|(_, w)| w);
        let status_dist =
            WeightedIndex::new(weights).context("Invalid delivery status weights")?;
        let statuses: Vec<DeliveryStatus> = (0..n)
            .map(|_| DeliveryStatus::WEIGHTED[status_dist.sample(&mut rng)].0)
            .collect();

        let mut orders = RawOrders::default();
        for i in 0..n {
            let product = &PRODUCT_CATALOGUE[products[i]];
            let date = purchase_date(config.start_date, i, backdates[i])?;

            orders.order_id.push(config.first_order_id + i as i64);
            orders.purchase_date.push(date.format("%Y-%m-%d").to_string());
            orders.customer_id.push(customers[i].to_string());
            orders.product.push(product.name.to_string());
            orders.category.push(product.category.to_string());
            orders.quantity.push(Some(quantities[i]));
            orders.unit_price.push(format_price(product.unit_price));
            orders
                .delivery_status
                .push(Some(statuses[i].as_str().to_string()));
        }

        debug!("Synthesized {} orders with seed {}", n, config.seed);
        Ok(orders)
    }

    /// Synthesize the orders and, if configured, corrupt them.
    pub fn generate(&self) -> Result<DataFrame> {
        info!("Generating synthetic sales dataset...");
        let mut orders = self.synthesize()?;

        let plan = DefectPlan::standard();
        if self.config.inject_defects {
            plan.apply_in_place(&mut orders);
        }

        let mut df = orders.into_dataframe()?;

        if self.config.inject_defects {
            df = plan.append_duplicates(df)?;
        }

        info!("Dataset generated: {:?}", df.shape());
        Ok(df)
    }

    /// Serialize the table as CSV into any writer.
    pub fn write_csv_to<W: Write>(df: &mut DataFrame, writer: W) -> Result<()> {
        CsvWriter::new(writer)
            .include_header(true)
            .with_separator(b',')
            .with_quote_char(b'"')
            .finish(df)?;
        Ok(())
    }

    /// Serialize the table as CSV bytes.
    pub fn to_csv_bytes(df: &mut DataFrame) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        Self::write_csv_to(df, &mut buffer)?;
        Ok(buffer)
    }

    /// Write the table to the configured output path.
    pub fn write_csv(&self, df: &mut DataFrame) -> Result<()> {
        let path = &self.config.output_path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let file =
            File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        Self::write_csv_to(df, file)?;

        info!("Dataset saved: {}", path.display());
        Ok(())
    }
}

/// `start + index days - backdate days`.
fn purchase_date(start: NaiveDate, index: usize, backdate: i64) -> Result<NaiveDate> {
    let offset = Duration::days(index as i64 - backdate);
    start
        .checked_add_signed(offset)
        .with_context(|| format!("Purchase date out of range for row {}", index))
}

/// Prices go into the file as text with two decimals.
fn format_price(price: f64) -> String {
    format!("{:.2}", price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::parse_date_string;

    fn generator(rows: usize, inject: bool) -> SalesGenerator {
        SalesGenerator::new(
            GeneratorConfig::builder()
                .rows(rows)
                .inject_defects(inject)
                .build()
                .unwrap(),
        )
    }

    // ========================================================================
    // synthesize() tests
    // ========================================================================

    #[test]
    fn test_synthesize_row_count_and_ids() {
        let orders = generator(100, true).synthesize().unwrap();
        assert_eq!(orders.len(), 100);
        assert_eq!(orders.order_id[0], 1001);
        assert_eq!(orders.order_id[99], 1100);
    }

    #[test]
    fn test_synthesize_value_ranges() {
        let orders = generator(100, true).synthesize().unwrap();

        for q in orders.quantity.iter().flatten() {
            assert!((1..5).contains(q));
        }
        for c in &orders.customer_id {
            let id: i64 = c.parse().unwrap();
            assert!((100..150).contains(&id));
        }
        for s in orders.delivery_status.iter().flatten() {
            assert!(["Delivered", "Pending", "Cancelled"].contains(&s.as_str()));
        }
    }

    #[test]
    fn test_synthesize_products_are_coherent() {
        let orders = generator(100, true).synthesize().unwrap();

        for i in 0..orders.len() {
            let product = PRODUCT_CATALOGUE
                .iter()
                .find(|p| p.name == orders.product[i])
                .unwrap();
            assert_eq!(orders.category[i], product.category);
            assert_eq!(orders.unit_price[i], format_price(product.unit_price));
        }
    }

    #[test]
    fn test_synthesize_dates_within_backdate_window() {
        let config = GeneratorConfig::default();
        let orders = generator(100, true).synthesize().unwrap();

        for (i, raw) in orders.purchase_date.iter().enumerate() {
            let date = parse_date_string(raw).unwrap();
            let nominal = config.start_date + Duration::days(i as i64);
            let lag = (nominal - date).num_days();
            assert!((0..30).contains(&lag), "row {} lag {}", i, lag);
        }
    }

    #[test]
    fn test_synthesize_is_deterministic() {
        let a = generator(100, true).synthesize().unwrap();
        let b = generator(100, true).synthesize().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_different_seed_changes_output() {
        let a = generator(100, true).synthesize().unwrap();
        let b = SalesGenerator::new(GeneratorConfig::builder().seed(7).build().unwrap())
            .synthesize()
            .unwrap();
        assert_ne!(a, b);
    }

    // ========================================================================
    // generate() tests
    // ========================================================================

    #[test]
    fn test_generate_with_defects_shape() {
        let df = generator(100, true).generate().unwrap();
        // 100 orders plus 3 appended duplicates
        assert_eq!(df.shape(), (103, 8));
    }

    #[test]
    fn test_generate_without_defects_is_clean() {
        let df = generator(100, false).generate().unwrap();
        assert_eq!(df.height(), 100);
        let nulls: usize = df.get_columns().iter().map(|c| c.null_count()).sum();
        assert_eq!(nulls, 0);
    }

    #[test]
    fn test_generate_column_order() {
        let df = generator(10, false).generate().unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(names, columns::ORDER_COLUMNS.to_vec());
    }

    #[test]
    fn test_csv_bytes_identical_across_runs() {
        let mut a = generator(100, true).generate().unwrap();
        let mut b = generator(100, true).generate().unwrap();
        let bytes_a = SalesGenerator::to_csv_bytes(&mut a).unwrap();
        let bytes_b = SalesGenerator::to_csv_bytes(&mut b).unwrap();
        assert_eq!(bytes_a, bytes_b);
    }

    #[test]
    fn test_csv_header() {
        let mut df = generator(5, false).generate().unwrap();
        let bytes = SalesGenerator::to_csv_bytes(&mut df).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with(
            "order_id,purchase_date,customer_id,product,category,quantity,unit_price,delivery_status\n"
        ));
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(5999.9), "5999.90");
        assert_eq!(format_price(850.0), "850.00");
    }
}
