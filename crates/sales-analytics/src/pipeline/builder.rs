//! Main cleaning pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! orchestrating the cleaning of the order table.

use crate::analysis::derive_total_sale;
use crate::cleaner::{DataCleaner, TypeCorrector};
use crate::config::CleaningConfig;
use crate::error::{Result, SalesError};
use crate::imputers::StatisticalImputer;
use crate::pipeline::outliers::OutlierHandler;
use crate::pipeline::stage::PipelineStage;
use crate::types::{CleaningSummary, columns};
use polars::prelude::*;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// Raw and cleaned tables plus what happened in between.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    /// The table exactly as it was read.
    pub raw: DataFrame,
    /// The cleaned table, with `total_sale`.
    pub cleaned: DataFrame,
    pub summary: CleaningSummary,
}

/// The cleaning pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use sales_analytics::{CleaningConfig, Pipeline};
///
/// let pipeline = Pipeline::builder()
///     .config(CleaningConfig::default())
///     .build()?;
/// let raw = pipeline.load()?;
/// let result = pipeline.process(raw)?;
/// println!("{}", result.cleaned.head(Some(5)));
/// ```
pub struct Pipeline {
    config: CleaningConfig,
    cleaner: DataCleaner,
    type_corrector: TypeCorrector,
}

static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &CleaningConfig {
        &self.config
    }

    /// Read the configured input CSV.
    ///
    /// # Errors
    ///
    /// Returns [`SalesError::InputNotFound`] if the file does not exist.
    pub fn load(&self) -> Result<DataFrame> {
        info!("{}...", PipelineStage::Loading);
        DataCleaner::load_orders(&self.config.input_path)
    }

    /// Clean a raw order table.
    ///
    /// The input is left untouched and returned as [`PipelineResult::raw`].
    pub fn process(&self, df: DataFrame) -> Result<PipelineResult> {
        match self.process_internal(df) {
            Ok(result) => Ok(result),
            Err(e) => {
                error!("Pipeline error: {}", e);
                Err(e)
            }
        }
    }

    fn process_internal(&self, raw: DataFrame) -> Result<PipelineResult> {
        let start_time = Instant::now();
        info!("Starting cleaning pipeline...");

        Self::check_schema(&raw)?;

        let mut summary = CleaningSummary::new();
        summary.rows_before = raw.height();

        // Step 1: Type correction
        info!("Step 1: {}...", PipelineStage::TypeCorrection);
        let (mut df, coercion) = self
            .type_corrector
            .coerce_order_types(raw.clone())?;
        summary.coerced_to_null = coercion.coerced_to_null;
        summary.column_summaries = coercion.column_summaries;
        summary.steps.extend(coercion.steps);

        // Step 2: Imputation
        info!("Step 2: {}...", PipelineStage::Imputation);
        let quantity_fill = StatisticalImputer::apply_integer_median(
            &mut df,
            columns::QUANTITY,
            &mut summary.steps,
        )
        .map_err(|e| SalesError::ImputationFailed {
            column: columns::QUANTITY.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(fill) = quantity_fill {
            Self::mark_imputed(&mut summary, columns::QUANTITY, format!("median ({})", fill));
        }

        let status_fill = StatisticalImputer::apply_mode_imputation(
            &mut df,
            columns::DELIVERY_STATUS,
            &mut summary.steps,
        )
        .map_err(|e| SalesError::ImputationFailed {
            column: columns::DELIVERY_STATUS.to_string(),
            reason: e.to_string(),
        })?;
        if let Some(fill) = status_fill {
            Self::mark_imputed(
                &mut summary,
                columns::DELIVERY_STATUS,
                format!("mode ({})", fill),
            );
        }

        // Step 3: Rows that cannot be repaired
        info!("Step 3: {}...", PipelineStage::MissingKeys);
        let (mut df, dropped) = self
            .cleaner
            .drop_incomplete_rows(df, &[columns::UNIT_PRICE, columns::CUSTOMER_ID])
            .map_err(|e| SalesError::CleaningFailed(e.to_string()))?;
        summary.rows_dropped_missing = dropped;
        summary.push_step(format!(
            "Dropped {} row(s) missing '{}' or '{}'",
            dropped,
            columns::UNIT_PRICE,
            columns::CUSTOMER_ID
        ));

        // Step 4: Deduplication
        if self.config.remove_duplicates {
            info!("Step 4: {}...", PipelineStage::Deduplication);
            let (deduped, removed) = self
                .cleaner
                .remove_duplicates(df)
                .map_err(|e| SalesError::CleaningFailed(e.to_string()))?;
            df = deduped;
            summary.duplicates_removed = removed;
            summary.push_step(if removed > 0 {
                format!("Removed {} duplicate row(s)", removed)
            } else {
                "No duplicate rows found".to_string()
            });
        } else {
            info!("Step 4: Skipping deduplication (disabled)");
        }

        // Step 5: Outliers
        if self.config.remove_outliers {
            info!("Step 5: {}...", PipelineStage::OutlierFiltering);
            let removal = OutlierHandler::remove_sigma_outliers(
                &mut df,
                columns::QUANTITY,
                self.config.outlier_sigma,
                self.config.std_ddof,
                &mut summary.steps,
            )
            .map_err(|e| SalesError::CleaningFailed(e.to_string()))?;
            summary.outliers_removed = removal.rows_removed;
            summary.outlier_bounds = removal.bounds;
            if !removal.converged {
                summary.warnings.push(format!(
                    "Outlier filter on '{}' hit its pass limit; some values may lie outside the final bounds",
                    columns::QUANTITY
                ));
            }
        } else {
            info!("Step 5: Skipping outlier filtering (disabled)");
        }

        // Step 6: Revenue
        info!("Step 6: {}...", PipelineStage::Derivation);
        let df = derive_total_sale(df).map_err(|e| SalesError::CleaningFailed(e.to_string()))?;
        summary.push_step(format!(
            "Derived '{}' = {} x {}",
            columns::TOTAL_SALE,
            columns::QUANTITY,
            columns::UNIT_PRICE
        ));

        if df.height() == 0 {
            warn!("Every row was removed during cleaning");
            summary
                .warnings
                .push("Every row was removed during cleaning".to_string());
        }

        Self::finalize_column_summaries(&mut summary, &df);
        summary.rows_after = df.height();
        summary.duration_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Cleaning complete: {} -> {} rows in {}ms",
            summary.rows_before, summary.rows_after, summary.duration_ms
        );
        for step in &summary.steps {
            debug!("  {}", step);
        }

        Ok(PipelineResult {
            raw,
            cleaned: df,
            summary,
        })
    }

    /// Every order column must be present before anything else runs.
    fn check_schema(df: &DataFrame) -> Result<()> {
        for name in columns::ORDER_COLUMNS {
            if df.column(name).is_err() {
                return Err(SalesError::ColumnNotFound(name.to_string()));
            }
        }
        Ok(())
    }

    fn mark_imputed(summary: &mut CleaningSummary, column: &str, method: String) {
        if let Some(col) = summary
            .column_summaries
            .iter_mut()
            .find(|c| c.name == column)
        {
            col.imputation_method = Some(method);
        }
    }

    fn finalize_column_summaries(summary: &mut CleaningSummary, df: &DataFrame) {
        for col in summary.column_summaries.iter_mut() {
            if let Ok(column) = df.column(&col.name) {
                col.missing_after = column.null_count();
                col.final_type = column.dtype().to_string();
            }
        }
    }
}

/// Builder for creating a [`Pipeline`] with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::builder()
///     .config(CleaningConfig::builder().remove_outliers(false).build()?)
///     .build()?;
/// ```
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<CleaningConfig>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    /// Set the pipeline configuration.
    pub fn config(mut self, config: CleaningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the pipeline.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Pipeline, crate::config::ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            config,
            cleaner: DataCleaner,
            type_corrector: TypeCorrector,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaner::count_duplicates;

    fn raw_orders() -> DataFrame {
        df![
            "order_id" => ["1001", "1002", "1003", "1004", "1005", "1001"],
            "purchase_date" => ["2026-06-10", "2026-06-11", "2026-06-11", "2026-06-12", "2026-06-14", "2026-06-10"],
            "customer_id" => ["120", "nan", "131", "140", "101", "120"],
            "product" => ["Notebook", "Smartphone", "Headphones", "Notebook", "Smartwatch", "Notebook"],
            "category" => ["Electronics", "Electronics", "Accessories", "Electronics", "Accessories", "Electronics"],
            "quantity" => [Some("2"), Some("1"), None, Some("3"), Some("1"), Some("2")],
            "unit_price" => ["8500.00", "5999.90", "799.50", "invalid_value", "2100.00", "8500.00"],
            "delivery_status" => [Some("Delivered"), Some("Pending"), Some("Delivered"), None, None, Some("Delivered")],
        ]
        .unwrap()
    }

    // ========================================================================
    // Builder tests
    // ========================================================================

    #[test]
    fn test_pipeline_builder_default() {
        let pipeline = Pipeline::builder().build().unwrap();
        assert_eq!(pipeline.config().outlier_sigma, 3.0);
        assert!(pipeline.config().remove_duplicates);
    }

    #[test]
    fn test_pipeline_builder_rejects_invalid_config() {
        let mut config = CleaningConfig::default();
        config.outlier_sigma = 0.0;
        assert!(Pipeline::builder().config(config).build().is_err());
    }

    // ========================================================================
    // process() tests
    // ========================================================================

    #[test]
    fn test_process_cleans_small_table() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(raw_orders()).unwrap();
        let df = &result.cleaned;

        // 1002 has no customer, 1004 has no price, the last row repeats 1001
        assert_eq!(df.height(), 3);
        assert_eq!(result.summary.rows_dropped_missing, 2);
        assert_eq!(result.summary.duplicates_removed, 1);
        assert_eq!(result.summary.rows_before, 6);
        assert_eq!(result.summary.rows_after, 3);

        for name in columns::ORDER_COLUMNS {
            assert_eq!(df.column(name).unwrap().null_count(), 0, "{}", name);
        }
        assert_eq!(count_duplicates(df).unwrap(), 0);
        assert!(df.column(columns::TOTAL_SALE).is_ok());
        assert!(result.summary.warnings.is_empty());
    }

    #[test]
    fn test_process_leaves_raw_untouched() {
        let raw = raw_orders();
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(raw.clone()).unwrap();

        assert!(result.raw.equals_missing(&raw));
        assert_eq!(
            result.raw.column("unit_price").unwrap().dtype(),
            &DataType::String
        );
    }

    #[test]
    fn test_process_records_imputation() {
        let pipeline = Pipeline::builder().build().unwrap();
        let result = pipeline.process(raw_orders()).unwrap();

        let quantity = result
            .summary
            .column_summaries
            .iter()
            .find(|c| c.name == "quantity")
            .unwrap();
        assert_eq!(quantity.missing_before, 1);
        assert_eq!(quantity.missing_after, 0);
        // median of [2, 1, 3, 1, 2] is 2
        assert_eq!(quantity.imputation_method.as_deref(), Some("median (2)"));

        let status = result
            .summary
            .column_summaries
            .iter()
            .find(|c| c.name == "delivery_status")
            .unwrap();
        assert_eq!(status.imputation_method.as_deref(), Some("mode (Delivered)"));
    }

    #[test]
    fn test_process_missing_column() {
        let df = raw_orders().drop("unit_price").unwrap();
        let err = Pipeline::builder().build().unwrap().process(df).unwrap_err();
        assert_eq!(err.error_code(), "COLUMN_NOT_FOUND");
    }

    #[test]
    fn test_process_with_steps_disabled() {
        let config = CleaningConfig::builder()
            .remove_duplicates(false)
            .remove_outliers(false)
            .build()
            .unwrap();
        let result = Pipeline::builder()
            .config(config)
            .build()
            .unwrap()
            .process(raw_orders())
            .unwrap();

        assert_eq!(result.cleaned.height(), 4);
        assert_eq!(result.summary.duplicates_removed, 0);
        assert_eq!(result.summary.outlier_bounds, None);
    }

    #[test]
    fn test_process_twice_is_noop() {
        let pipeline = Pipeline::builder().build().unwrap();
        let first = pipeline.process(raw_orders()).unwrap();
        let again = first
            .cleaned
            .clone()
            .drop(columns::TOTAL_SALE)
            .unwrap();
        let second = pipeline.process(again).unwrap();

        assert!(second.cleaned.equals_missing(&first.cleaned));
        assert_eq!(second.summary.rows_removed(), 0);
    }
}
