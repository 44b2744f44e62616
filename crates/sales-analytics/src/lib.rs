//! Synthetic Sales Analytics Library
//!
//! Generates a reproducible dataset of sales orders with deliberate
//! data-quality defects, then cleans and analyzes it with Polars.
//!
//! # Overview
//!
//! - **Generation**: seeded orders with missing values, duplicate rows,
//!   numbers stored as text and a magnitude outlier, written as CSV
//! - **Type Correction**: every column coerced to its type, bad values to null
//! - **Imputation**: median quantity, most frequent delivery status
//! - **Cleaning**: rows without price or customer dropped, duplicates and
//!   quantity outliers removed
//! - **Analysis**: revenue totals by category and day, units by product,
//!   delivery status shares
//! - **Charts**: five SVG charts
//! - **Reporting**: a JSON report with before/after profiles
//!
//! The CSV file is the only interface between generation and analysis.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use sales_analytics::{
//!     CleaningConfig, GeneratorConfig, OutputConfig, generate_dataset, run_analysis,
//! };
//!
//! generate_dataset(GeneratorConfig::default())?;
//! let run = run_analysis(CleaningConfig::default(), &OutputConfig::default())?;
//!
//! println!("Revenue: {}", sales_analytics::utils::format_currency(run.analysis.total_revenue));
//! ```
//!
//! # Cleaning Only
//!
//! ```rust,ignore
//! use sales_analytics::{CleaningConfig, Pipeline};
//!
//! let pipeline = Pipeline::builder()
//!     .config(CleaningConfig::builder().remove_outliers(false).build()?)
//!     .build()?;
//! let result = pipeline.process(pipeline.load()?)?;
//! println!("{} -> {} rows", result.summary.rows_before, result.summary.rows_after);
//! ```

pub mod analysis;
pub mod charts;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod generator;
pub mod imputers;
pub mod pipeline;
pub mod profiler;
pub mod reporting;
pub mod types;
pub mod utils;
pub mod workflow;

// Re-exports for convenient access
pub use analysis::{SalesAnalyzer, derive_total_sale};
pub use charts::ChartRenderer;
pub use cleaner::{DataCleaner, TypeCorrector};
pub use config::{
    CleaningConfig, CleaningConfigBuilder, ConfigValidationError, GeneratorConfig,
    GeneratorConfigBuilder, OutputConfig,
};
pub use error::{Result as SalesResult, ResultExt, SalesError};
pub use generator::{DefectPlan, SalesGenerator};
pub use imputers::StatisticalImputer;
pub use pipeline::{
    OutlierHandler, Pipeline, PipelineBuilder, PipelineResult, PipelineStage,
};
pub use profiler::DataProfiler;
pub use reporting::{ComprehensiveReport, ProcessingSummaryReport, ReportGenerator, ReportParams};
pub use types::{
    CleaningSummary, ColumnKind, ColumnProfile, ColumnSummary, DailyRevenue, DatasetProfile,
    DeliveryStatus, GroupTotal, PRODUCT_CATALOGUE, Product, SalesAnalysis, StatusShare, columns,
};
pub use workflow::{AnalysisRun, GeneratedDataset, generate_dataset, run_analysis};
