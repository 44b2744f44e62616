//! Custom error types for the sales generator and cleaning pipeline.
//!
//! Step modules work with `anyhow` internally; the pipeline maps their
//! failures onto [`SalesError`] variants so callers can tell which stage
//! failed.
//!
//! Errors serialize as `{ code, message }` so they can be embedded in the JSON
//! report.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the sales pipeline.
#[derive(Error, Debug)]
pub enum SalesError {
    /// The CSV file the pipeline should read does not exist.
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// Column was not found in the dataset.
    #[error("Column '{0}' not found in dataset")]
    ColumnNotFound(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Dataset generation failed.
    #[error("Failed to generate dataset: {0}")]
    GenerationFailed(String),

    /// Type coercion failed for a reason other than a malformed value.
    #[error("Failed to coerce column '{column}' to {target_type}: {reason}")]
    CoercionFailed {
        column: String,
        target_type: String,
        reason: String,
    },

    /// Data profiling failed.
    #[error("Failed to profile dataset: {0}")]
    ProfilingFailed(String),

    /// Data cleaning failed.
    #[error("Failed to clean data: {0}")]
    CleaningFailed(String),

    /// Imputation failed.
    #[error("Failed to impute missing values in column '{column}': {reason}")]
    ImputationFailed { column: String, reason: String },

    /// Aggregation query failed.
    #[error("Failed to analyze data: {0}")]
    AnalysisFailed(String),

    /// Chart rendering failed.
    #[error("Failed to render chart '{chart}': {reason}")]
    ChartRenderingFailed { chart: String, reason: String },

    /// Report generation failed.
    #[error("Failed to generate report: {0}")]
    ReportGenerationFailed(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<SalesError>,
    },
}

impl SalesError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        SalesError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code, independent of the message text.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::ColumnNotFound(_) => "COLUMN_NOT_FOUND",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::GenerationFailed(_) => "GENERATION_FAILED",
            Self::CoercionFailed { .. } => "COERCION_FAILED",
            Self::ProfilingFailed(_) => "PROFILING_FAILED",
            Self::CleaningFailed(_) => "CLEANING_FAILED",
            Self::ImputationFailed { .. } => "IMPUTATION_FAILED",
            Self::AnalysisFailed(_) => "ANALYSIS_FAILED",
            Self::ChartRenderingFailed { .. } => "CHART_RENDERING_FAILED",
            Self::ReportGenerationFailed(_) => "REPORT_GENERATION_FAILED",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error aborts the pipeline before any data was read.
    pub fn is_missing_input(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_missing_input(),
            _ => false,
        }
    }
}

impl From<crate::config::ConfigValidationError> for SalesError {
    fn from(err: crate::config::ConfigValidationError) -> Self {
        SalesError::InvalidConfig(err.to_string())
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for SalesError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("SalesError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for sales pipeline operations.
pub type Result<T> = std::result::Result<T, SalesError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| SalesError::Polars(e).with_context(context))
    }
}
