//! Configuration types for the generator and the cleaning pipeline.
//!
//! All values are compiled in. The builders exist so tests and library users
//! can vary a single knob while keeping every other default.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default location of the interchange CSV between the two stages.
pub const DEFAULT_DATASET_PATH: &str = "data/sales_orders.csv";
/// Default directory for rendered charts.
pub const DEFAULT_CHARTS_DIR: &str = "charts";
/// Default directory for the JSON report.
pub const DEFAULT_REPORTS_DIR: &str = "reports";

/// Configuration for the synthetic dataset generator.
///
/// # Example
///
/// ```rust,ignore
/// use sales_analytics::config::GeneratorConfig;
///
/// let config = GeneratorConfig::builder()
///     .rows(250)
///     .seed(7)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Number of orders to synthesize before duplicates are appended.
    /// Default: 100
    pub rows: usize,

    /// Seed for the pseudo-random generator.
    /// Default: 42
    pub seed: u64,

    /// First order id; ids are consecutive from here.
    /// Default: 1001
    pub first_order_id: i64,

    /// Date of the first order before the random backdating is applied.
    /// Default: 2026-07-01
    pub start_date: NaiveDate,

    /// Orders are backdated by a uniform number of days in `0..max_backdate_days`.
    /// Default: 30
    pub max_backdate_days: i64,

    /// Whether to corrupt the dataset with the fixed set of defects.
    /// Default: true
    pub inject_defects: bool,

    /// Where the CSV is written.
    /// Default: "data/sales_orders.csv"
    pub output_path: PathBuf,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            seed: 42,
            first_order_id: 1001,
            start_date: default_start_date(),
            max_backdate_days: 30,
            inject_defects: true,
            output_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 7, 1).unwrap_or_default()
}

impl GeneratorConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.rows == 0 {
            return Err(ConfigValidationError::InvalidRowCount(self.rows));
        }

        if self.max_backdate_days <= 0 {
            return Err(ConfigValidationError::InvalidBackdate(self.max_backdate_days));
        }

        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_path".to_string()));
        }

        Ok(())
    }
}

/// Builder for [`GeneratorConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct GeneratorConfigBuilder {
    rows: Option<usize>,
    seed: Option<u64>,
    first_order_id: Option<i64>,
    start_date: Option<NaiveDate>,
    max_backdate_days: Option<i64>,
    inject_defects: Option<bool>,
    output_path: Option<PathBuf>,
}

impl GeneratorConfigBuilder {
    /// Set the number of synthesized orders.
    pub fn rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    /// Set the random seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the first order id.
    pub fn first_order_id(mut self, id: i64) -> Self {
        self.first_order_id = Some(id);
        self
    }

    /// Set the date of the first order.
    pub fn start_date(mut self, date: NaiveDate) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Set the exclusive upper bound of the random backdating, in days.
    pub fn max_backdate_days(mut self, days: i64) -> Self {
        self.max_backdate_days = Some(days);
        self
    }

    /// Enable or disable defect injection.
    pub fn inject_defects(mut self, inject: bool) -> Self {
        self.inject_defects = Some(inject);
        self
    }

    /// Set where the CSV is written.
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<GeneratorConfig, ConfigValidationError> {
        let defaults = GeneratorConfig::default();
        let config = GeneratorConfig {
            rows: self.rows.unwrap_or(defaults.rows),
            seed: self.seed.unwrap_or(defaults.seed),
            first_order_id: self.first_order_id.unwrap_or(defaults.first_order_id),
            start_date: self.start_date.unwrap_or(defaults.start_date),
            max_backdate_days: self.max_backdate_days.unwrap_or(defaults.max_backdate_days),
            inject_defects: self.inject_defects.unwrap_or(defaults.inject_defects),
            output_path: self.output_path.unwrap_or(defaults.output_path),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Configuration for the cleaning pipeline.
///
/// Use [`CleaningConfig::builder()`] to override individual steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CleaningConfig {
    /// Rows whose quantity lies further than this many standard deviations
    /// from the mean are removed.
    /// Default: 3.0
    pub outlier_sigma: f64,

    /// Delta degrees of freedom for the standard deviation.
    /// Default: 1 (sample standard deviation)
    pub std_ddof: u8,

    /// Whether to remove duplicate rows.
    /// Default: true
    pub remove_duplicates: bool,

    /// Whether to filter quantity outliers.
    /// Default: true
    pub remove_outliers: bool,

    /// Where the pipeline reads its input.
    /// Default: "data/sales_orders.csv"
    pub input_path: PathBuf,
}

impl Default for CleaningConfig {
    fn default() -> Self {
        Self {
            outlier_sigma: 3.0,
            std_ddof: 1,
            remove_duplicates: true,
            remove_outliers: true,
            input_path: PathBuf::from(DEFAULT_DATASET_PATH),
        }
    }
}

impl CleaningConfig {
    /// Create a new configuration builder.
    pub fn builder() -> CleaningConfigBuilder {
        CleaningConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if !self.outlier_sigma.is_finite() || self.outlier_sigma <= 0.0 {
            return Err(ConfigValidationError::InvalidSigma(self.outlier_sigma));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        Ok(())
    }
}

/// Builder for [`CleaningConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct CleaningConfigBuilder {
    outlier_sigma: Option<f64>,
    std_ddof: Option<u8>,
    remove_duplicates: Option<bool>,
    remove_outliers: Option<bool>,
    input_path: Option<PathBuf>,
}

impl CleaningConfigBuilder {
    /// Set the outlier threshold in standard deviations.
    pub fn outlier_sigma(mut self, sigma: f64) -> Self {
        self.outlier_sigma = Some(sigma);
        self
    }

    /// Set the delta degrees of freedom for the standard deviation.
    pub fn std_ddof(mut self, ddof: u8) -> Self {
        self.std_ddof = Some(ddof);
        self
    }

    /// Enable or disable duplicate row removal.
    pub fn remove_duplicates(mut self, remove: bool) -> Self {
        self.remove_duplicates = Some(remove);
        self
    }

    /// Enable or disable outlier filtering.
    pub fn remove_outliers(mut self, remove: bool) -> Self {
        self.remove_outliers = Some(remove);
        self
    }

    /// Set the input CSV path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Build the configuration.
    pub fn build(self) -> Result<CleaningConfig, ConfigValidationError> {
        let defaults = CleaningConfig::default();
        let config = CleaningConfig {
            outlier_sigma: self.outlier_sigma.unwrap_or(defaults.outlier_sigma),
            std_ddof: self.std_ddof.unwrap_or(defaults.std_ddof),
            remove_duplicates: self.remove_duplicates.unwrap_or(defaults.remove_duplicates),
            remove_outliers: self.remove_outliers.unwrap_or(defaults.remove_outliers),
            input_path: self.input_path.unwrap_or(defaults.input_path),
        };

        config.validate()?;
        Ok(config)
    }
}

/// Where the analysis stage writes its artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory for SVG charts.
    /// Default: "charts"
    pub charts_dir: PathBuf,

    /// Directory for the JSON report.
    /// Default: "reports"
    pub reports_dir: PathBuf,

    /// Whether to render charts.
    /// Default: true
    pub render_charts: bool,

    /// Whether to write the JSON report.
    /// Default: true
    pub write_report: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            charts_dir: PathBuf::from(DEFAULT_CHARTS_DIR),
            reports_dir: PathBuf::from(DEFAULT_REPORTS_DIR),
            render_charts: true,
            write_report: true,
        }
    }
}

impl OutputConfig {
    /// Place both output directories under a common root.
    pub fn rooted_at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            charts_dir: root.join(DEFAULT_CHARTS_DIR),
            reports_dir: root.join(DEFAULT_REPORTS_DIR),
            ..Self::default()
        }
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.charts_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("charts_dir".to_string()));
        }
        if self.reports_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("reports_dir".to_string()));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid row count: {0} (must be at least 1)")]
    InvalidRowCount(usize),

    #[error("Invalid backdate window: {0} days (must be at least 1)")]
    InvalidBackdate(i64),

    #[error("Invalid outlier threshold: {0} (must be a positive number of standard deviations)")]
    InvalidSigma(f64),

    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_generator_config() {
        let config = GeneratorConfig::default();
        assert_eq!(config.rows, 100);
        assert_eq!(config.seed, 42);
        assert_eq!(config.first_order_id, 1001);
        assert_eq!(config.start_date, NaiveDate::from_ymd_opt(2026, 7, 1).unwrap());
        assert_eq!(config.max_backdate_days, 30);
        assert!(config.inject_defects);
    }

    #[test]
    fn test_generator_builder_custom_values() {
        let config = GeneratorConfig::builder()
            .rows(10)
            .seed(7)
            .inject_defects(false)
            .output_path("out.csv")
            .build()
            .unwrap();

        assert_eq!(config.rows, 10);
        assert_eq!(config.seed, 7);
        assert!(!config.inject_defects);
        assert_eq!(config.output_path, PathBuf::from("out.csv"));
    }

    #[test]
    fn test_generator_validation_zero_rows() {
        let result = GeneratorConfig::builder().rows(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidRowCount(0)
        ));
    }

    #[test]
    fn test_generator_validation_empty_path() {
        let result = GeneratorConfig::builder().output_path("").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyPath(_)
        ));
    }

    #[test]
    fn test_default_cleaning_config() {
        let config = CleaningConfig::default();
        assert_eq!(config.outlier_sigma, 3.0);
        assert_eq!(config.std_ddof, 1);
        assert!(config.remove_duplicates);
        assert!(config.remove_outliers);
    }

    #[test]
    fn test_cleaning_validation_invalid_sigma() {
        let result = CleaningConfig::builder().outlier_sigma(0.0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidSigma(_)
        ));

        let result = CleaningConfig::builder().outlier_sigma(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_output_config_rooted_at() {
        let config = OutputConfig::rooted_at("/tmp/run");
        assert_eq!(config.charts_dir, PathBuf::from("/tmp/run/charts"));
        assert_eq!(config.reports_dir, PathBuf::from("/tmp/run/reports"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cleaning_config_serialization() {
        let config = CleaningConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: CleaningConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.outlier_sigma, deserialized.outlier_sigma);
        assert_eq!(config.input_path, deserialized.input_path);
    }
}
