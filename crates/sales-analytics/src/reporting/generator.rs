use crate::error::Result;
use crate::types::{CleaningSummary, DatasetProfile, SalesAnalysis};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the JSON report inside the reports directory.
pub const REPORT_FILE_NAME: &str = "sales_report.json";

// ============================================================================
// Comprehensive Report Types
// ============================================================================

/// Everything one analysis run produced, in one serializable document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComprehensiveReport {
    // Metadata
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path to the input CSV
    pub input_file: String,
    /// Paths of the rendered charts
    pub charts: Vec<String>,

    /// Row counts and timing of the cleaning run
    pub processing_summary: ProcessingSummaryReport,

    /// Inspection of the raw table
    pub profile_before: DatasetProfile,
    /// Inspection of the cleaned table
    pub profile_after: DatasetProfile,

    /// Step-by-step record of the cleaning run
    pub cleaning_summary: CleaningSummary,

    /// Aggregates over the cleaned table
    pub analysis: SalesAnalysis,
}

/// Summary of processing for the comprehensive report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingSummaryReport {
    /// Total execution time in milliseconds
    pub duration_ms: u64,
    pub rows_before: usize,
    pub rows_after: usize,
    pub rows_removed: usize,
    /// Percentage of rows removed
    pub rows_removed_percent: f64,
    /// Null cells before cleaning
    pub nulls_before: usize,
    /// Null cells after cleaning
    pub nulls_after: usize,
    /// Warnings generated during processing
    pub warnings: Vec<String>,
}

/// Parameters for building a [`ComprehensiveReport`].
pub struct ReportParams<'a> {
    pub input_file: &'a Path,
    pub chart_paths: &'a [PathBuf],
    pub profile_before: &'a DatasetProfile,
    pub profile_after: &'a DatasetProfile,
    pub summary: &'a CleaningSummary,
    pub analysis: &'a SalesAnalysis,
}

pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(crate::config::DEFAULT_REPORTS_DIR),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Build a comprehensive report from the results of one run.
    pub fn build_comprehensive_report(params: ReportParams<'_>) -> ComprehensiveReport {
        let ReportParams {
            input_file,
            chart_paths,
            profile_before,
            profile_after,
            summary,
            analysis,
        } = params;

        let rows_removed = summary.rows_removed();
        let rows_removed_percent = if summary.rows_before > 0 {
            rows_removed as f64 / summary.rows_before as f64 * 100.0
        } else {
            0.0
        };

        ComprehensiveReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.display().to_string(),
            charts: chart_paths
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            processing_summary: ProcessingSummaryReport {
                duration_ms: summary.duration_ms,
                rows_before: summary.rows_before,
                rows_after: summary.rows_after,
                rows_removed,
                rows_removed_percent,
                nulls_before: profile_before.total_nulls(),
                nulls_after: profile_after.total_nulls(),
                warnings: summary.warnings.clone(),
            },
            profile_before: profile_before.clone(),
            profile_after: profile_after.clone(),
            cleaning_summary: summary.clone(),
            analysis: analysis.clone(),
        }
    }

    /// Write the report as pretty JSON and return its path.
    pub fn write_report_to_file(&self, report: &ComprehensiveReport) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;
        let report_path = self.output_dir.join(REPORT_FILE_NAME);
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());
        Ok(report_path)
    }
}
