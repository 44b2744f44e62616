//! Report generation module.
//!
//! # Comprehensive Reports
//!
//! [`ComprehensiveReport`] gathers both dataset profiles, the cleaning
//! summary, every aggregate and the chart paths of one run. It is written as
//! `reports/sales_report.json` and is also what the CLI summary prints from.
//!
//! # Example
//!
//! ```rust,ignore
//! use sales_analytics::reporting::{ReportGenerator, ReportParams};
//!
//! let report = ReportGenerator::build_comprehensive_report(ReportParams {
//!     input_file: &input_path,
//!     chart_paths: &charts,
//!     profile_before: &before,
//!     profile_after: &after,
//!     summary: &result.summary,
//!     analysis: &analysis,
//! });
//! ReportGenerator::new("reports").write_report_to_file(&report)?;
//! ```

mod generator;

pub use generator::{
    ComprehensiveReport, ProcessingSummaryReport, REPORT_FILE_NAME, ReportGenerator, ReportParams,
};
