//! The two top-level stages, generate and analyze, as library calls.
//!
//! The CSV file is the only thing they share: [`generate_dataset`] writes it
//! and [`run_analysis`] reads it back.

use crate::analysis::SalesAnalyzer;
use crate::charts::ChartRenderer;
use crate::config::{CleaningConfig, GeneratorConfig, OutputConfig};
use crate::error::{Result, ResultExt, SalesError};
use crate::generator::SalesGenerator;
use crate::pipeline::{Pipeline, PipelineResult, PipelineStage};
use crate::profiler::DataProfiler;
use crate::reporting::{ComprehensiveReport, ReportGenerator, ReportParams};
use crate::types::{DatasetProfile, SalesAnalysis};
use std::path::PathBuf;
use tracing::info;

/// What [`generate_dataset`] wrote.
#[derive(Debug, Clone)]
pub struct GeneratedDataset {
    pub path: PathBuf,
    pub rows: usize,
    pub columns: usize,
}

/// Everything [`run_analysis`] produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub profile_before: DatasetProfile,
    pub profile_after: DatasetProfile,
    pub result: PipelineResult,
    pub analysis: SalesAnalysis,
    pub chart_paths: Vec<PathBuf>,
    pub report: ComprehensiveReport,
    /// `None` when report writing is disabled.
    pub report_path: Option<PathBuf>,
}

/// Synthesize the dirty dataset and write it as CSV.
pub fn generate_dataset(config: GeneratorConfig) -> Result<GeneratedDataset> {
    config.validate()?;
    info!("{}...", PipelineStage::Generation);

    let generator = SalesGenerator::new(config);
    let mut df = generator
        .generate()
        .map_err(|e| SalesError::GenerationFailed(format!("{:#}", e)))?;
    generator
        .write_csv(&mut df)
        .map_err(|e| SalesError::GenerationFailed(format!("{:#}", e)))?;

    Ok(GeneratedDataset {
        path: generator.config().output_path.clone(),
        rows: df.height(),
        columns: df.width(),
    })
}

/// Load, inspect, clean and analyze the CSV, then write charts and the report.
///
/// # Errors
///
/// Returns [`SalesError::InputNotFound`] if the CSV does not exist.
pub fn run_analysis(cleaning: CleaningConfig, output: &OutputConfig) -> Result<AnalysisRun> {
    output.validate()?;
    let input_path = cleaning.input_path.clone();
    let pipeline = Pipeline::builder().config(cleaning).build()?;

    let raw = pipeline.load()?;

    info!("{} (before cleaning)...", PipelineStage::Profiling);
    let profile_before = DataProfiler::profile_raw_orders(&raw)
        .map_err(|e| SalesError::ProfilingFailed(format!("{:#}", e)))?;

    let result = pipeline
        .process(raw)
        .context(format!("While cleaning {}", input_path.display()))?;

    info!("{} (after cleaning)...", PipelineStage::Profiling);
    let profile_after = DataProfiler::profile_dataset(&result.cleaned)
        .map_err(|e| SalesError::ProfilingFailed(e.to_string()))?;

    info!("{}...", PipelineStage::Analysis);
    let analysis = SalesAnalyzer::new(&result.cleaned)
        .analyze()
        .map_err(|e| SalesError::AnalysisFailed(e.to_string()))?;

    let chart_paths = if output.render_charts {
        info!("{}...", PipelineStage::ChartRendering);
        ChartRenderer::new(&output.charts_dir).render_all(&analysis)?
    } else {
        Vec::new()
    };

    info!("{}...", PipelineStage::ReportGeneration);
    let report = ReportGenerator::build_comprehensive_report(ReportParams {
        input_file: &input_path,
        chart_paths: &chart_paths,
        profile_before: &profile_before,
        profile_after: &profile_after,
        summary: &result.summary,
        analysis: &analysis,
    });
    let report_path = if output.write_report {
        Some(
            ReportGenerator::new(&output.reports_dir)
                .write_report_to_file(&report)
                .map_err(|e| SalesError::ReportGenerationFailed(e.to_string()))?,
        )
    } else {
        None
    };

    Ok(AnalysisRun {
        profile_before,
        profile_after,
        result,
        analysis,
        chart_paths,
        report,
        report_path,
    })
}
