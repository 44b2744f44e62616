//! CLI entry point for the sales dataset generator and analysis pipeline.

use anyhow::Result;
use clap::{Parser, Subcommand};
use sales_analytics::types::{ColumnProfile, DatasetProfile};
use sales_analytics::utils::format_currency;
use sales_analytics::{
    AnalysisRun, CleaningConfig, GeneratedDataset, GeneratorConfig, OutputConfig,
    generate_dataset, run_analysis,
};
use tracing::{error, info};

/// Rows shown in the cleaned-table preview.
const PREVIEW_ROWS: usize = 5;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Synthetic sales dataset generator with a cleaning and analysis pipeline",
    long_about = "Generates a reproducible sales dataset with deliberate data-quality defects,\n\
                  then cleans it, computes sales aggregates and renders charts.\n\n\
                  FILES:\n  \
                  data/sales_orders.csv       generated dataset (input of analyze)\n  \
                  charts/*.svg                rendered charts\n  \
                  reports/sales_report.json   full report of the analysis run\n\n\
                  EXAMPLES:\n  \
                  # Generate the dataset, then analyze it\n  \
                  sales-analytics run\n\n  \
                  # Re-run only the analysis on an existing dataset\n  \
                  sales-analytics analyze --log-level debug"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    log_level: String,

    /// Suppress progress output (only show warnings, errors and the summary)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Generate the synthetic dataset
    Generate,
    /// Clean and analyze the generated dataset
    Analyze,
    /// Generate, then analyze
    Run,
}

/// Initialize the tracing subscriber for logging.
fn init_logging(level: &str, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let effective_level = if quiet { "warn" } else { level };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(effective_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level, args.quiet);

    if matches!(args.command, Command::Generate | Command::Run) {
        let dataset = generate_dataset(GeneratorConfig::default())?;
        print_generation_summary(&dataset);
    }

    if matches!(args.command, Command::Analyze | Command::Run) {
        let run = match run_analysis(CleaningConfig::default(), &OutputConfig::default()) {
            Ok(run) => run,
            Err(e) => {
                if e.is_missing_input() {
                    error!("{}. Run `sales-analytics generate` first.", e);
                }
                return Err(e.into());
            }
        };
        print_analysis_summary(&run);
        info!("Done");
    }

    Ok(())
}

// =============================================================================
// User-facing output
//
// These functions use `println!` on purpose: the summary is the program's
// output and must show regardless of the log level.
// =============================================================================

fn print_generation_summary(dataset: &GeneratedDataset) {
    println!();
    println!(
        "Dataset written: {} ({} rows x {} columns)",
        dataset.path.display(),
        dataset.rows,
        dataset.columns
    );
}

fn print_profile(title: &str, profile: &DatasetProfile) {
    println!("{}", title);
    println!("{}", "-".repeat(40));
    println!("  Shape: {} rows x {} columns", profile.shape.0, profile.shape.1);
    println!(
        "  Duplicate rows: {} ({:.1}%)",
        profile.duplicate_count, profile.duplicate_percentage
    );
    println!();
    println!(
        "  {:<18} {:<10} {:>6}  {}",
        "Column", "Type", "Nulls", "Description"
    );
    println!("  {}", "-".repeat(70));
    for col in &profile.column_profiles {
        let dtype = match &col.source_dtype {
            Some(source) => format!("{}->{}", source, col.dtype),
            None => col.dtype.clone(),
        };
        println!(
            "  {:<18} {:<10} {:>6}  {}",
            col.name,
            dtype,
            col.null_count,
            describe_column(col)
        );
    }
    println!();
}

/// One-line summary of a profiled column: moments for numbers, the observed
/// range for dates, the most frequent value for text.
fn describe_column(col: &ColumnProfile) -> String {
    if let Some(n) = &col.numeric {
        return format!(
            "mean {:.2}, std {:.2}, min {:.2}, median {:.2}, max {:.2}",
            n.mean.unwrap_or(f64::NAN),
            n.std.unwrap_or(f64::NAN),
            n.min.unwrap_or(f64::NAN),
            n.median.unwrap_or(f64::NAN),
            n.max.unwrap_or(f64::NAN)
        );
    }
    if let Some(d) = &col.date {
        return match (d.min, d.max) {
            (Some(min), Some(max)) => format!("{} dates, from {} to {}", d.count, min, max),
            _ => "no dates".to_string(),
        };
    }
    match &col.categorical {
        Some(c) => format!(
            "{} unique, top '{}' ({}x)",
            c.unique,
            c.top.as_deref().unwrap_or("-"),
            c.freq
        ),
        None => String::new(),
    }
}

fn print_analysis_summary(run: &AnalysisRun) {
    let report = &run.report;
    let summary = &report.processing_summary;
    let cleaning = &report.cleaning_summary;
    let analysis = &run.analysis;

    println!();
    println!("{}", "=".repeat(80));
    println!("SALES ANALYSIS COMPLETE");
    println!("{}", "=".repeat(80));
    println!();
    println!("Input: {}", report.input_file);
    println!();

    print_profile("RAW DATASET", &run.profile_before);

    println!("Cleaning Summary:");
    println!("  Duration: {}ms", summary.duration_ms);
    println!(
        "  Rows: {} -> {} ({} removed, {:.1}%)",
        summary.rows_before, summary.rows_after, summary.rows_removed, summary.rows_removed_percent
    );
    println!(
        "  Null cells: {} -> {}",
        summary.nulls_before, summary.nulls_after
    );
    for step in &cleaning.steps {
        println!("  - {}", step);
    }
    println!();

    if !summary.warnings.is_empty() {
        println!("Warnings:");
        for warning in &summary.warnings {
            println!("  ! {}", warning);
        }
        println!();
    }

    print_profile("CLEANED DATASET", &run.profile_after);

    println!("Preview:");
    println!("{}", run.result.cleaned.head(Some(PREVIEW_ROWS)));
    println!();

    println!("Total revenue: {}", format_currency(analysis.total_revenue));
    println!();
    println!("Revenue by category:");
    for group in &analysis.revenue_by_category {
        println!("  {:<22} {:>18}", group.key, format_currency(group.value));
    }
    println!();
    println!("Units sold by product:");
    for group in &analysis.units_by_product {
        println!("  {:<22} {:>8}", group.key, group.value);
    }
    println!();
    println!("Delivery status:");
    for share in &analysis.status_distribution {
        println!(
            "  {:<22} {:>8} ({:.1}%)",
            share.status, share.count, share.percentage
        );
    }
    if let (Some(first), Some(last)) = (analysis.daily_revenue.first(), analysis.daily_revenue.last())
    {
        println!();
        println!(
            "Daily revenue: {} days from {} to {}",
            analysis.daily_revenue.len(),
            first.date,
            last.date
        );
    }
    println!();

    if !report.charts.is_empty() {
        println!("Charts:");
        for chart in &report.charts {
            println!("  - {}", chart);
        }
    }
    if let Some(path) = &run.report_path {
        println!("Report: {}", path.display());
    }
    println!("{}", "=".repeat(80));
}
