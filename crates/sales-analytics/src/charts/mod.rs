//! SVG charts of the sales aggregates.
//!
//! Purely presentational: every chart is drawn from a [`SalesAnalysis`] and
//! nothing here touches the order table.

mod bar;
mod line;
mod pie;

use crate::error::{Result, SalesError};
use crate::types::SalesAnalysis;
use plotters::style::RGBColor;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const REVENUE_BY_CATEGORY_FILE: &str = "1_revenue_by_category.svg";
pub const UNITS_BY_PRODUCT_FILE: &str = "2_units_by_product.svg";
pub const DAILY_SALES_TREND_FILE: &str = "3_daily_sales_trend.svg";
pub const DELIVERY_STATUS_FILE: &str = "4_delivery_status.svg";
pub const DELIVERY_STATUS_HIGHLIGHT_FILE: &str = "5_delivery_status_highlight.svg";

const CHART_SIZE: (u32, u32) = (1000, 600);
const PIE_SIZE: (u32, u32) = (700, 700);
const FONT: &str = "sans-serif";

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);
const SALMON: RGBColor = RGBColor(250, 128, 114);
const LINE_GREEN: RGBColor = RGBColor(46, 139, 87);
const PIE_COLORS: [RGBColor; 3] = [
    RGBColor(144, 238, 144),
    RGBColor(255, 165, 0),
    RGBColor(240, 128, 128),
];

/// Renders the five sales charts into one directory.
pub struct ChartRenderer {
    output_dir: PathBuf,
}

impl ChartRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Render every chart and return the written paths, in chart order.
    pub fn render_all(&self, analysis: &SalesAnalysis) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.output_dir)?;

        let category_labels: Vec<String> = analysis
            .revenue_by_category
            .iter()
            .map(|g| g.key.clone())
            .collect();
        let category_values: Vec<f64> = analysis
            .revenue_by_category
            .iter()
            .map(|g| g.value)
            .collect();

        let product_labels: Vec<String> = analysis
            .units_by_product
            .iter()
            .map(|g| g.key.clone())
            .collect();
        let product_values: Vec<i64> = analysis.units_by_product.iter().map(|g| g.value).collect();

        let status_labels: Vec<String> = analysis
            .status_distribution
            .iter()
            .map(|s| s.status.clone())
            .collect();
        let status_counts: Vec<usize> = analysis
            .status_distribution
            .iter()
            .map(|s| s.count)
            .collect();

        let mut written = Vec::with_capacity(5);

        let path = self.output_dir.join(REVENUE_BY_CATEGORY_FILE);
        bar::vertical_bars(
            &path,
            "Revenue by Category",
            "Revenue (R$)",
            &category_labels,
            &category_values,
        )
        .map_err(|e| chart_error(REVENUE_BY_CATEGORY_FILE, e))?;
        written.push(path);

        let path = self.output_dir.join(UNITS_BY_PRODUCT_FILE);
        bar::horizontal_bars(
            &path,
            "Units Sold by Product",
            "Units",
            &product_labels,
            &product_values,
        )
        .map_err(|e| chart_error(UNITS_BY_PRODUCT_FILE, e))?;
        written.push(path);

        let path = self.output_dir.join(DAILY_SALES_TREND_FILE);
        line::daily_trend(&path, "Daily Sales Trend", &analysis.daily_revenue)
            .map_err(|e| chart_error(DAILY_SALES_TREND_FILE, e))?;
        written.push(path);

        let path = self.output_dir.join(DELIVERY_STATUS_FILE);
        pie::pie_chart(
            &path,
            "Delivery Status",
            &status_labels,
            &status_counts,
            pie::PieStyle::plain(),
        )
        .map_err(|e| chart_error(DELIVERY_STATUS_FILE, e))?;
        written.push(path);

        let path = self.output_dir.join(DELIVERY_STATUS_HIGHLIGHT_FILE);
        pie::pie_chart(
            &path,
            "Delivery Status (largest share highlighted)",
            &status_labels,
            &status_counts,
            pie::PieStyle::highlighted(),
        )
        .map_err(|e| chart_error(DELIVERY_STATUS_HIGHLIGHT_FILE, e))?;
        written.push(path);

        info!(
            "Rendered {} charts to {}",
            written.len(),
            self.output_dir.display()
        );
        Ok(written)
    }
}

fn chart_error(chart: &str, e: anyhow::Error) -> SalesError {
    SalesError::ChartRenderingFailed {
        chart: chart.to_string(),
        reason: format!("{:#}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DailyRevenue, GroupTotal, StatusShare};
    use chrono::NaiveDate;
    use tempfile::tempdir;

    fn analysis() -> SalesAnalysis {
        SalesAnalysis {
            total_revenue: 37699.0,
            revenue_by_category: vec![
                GroupTotal { key: "Electronics".to_string(), value: 34000.0 },
                GroupTotal { key: "Accessories".to_string(), value: 3699.0 },
            ],
            units_by_product: vec![
                GroupTotal { key: "Notebook".to_string(), value: 4 },
                GroupTotal { key: "Headphones".to_string(), value: 2 },
            ],
            daily_revenue: vec![
                DailyRevenue {
                    date: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
                    revenue: 10099.0,
                },
                DailyRevenue {
                    date: NaiveDate::from_ymd_opt(2026, 6, 2).unwrap(),
                    revenue: 0.0,
                },
            ],
            status_distribution: vec![
                StatusShare { status: "Delivered".to_string(), count: 3, percentage: 75.0 },
                StatusShare { status: "Pending".to_string(), count: 1, percentage: 25.0 },
            ],
        }
    }

    #[test]
    fn test_render_all_writes_five_svgs() {
        let dir = tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path().join("charts"));

        let paths = renderer.render_all(&analysis()).unwrap();

        assert_eq!(paths.len(), 5);
        assert!(paths[0].ends_with(REVENUE_BY_CATEGORY_FILE));
        assert!(paths[4].ends_with(DELIVERY_STATUS_HIGHLIGHT_FILE));
        for path in &paths {
            let content = fs::read_to_string(path).unwrap();
            assert!(content.contains("<svg"), "{}", path.display());
        }
    }

    #[test]
    fn test_render_all_empty_analysis() {
        let dir = tempdir().unwrap();
        let renderer = ChartRenderer::new(dir.path());
        let empty = SalesAnalysis {
            total_revenue: 0.0,
            revenue_by_category: Vec::new(),
            units_by_product: Vec::new(),
            daily_revenue: Vec::new(),
            status_distribution: Vec::new(),
        };

        let paths = renderer.render_all(&empty).unwrap();
        assert_eq!(paths.len(), 5);
        assert!(paths.iter().all(|p| p.exists()));
    }
}
