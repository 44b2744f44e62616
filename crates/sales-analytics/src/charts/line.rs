//! Daily revenue line chart.

use super::{CHART_SIZE, FONT, LINE_GREEN};
use crate::types::DailyRevenue;
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// Maximum number of date labels along the x axis.
const MAX_DATE_LABELS: usize = 12;

/// Revenue per day as a line with a marker on every day.
pub(super) fn daily_trend(path: &Path, title: &str, daily: &[DailyRevenue]) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = daily.len().max(1) as i32;
    let max_y = daily
        .iter()
        .map(|d| d.revenue)
        .fold(0.0_f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(-1..n, 0f64..max_y)?;

    chart
        .configure_mesh()
        .x_labels(daily.len().clamp(1, MAX_DATE_LABELS))
        .x_label_formatter(&|i| {
            usize::try_from(*i)
                .ok()
                .and_then(|i| daily.get(i))
                .map(|d| d.date.format("%m-%d").to_string())
                .unwrap_or_default()
        })
        .y_label_formatter(&|v| format!("{:.0}", v))
        .x_desc("Date")
        .y_desc("Revenue (R$)")
        .draw()?;

    let points: Vec<(i32, f64)> = daily
        .iter()
        .enumerate()
        .map(|(i, d)| (i as i32, d.revenue))
        .collect();

    chart.draw_series(LineSeries::new(points.clone(), LINE_GREEN.stroke_width(2)))?;
    chart.draw_series(
        points
            .into_iter()
            .map(|p| Circle::new(p, 4, LINE_GREEN.filled())),
    )?;

    root.present()?;
    Ok(())
}
