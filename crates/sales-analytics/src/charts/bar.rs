//! Bar charts.

use super::{CHART_SIZE, FONT, SALMON, SKY_BLUE};
use anyhow::Result;
use plotters::prelude::*;
use std::path::Path;

/// One vertical bar per label, in the given order.
pub(super) fn vertical_bars(
    path: &Path,
    title: &str,
    y_desc: &str,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = labels.len().max(1) as i32;
    let max_y = values.iter().copied().fold(0.0_f64, f64::max).max(1.0) * 1.1;

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..max_y)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(labels.len().max(1))
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels.get(*i as usize).cloned().unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format!("{:.0}", v))
        .y_desc(y_desc)
        .draw()?;

    chart.draw_series(values.iter().enumerate().map(|(i, v)| {
        let i = i as i32;
        let mut bar = Rectangle::new(
            [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *v)],
            SKY_BLUE.filled(),
        );
        bar.set_margin(0, 0, 15, 15);
        bar
    }))?;

    root.present()?;
    Ok(())
}

/// One horizontal bar per label; the first label is drawn on top.
pub(super) fn horizontal_bars(
    path: &Path,
    title: &str,
    x_desc: &str,
    labels: &[String],
    values: &[i64],
) -> Result<()> {
    let root = SVGBackend::new(path, CHART_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let count = labels.len();
    let n = count.max(1) as i32;
    let max_x = values.iter().copied().max().unwrap_or(0).max(1);
    let max_x = max_x + (max_x / 10).max(1);

    // Row 0 is the bottom of the plot, so input order is reversed.
    let label_at = |row: usize| -> String {
        count
            .checked_sub(row + 1)
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default()
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, (FONT, 28))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(170)
        .build_cartesian_2d(0i64..max_x, (0..n).into_segmented())?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(count.max(1))
        .y_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => label_at(*i as usize),
            _ => String::new(),
        })
        .x_desc(x_desc)
        .draw()?;

    chart.draw_series(values.iter().take(count).enumerate().map(|(i, v)| {
        let row = (count - 1 - i) as i32;
        let mut bar = Rectangle::new(
            [(0, SegmentValue::Exact(row)), (*v, SegmentValue::Exact(row + 1))],
            SALMON.filled(),
        );
        bar.set_margin(8, 8, 0, 0);
        bar
    }))?;

    root.present()?;
    Ok(())
}
