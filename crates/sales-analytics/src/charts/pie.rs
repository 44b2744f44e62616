//! Pie charts.
//!
//! plotters has no pie series for the SVG backend feature set we enable, so
//! slices are drawn as filled polygons directly on the drawing area.

use super::{FONT, PIE_COLORS, PIE_SIZE};
use anyhow::Result;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::PI;
use std::path::Path;

/// First slice starts at the left (9 o'clock) and slices run counterclockwise.
const START_ANGLE: f64 = PI;
const EXPLODE_FRACTION: f64 = 0.1;
const SHADOW_OFFSET: i32 = 6;

#[derive(Debug, Clone, Copy)]
pub(super) struct PieStyle {
    pub explode_largest: bool,
    pub shadow: bool,
}

impl PieStyle {
    pub fn plain() -> Self {
        Self {
            explode_largest: false,
            shadow: false,
        }
    }

    /// Largest slice pulled out, with a drop shadow.
    pub fn highlighted() -> Self {
        Self {
            explode_largest: true,
            shadow: true,
        }
    }
}

struct Slice {
    start: f64,
    sweep: f64,
    offset: (f64, f64),
    share: f64,
}

pub(super) fn pie_chart(
    path: &Path,
    title: &str,
    labels: &[String],
    counts: &[usize],
    style: PieStyle,
) -> Result<()> {
    let root = SVGBackend::new(path, PIE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(title, (FONT, 28))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as f64 / 2.0, height as f64 / 2.0);
    let radius = width.min(height) as f64 * 0.32;

    let total: usize = counts.iter().sum();
    if total == 0 {
        root.draw(&Text::new(
            "No data",
            (center.0 as i32, center.1 as i32),
            centered_text(20.0),
        ))?;
        root.present()?;
        return Ok(());
    }

    let slices = layout_slices(counts, total, radius, style);

    if style.shadow {
        for slice in &slices {
            let points = slice_polygon(center, radius, slice, SHADOW_OFFSET);
            root.draw(&Polygon::new(points, BLACK.mix(0.25).filled()))?;
        }
    }

    for (i, slice) in slices.iter().enumerate() {
        let color = PIE_COLORS[i % PIE_COLORS.len()];
        let points = slice_polygon(center, radius, slice, 0);
        root.draw(&Polygon::new(points.clone(), color.filled()))?;

        let mut outline = points;
        if let Some(first) = outline.first().copied() {
            outline.push(first);
        }
        root.draw(&PathElement::new(outline, WHITE.stroke_width(2)))?;

        let mid = slice.start + slice.sweep / 2.0;
        let at = |r: f64| -> (i32, i32) {
            (
                (center.0 + slice.offset.0 + r * mid.cos()).round() as i32,
                (center.1 + slice.offset.1 - r * mid.sin()).round() as i32,
            )
        };

        root.draw(&Text::new(
            format!("{:.1}%", slice.share * 100.0),
            at(radius * 0.6),
            centered_text(18.0),
        ))?;
        if let Some(label) = labels.get(i) {
            root.draw(&Text::new(label.clone(), at(radius * 1.18), centered_text(18.0)))?;
        }
    }

    root.present()?;
    Ok(())
}

fn layout_slices(counts: &[usize], total: usize, radius: f64, style: PieStyle) -> Vec<Slice> {
    let largest = counts
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.cmp(b).then_with(|| ib.cmp(ia)))
        .map(|(i, _)| i);

    let mut start = START_ANGLE;
    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let share = count as f64 / total as f64;
            let sweep = share * 2.0 * PI;
            let offset = if style.explode_largest && Some(i) == largest && share < 1.0 {
                let mid = start + sweep / 2.0;
                let d = radius * EXPLODE_FRACTION;
                (d * mid.cos(), -d * mid.sin())
            } else {
                (0.0, 0.0)
            };
            let slice = Slice {
                start,
                sweep,
                offset,
                share,
            };
            start += sweep;
            slice
        })
        .collect()
}

/// Center point followed by the arc, one vertex per degree.
fn slice_polygon(center: (f64, f64), radius: f64, slice: &Slice, shift: i32) -> Vec<(i32, i32)> {
    let cx = center.0 + slice.offset.0 + shift as f64;
    let cy = center.1 + slice.offset.1 + shift as f64;
    let steps = (slice.sweep.to_degrees().ceil() as usize).max(2);

    let mut points = Vec::with_capacity(steps + 2);
    if slice.sweep < 2.0 * PI {
        points.push((cx.round() as i32, cy.round() as i32));
    }
    for k in 0..=steps {
        let angle = slice.start + slice.sweep * k as f64 / steps as f64;
        points.push((
            (cx + radius * angle.cos()).round() as i32,
            (cy - radius * angle.sin()).round() as i32,
        ));
    }
    points
}

fn centered_text(size: f64) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font()).pos(Pos::new(HPos::Center, VPos::Center))
}
