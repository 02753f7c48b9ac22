//! PNG rendering of a [`PlotPlan`] with plotters.

use super::fonts::text_available;
use super::plan::{BarCategory, HistogramBin, PlotPlan};
use crate::error::{AnalyzerError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

const SKY_BLUE: RGBColor = RGBColor(135, 206, 235);

fn plot_err(e: impl std::fmt::Display) -> AnalyzerError {
    AnalyzerError::PlotFailed(e.to_string())
}

/// Draw `plan` to `path`, overwriting any existing file.
pub(crate) fn render(plan: &PlotPlan, column: &str, path: &Path, size: (u32, u32)) -> Result<()> {
    if matches!(plan, PlotPlan::Empty) {
        return Err(AnalyzerError::PlotFailed("no data to plot".to_string()));
    }
    // plotters does not terminate on a NaN or infinite axis range
    if let PlotPlan::Histogram(bins) = plan {
        let (lo, hi) = histogram_range(bins);
        if !(lo.is_finite() && hi.is_finite() && lo < hi) {
            return Err(AnalyzerError::PlotFailed(format!(
                "invalid histogram range {}..{}",
                lo, hi
            )));
        }
    }

    let text = text_available();
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_err)?;

    match plan {
        PlotPlan::Histogram(bins) => draw_histogram(&root, bins, column, plan.max_count(), text)?,
        PlotPlan::Bars(bars) => draw_bars(&root, bars, column, plan.max_count(), text)?,
        PlotPlan::Empty => {}
    }

    root.present().map_err(plot_err)?;
    Ok(())
}

fn histogram_range(bins: &[HistogramBin]) -> (f64, f64) {
    let lo = bins.first().map(|b| b.lower).unwrap_or(f64::NAN);
    let hi = bins.last().map(|b| b.upper).unwrap_or(f64::NAN);
    (lo, hi)
}

fn y_ceiling(max_count: usize) -> u32 {
    let max = max_count as u32;
    max + max / 10 + 1
}

fn chart_builder<'a, 'b, DB: DrawingBackend>(
    root: &'a DrawingArea<DB, Shift>,
    column: &str,
    text: bool,
) -> ChartBuilder<'a, 'b, DB> {
    let mut builder = ChartBuilder::on(root);
    builder.margin(20);
    if text {
        builder
            .caption(format!("Distribution of {}", column), ("sans-serif", 28))
            .x_label_area_size(50)
            .y_label_area_size(60);
    }
    builder
}

fn draw_histogram<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bins: &[HistogramBin],
    column: &str,
    max_count: usize,
    text: bool,
) -> Result<()> {
    let (lo, hi) = histogram_range(bins);

    let mut chart = chart_builder(root, column, text)
        .build_cartesian_2d(lo..hi, 0u32..y_ceiling(max_count))
        .map_err(plot_err)?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15));
    if text {
        mesh.x_desc(column).y_desc("Frequency");
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(plot_err)?;

    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0u32), (b.upper, b.count as u32)], SKY_BLUE.filled())
        }))
        .map_err(plot_err)?;
    chart
        .draw_series(bins.iter().map(|b| {
            Rectangle::new([(b.lower, 0u32), (b.upper, b.count as u32)], BLACK.stroke_width(1))
        }))
        .map_err(plot_err)?;

    Ok(())
}

fn draw_bars<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    bars: &[BarCategory],
    column: &str,
    max_count: usize,
    text: bool,
) -> Result<()> {
    let n = bars.len() as u32;

    let mut chart = chart_builder(root, column, text)
        .build_cartesian_2d((0u32..n).into_segmented(), 0u32..y_ceiling(max_count))
        .map_err(plot_err)?;

    let label_for = |v: &SegmentValue<u32>| match v {
        SegmentValue::CenterOf(i) => bars
            .get(*i as usize)
            .map(|b| b.label.clone())
            .unwrap_or_default(),
        _ => String::new(),
    };

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .light_line_style(WHITE)
        .bold_line_style(BLACK.mix(0.15));
    if text {
        mesh.x_labels(bars.len())
            .x_label_formatter(&label_for)
            .x_desc(column)
            .y_desc("Frequency");
    } else {
        mesh.x_labels(0).y_labels(0);
    }
    mesh.draw().map_err(plot_err)?;

    let rect = |i: u32, count: usize, style: ShapeStyle| {
        Rectangle::new(
            [
                (SegmentValue::Exact(i), 0u32),
                (SegmentValue::Exact(i + 1), count as u32),
            ],
            style,
        )
    };
    chart
        .draw_series(
            bars.iter()
                .enumerate()
                .map(|(i, b)| rect(i as u32, b.count, SKY_BLUE.filled())),
        )
        .map_err(plot_err)?;
    chart
        .draw_series(
            bars.iter()
                .enumerate()
                .map(|(i, b)| rect(i as u32, b.count, BLACK.stroke_width(1))),
        )
        .map_err(plot_err)?;

    Ok(())
}
