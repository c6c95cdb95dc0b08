//! Chart rendering
//!
//! One PNG per run, always named `chart.png` inside the resolved output
//! directory; a previous chart at the same path is overwritten. With a
//! forecast the figure has two stacked panels (full history, then the recent
//! tail plus the predicted points); without one it is a single history panel.

use crate::config::ChartConfig;
use crate::data::PriceTable;
use crate::error::{AnalysisError, Result};
use crate::features::DerivedSeries;
use crate::models::Forecast;
use chrono::{Duration, NaiveDate};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed name of the rendered chart file.
pub const CHART_FILE_NAME: &str = "chart.png";

/// Number of trailing historical points shown next to the forecast.
const FORECAST_CONTEXT_ROWS: usize = 10;

const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PURPLE: RGBColor = RGBColor(128, 0, 128);
const GRAY: RGBColor = RGBColor(128, 128, 128);

fn chart_err<E: std::fmt::Display>(err: E) -> AnalysisError {
    AnalysisError::ChartError(err.to_string())
}

/// Render the analysis chart and return the path it was written to.
pub fn render(
    table: &PriceTable,
    derived: &DerivedSeries,
    forecast: Option<&Forecast>,
    config: &ChartConfig,
) -> Result<PathBuf> {
    if table.is_empty() {
        return Err(AnalysisError::ChartError(
            "Cannot render a chart from an empty price table".to_string(),
        ));
    }

    let dir = config.resolve_output_dir();
    fs::create_dir_all(&dir)?;
    let path = dir.join(CHART_FILE_NAME);

    match forecast {
        Some(f) if !f.is_empty() => draw_two_panel(&path, table, derived, f)?,
        _ => draw_single_panel(&path, table, derived)?,
    }

    log::info!("chart written to {}", path.display());
    Ok(path)
}

fn draw_single_panel(path: &Path, table: &PriceTable, derived: &DerivedSeries) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    history_panel(&root, table, derived)?;
    root.present().map_err(chart_err)?;
    Ok(())
}

fn draw_two_panel(
    path: &Path,
    table: &PriceTable,
    derived: &DerivedSeries,
    forecast: &Forecast,
) -> Result<()> {
    let root = BitMapBackend::new(path, (1200, 1000)).into_drawing_area();
    root.fill(&WHITE).map_err(chart_err)?;
    let (upper, lower) = root.split_vertically(500);

    history_panel(&upper, table, derived)?;
    forecast_panel(&lower, table, forecast)?;

    root.present().map_err(chart_err)?;
    Ok(())
}

/// Price history plus the three moving averages.
fn history_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    table: &PriceTable,
    derived: &DerivedSeries,
) -> Result<()> {
    let dates = table.dates();
    let (x0, x1) = date_span(dates[0], dates[dates.len() - 1]);
    let (y0, y1) = value_span(
        table
            .prices()
            .iter()
            .copied()
            .chain(defined(&derived.ma50))
            .chain(defined(&derived.ma100))
            .chain(defined(&derived.ma200)),
    );

    let mut chart = ChartBuilder::on(area)
        .caption("Stock Price Analysis with Moving Averages", ("sans-serif", 24))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(format!("{} Price", table.price_column()))
        .draw()
        .map_err(chart_err)?;

    let price_points: Vec<(NaiveDate, f64)> = dates
        .iter()
        .copied()
        .zip(table.prices().iter().copied())
        .collect();
    chart
        .draw_series(LineSeries::new(price_points, BLUE.stroke_width(2)))
        .map_err(chart_err)?
        .label(format!("{} Price", table.price_column()))
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    let averages = [
        (&derived.ma50, ORANGE, "50 DMA"),
        (&derived.ma100, GREEN, "100 DMA"),
        (&derived.ma200, RED, "200 DMA"),
    ];
    for (series, color, label) in averages {
        let points = defined_points(dates, series);
        if points.is_empty() {
            continue;
        }
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(1)))
            .map_err(chart_err)?
            .label(label)
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 18, y)], color.stroke_width(2))
            });
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    Ok(())
}

/// Recent actual prices, the predicted points and a connecting segment.
fn forecast_panel(
    area: &DrawingArea<BitMapBackend, Shift>,
    table: &PriceTable,
    forecast: &Forecast,
) -> Result<()> {
    let dates = table.dates();
    let prices = table.prices();
    let tail = table.len().saturating_sub(FORECAST_CONTEXT_ROWS);

    let recent: Vec<(NaiveDate, f64)> = dates[tail..]
        .iter()
        .copied()
        .zip(prices[tail..].iter().copied())
        .collect();

    let (x0, x1) = date_span(recent[0].0, forecast.dates[forecast.len() - 1]);
    let (y0, y1) = value_span(
        recent
            .iter()
            .map(|&(_, v)| v)
            .chain(forecast.values.iter().copied()),
    );

    let mut chart = ChartBuilder::on(area)
        .caption(
            format!(
                "{}-Day Price Prediction (Linear Regression Model)",
                forecast.len()
            ),
            ("sans-serif", 24),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(chart_err)?;

    chart
        .configure_mesh()
        .x_desc("Date")
        .y_desc(format!("Predicted {} Price", table.price_column()))
        .draw()
        .map_err(chart_err)?;

    let last_actual = recent[recent.len() - 1];
    chart
        .draw_series(LineSeries::new(recent, BLUE.stroke_width(2)))
        .map_err(chart_err)?
        .label("Recent Actual Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], BLUE.stroke_width(2)));

    // visual link from the last observed point to the first predicted one
    let first_predicted = (forecast.dates[0], forecast.values[0]);
    chart
        .draw_series(LineSeries::new(
            vec![last_actual, first_predicted],
            GRAY.stroke_width(1),
        ))
        .map_err(chart_err)?;

    let predicted: Vec<(NaiveDate, f64)> = forecast.points().collect();
    chart
        .draw_series(LineSeries::new(predicted.clone(), PURPLE.stroke_width(2)))
        .map_err(chart_err)?
        .label("Predicted Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 18, y)], PURPLE.stroke_width(2)));
    chart
        .draw_series(
            predicted
                .into_iter()
                .map(|point| Circle::new(point, 4, PURPLE.filled())),
        )
        .map_err(chart_err)?;

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(chart_err)?;

    Ok(())
}

fn defined(series: &[Option<f64>]) -> impl Iterator<Item = f64> + '_ {
    series.iter().filter_map(|v| *v)
}

fn defined_points(dates: &[NaiveDate], series: &[Option<f64>]) -> Vec<(NaiveDate, f64)> {
    dates
        .iter()
        .zip(series)
        .filter_map(|(d, v)| v.map(|value| (*d, value)))
        .collect()
}

/// Widen a degenerate single-day span so the axis always has extent.
fn date_span(first: NaiveDate, last: NaiveDate) -> (NaiveDate, NaiveDate) {
    if first == last {
        (first, last + Duration::days(1))
    } else {
        (first, last)
    }
}

/// Min/max with a 5% margin; a flat series gets a unit margin.
fn value_span(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for v in values {
        lo = lo.min(v);
        hi = hi.max(v);
    }
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}
