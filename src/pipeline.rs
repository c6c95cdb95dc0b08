//! The end-to-end analysis pipeline
//!
//! Loader → Normalizer → Feature Builder → Forecaster → Renderer, each stage
//! returning a `Result` that propagates to the caller; only the binary turns
//! the final error into the JSON envelope.

use crate::config::ChartConfig;
use crate::data::{self, PriceTable};
use crate::error::{AnalysisError, Result};
use crate::features::DerivedSeries;
use crate::models;
use crate::report::AnalysisReport;
use crate::chart;
use std::path::Path;

/// Run the whole pipeline once over one input file.
pub fn run<P: AsRef<Path>>(path: P, config: &ChartConfig) -> Result<AnalysisReport> {
    let raw = data::load_table(path)?;
    let table = PriceTable::from_raw(raw)?;
    if table.is_empty() {
        return Err(AnalysisError::DataError(
            "Input file contains no data rows".to_string(),
        ));
    }
    log::debug!(
        "loaded {} rows, price column '{}'",
        table.len(),
        table.price_column()
    );

    let derived = DerivedSeries::compute(table.prices());
    let forecast = models::project(&table, &derived, config)?;
    chart::render(&table, &derived, forecast.as_ref(), config)?;

    Ok(AnalysisReport::success(forecast))
}
