//! The JSON report emitted on standard output
//!
//! Exactly one JSON object is written per invocation: either the success
//! payload or an `{"error": ...}` envelope. Field names are fixed by the
//! upstream consumer of this output, hence the camelCase renames.

use crate::error::{AnalysisError, Result};
use crate::models::Forecast;
use serde::Serialize;

/// Fixed success message.
pub const SUCCESS_MESSAGE: &str = "Analysis completed";

/// The chart path reported to callers.
///
/// Always this fixed relative string, independent of where the chart was
/// actually written: the consuming side resolves the image against a static
/// `uploads/` location, and correcting the path here would break it.
pub const REPORTED_CHART_PATH: &str = "uploads/chart.png";

/// Success payload of one pipeline run
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    /// Fixed success message
    pub message: String,
    /// Relative chart location as seen by the caller
    pub chart_path: String,
    /// Predicted prices, empty when forecasting was skipped
    pub predictions: Vec<f64>,
    /// ISO dates parallel to `predictions`
    pub prediction_dates: Vec<String>,
    /// Whether `predictions` holds any values
    pub has_predictions: bool,
}

impl AnalysisReport {
    /// Build the success report, embedding the forecast when one exists.
    pub fn success(forecast: Option<Forecast>) -> Self {
        let (predictions, prediction_dates) = match forecast {
            Some(f) => {
                let dates = f
                    .dates
                    .iter()
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .collect();
                (f.values, dates)
            }
            None => (Vec::new(), Vec::new()),
        };

        Self {
            message: SUCCESS_MESSAGE.to_string(),
            chart_path: REPORTED_CHART_PATH.to_string(),
            has_predictions: !predictions.is_empty(),
            predictions,
            prediction_dates,
        }
    }

    /// Serialize to the single-line JSON written to stdout.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Render any pipeline error as the JSON error envelope.
pub fn error_json(err: &AnalysisError) -> String {
    serde_json::json!({ "error": err.to_string() }).to_string()
}
