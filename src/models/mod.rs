//! Forecasting over the trailing feature window
//!
//! The projection mirrors the training features step by step: each predicted
//! point feeds the lag features of the next one, while the 50-row average and
//! the second-to-last actual price stay frozen at their last observed values.

pub mod linear;
pub mod scaler;

pub use linear::LinearModel;
pub use scaler::MinMaxScaler;

use crate::config::ChartConfig;
use crate::data::PriceTable;
use crate::error::Result;
use crate::features::{self, DerivedSeries};
use crate::utils;
use chrono::NaiveDate;

/// Minimum number of clean feature rows required to fit the model.
pub const MIN_TRAINING_ROWS: usize = 10;

/// A short-horizon price forecast
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Predicted prices, in chronological order
    pub values: Vec<f64>,
    /// Calendar dates of the predictions, continuing the observed series
    pub dates: Vec<NaiveDate>,
}

impl Forecast {
    /// Number of predicted points
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the forecast holds no points
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// (date, value) pairs in chronological order.
    pub fn points(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates.iter().copied().zip(self.values.iter().copied())
    }
}

/// Fit the linear model on the trailing rows and project future points.
///
/// Returns `Ok(None)` when the table is too short or too few clean feature
/// rows survive; skipping the forecast is not an error, the chart-only path
/// still succeeds.
pub fn project(
    table: &PriceTable,
    derived: &DerivedSeries,
    config: &ChartConfig,
) -> Result<Option<Forecast>> {
    if table.len() < config.lookback_rows || table.len() < 2 {
        log::debug!(
            "skipping forecast: {} rows, need {}",
            table.len(),
            config.lookback_rows
        );
        return Ok(None);
    }

    let rows = features::training_rows(table, &derived.ma50, config.lookback_rows);
    if rows.len() < MIN_TRAINING_ROWS {
        log::debug!(
            "skipping forecast: {} clean feature rows, need {}",
            rows.len(),
            MIN_TRAINING_ROWS
        );
        return Ok(None);
    }

    let x: Vec<Vec<f64>> = rows.iter().map(|r| r.features().to_vec()).collect();
    let y: Vec<f64> = rows.iter().map(|r| r.target).collect();

    let scaler_x = MinMaxScaler::fit(&x);
    let scaler_y = MinMaxScaler::fit_column(&y);
    let x_scaled: Vec<Vec<f64>> = x.iter().map(|r| scaler_x.transform(r)).collect();
    let y_scaled: Vec<f64> = y.iter().map(|&v| scaler_y.transform_value(v)).collect();

    let model = LinearModel::fit(&x_scaled, &y_scaled)?;

    let prices = table.prices();
    let n = prices.len();
    let last_price = prices[n - 1];
    let second_last_price = prices[n - 2];
    let last_ma50 = derived.ma50[n - 1];

    let mut values: Vec<f64> = Vec::with_capacity(config.forecast_horizon);
    for step in 0..config.forecast_horizon {
        let price_lag1 = if step == 0 { last_price } else { values[step - 1] };
        let price_lag2 = match step {
            0 => second_last_price,
            1 => last_price,
            _ => values[step - 2],
        };
        let ma_ratio = match last_ma50 {
            Some(ma) if ma > 0.0 => price_lag1 / ma,
            _ => 1.0,
        };
        let price_change = if second_last_price > 0.0 {
            (price_lag1 - second_last_price) / second_last_price
        } else {
            0.0
        };

        let scaled = scaler_x.transform(&[price_lag1, price_lag2, ma_ratio, price_change]);
        values.push(scaler_y.inverse_value(model.predict(&scaled)));
    }

    let dates = utils::future_dates(table.dates()[n - 1], config.forecast_horizon);
    Ok(Some(Forecast { values, dates }))
}
