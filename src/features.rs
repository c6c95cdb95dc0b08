//! Derived series and forecasting features
//!
//! Rolling means are aligned 1:1 with the price rows; positions where the
//! window is not yet full hold `None`, never a placeholder number.

use crate::data::PriceTable;

/// Window sizes of the three trailing moving averages.
pub const MA_WINDOWS: [usize; 3] = [50, 100, 200];

/// Trailing simple moving average of `prices` over `window` rows.
///
/// Index `i` is defined iff at least `window` observations exist up to and
/// including row `i`, i.e. starting at index `window - 1`.
pub fn moving_average(prices: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; prices.len()];
    }

    let mut out = Vec::with_capacity(prices.len());
    let mut running = 0.0;

    for (i, &price) in prices.iter().enumerate() {
        running += price;
        if i + 1 >= window {
            out.push(Some(running / window as f64));
            running -= prices[i + 1 - window];
        } else {
            out.push(None);
        }
    }

    out
}

/// The three moving-average series derived from a price table
#[derive(Debug, Clone)]
pub struct DerivedSeries {
    /// 50-row trailing mean
    pub ma50: Vec<Option<f64>>,
    /// 100-row trailing mean
    pub ma100: Vec<Option<f64>>,
    /// 200-row trailing mean
    pub ma200: Vec<Option<f64>>,
}

impl DerivedSeries {
    /// Compute all three moving averages over the price column.
    pub fn compute(prices: &[f64]) -> Self {
        Self {
            ma50: moving_average(prices, MA_WINDOWS[0]),
            ma100: moving_average(prices, MA_WINDOWS[1]),
            ma200: moving_average(prices, MA_WINDOWS[2]),
        }
    }
}

/// One clean training observation for the forecasting model
#[derive(Debug, Clone, Copy)]
pub struct FeatureRow {
    /// Price one row back
    pub price_lag1: f64,
    /// Price two rows back
    pub price_lag2: f64,
    /// Price divided by the 50-row moving average (1.0 when the average is
    /// undefined or non-positive)
    pub ma_ratio: f64,
    /// Percent change from the previous row's price (0.0 when that price is
    /// non-positive)
    pub price_change: f64,
    /// The price at this row, the regression target
    pub target: f64,
}

impl FeatureRow {
    /// The feature values in model column order.
    pub fn features(&self) -> [f64; 4] {
        [self.price_lag1, self.price_lag2, self.ma_ratio, self.price_change]
    }
}

/// Build training rows over the trailing `lookback` rows of the table.
///
/// The first two rows of the slice lack lag features and are dropped; the
/// division guards keep every remaining row usable, so an input where the
/// 50-row average never becomes defined still yields training data.
pub fn training_rows(
    table: &PriceTable,
    ma50: &[Option<f64>],
    lookback: usize,
) -> Vec<FeatureRow> {
    let prices = table.prices();
    let n = prices.len();
    if n < lookback {
        return Vec::new();
    }

    let start = n - lookback;
    let mut rows = Vec::with_capacity(lookback.saturating_sub(2));

    for i in (start + 2)..n {
        let prev = prices[i - 1];
        let ma_ratio = match ma50[i] {
            Some(ma) if ma > 0.0 => prices[i] / ma,
            _ => 1.0,
        };
        let price_change = if prev > 0.0 {
            (prices[i] - prev) / prev
        } else {
            0.0
        };

        rows.push(FeatureRow {
            price_lag1: prev,
            price_lag2: prices[i - 2],
            ma_ratio,
            price_change,
            target: prices[i],
        });
    }

    rows
}
