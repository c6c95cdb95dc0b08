//! Utility functions for the price_chart crate

use chrono::{Duration, NaiveDate};

/// Calendar dates continuing immediately after `last`, one per day.
///
/// No weekend or holiday skipping; predicted point *i* lands on
/// `last + i + 1` days.
pub fn future_dates(last: NaiveDate, horizon: usize) -> Vec<NaiveDate> {
    (1..=horizon as i64)
        .map(|offset| last + Duration::days(offset))
        .collect()
}
