use assert_approx_eq::assert_approx_eq;
use chrono::NaiveDate;
use price_chart::data::PriceTable;
use price_chart::features::{moving_average, training_rows, DerivedSeries};

fn table_with_prices(prices: Vec<f64>) -> PriceTable {
    let start = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap();
    let dates = (0..prices.len() as i64)
        .map(|i| start + chrono::Duration::days(i))
        .collect();
    PriceTable::new(dates, prices, "Close").unwrap()
}

#[test]
fn test_moving_averages_defined_exactly_when_windows_fill() {
    let prices: Vec<f64> = (0..250).map(|i| 100.0 + i as f64).collect();
    let derived = DerivedSeries::compute(&prices);

    for (series, window) in [(&derived.ma50, 50), (&derived.ma100, 100), (&derived.ma200, 200)] {
        assert!(series[window - 2].is_none(), "window {} defined too early", window);
        assert!(series[window - 1].is_some(), "window {} defined too late", window);
        assert_eq!(series.len(), prices.len());
    }

    // trailing mean of an arithmetic sequence is the midpoint value
    assert_approx_eq!(derived.ma50[49].unwrap(), 100.0 + 24.5);
    assert_approx_eq!(derived.ma200[249].unwrap(), 100.0 + 149.5);
}

#[test]
fn test_moving_average_short_series_all_undefined() {
    let ma = moving_average(&[1.0, 2.0, 3.0], 50);
    assert!(ma.iter().all(Option::is_none));
}

#[test]
fn test_training_rows_drop_only_lag_starved_rows() {
    let table = table_with_prices((0..40).map(|i| 100.0 + i as f64).collect());
    let derived = DerivedSeries::compute(table.prices());

    let rows = training_rows(&table, &derived.ma50, 30);

    // the first two rows of the 30-row slice lack lag features
    assert_eq!(rows.len(), 28);
    let first = &rows[0];
    assert_approx_eq!(first.target, 112.0);
    assert_approx_eq!(first.price_lag1, 111.0);
    assert_approx_eq!(first.price_lag2, 110.0);
    // 50-row average never becomes defined over 40 rows: guard value
    assert_approx_eq!(first.ma_ratio, 1.0);
    assert_approx_eq!(first.price_change, 1.0 / 111.0);
}

#[test]
fn test_training_rows_use_real_ma_ratio_when_defined() {
    let table = table_with_prices(vec![100.0; 80]);
    let derived = DerivedSeries::compute(table.prices());

    let rows = training_rows(&table, &derived.ma50, 30);

    assert_eq!(rows.len(), 28);
    for row in &rows {
        assert_approx_eq!(row.ma_ratio, 1.0);
        assert_approx_eq!(row.price_change, 0.0);
    }
}

#[test]
fn test_training_rows_guard_zero_prior_price() {
    let mut prices = vec![50.0; 30];
    prices[10] = 0.0;
    let table = table_with_prices(prices);
    let derived = DerivedSeries::compute(table.prices());

    let rows = training_rows(&table, &derived.ma50, 30);

    // row following the zero price must not divide by it
    let after_zero = &rows[9];
    assert_approx_eq!(after_zero.price_lag1, 0.0);
    assert_approx_eq!(after_zero.price_change, 0.0);
}

#[test]
fn test_training_rows_empty_when_table_shorter_than_lookback() {
    let table = table_with_prices(vec![1.0; 10]);
    let derived = DerivedSeries::compute(table.prices());
    assert!(training_rows(&table, &derived.ma50, 30).is_empty());
}
