use chrono::NaiveDate;
use price_chart::data::{load_table, PriceTable, RawTable};
use price_chart::error::AnalysisError;
use std::io::Write;

fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
    RawTable {
        headers: headers.iter().map(|h| h.to_string()).collect(),
        rows: rows
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    }
}

#[test]
fn test_load_csv_file() {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "Date,Close").unwrap();
    writeln!(file, "2023-01-02,101.5").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();

    let table = PriceTable::from_raw(load_table(file.path()).unwrap()).unwrap();

    assert_eq!(table.len(), 2);
    assert_eq!(table.price_column(), "Close");
    // rows come back sorted ascending by date
    assert_eq!(table.dates()[0], NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    assert_eq!(table.prices()[0], 100.0);
}

#[test]
fn test_unsupported_extension_is_rejected() {
    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    writeln!(file, "Date,Close").unwrap();

    let err = load_table(file.path()).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported file format. Upload CSV or XLSX.");
}

#[test]
fn test_extension_match_is_case_insensitive() {
    let mut file = tempfile::Builder::new().suffix(".CSV").tempfile().unwrap();
    writeln!(file, "Date,Close").unwrap();
    writeln!(file, "2023-01-01,100.0").unwrap();

    assert!(load_table(file.path()).is_ok());
}

#[test]
fn test_headers_are_trimmed() {
    let table = PriceTable::from_raw(raw(
        &[" Date ", "  Close"],
        &[&["2023-01-01", "100.0"]],
    ))
    .unwrap();

    assert_eq!(table.price_column(), "Close");
    assert_eq!(table.len(), 1);
}

#[test]
fn test_avg_column_preferred_over_close() {
    let table = PriceTable::from_raw(raw(
        &["Date", "Close", "Avg"],
        &[&["2023-01-01", "100.0", "99.5"]],
    ))
    .unwrap();

    assert_eq!(table.price_column(), "Avg");
    assert_eq!(table.prices()[0], 99.5);
}

#[test]
fn test_missing_date_column() {
    let err = PriceTable::from_raw(raw(&["Day", "Close"], &[&["2023-01-01", "100.0"]]))
        .unwrap_err();
    assert_eq!(err.to_string(), "Missing 'Date' column");
}

#[test]
fn test_missing_price_column() {
    let err = PriceTable::from_raw(raw(&["Date", "Open"], &[&["2023-01-01", "100.0"]]))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Missing price column. Need either 'Avg' or 'Close' column"
    );
}

#[test]
fn test_day_first_dates_parse_via_fallback_cascade() {
    // 31/01/2023 defeats ISO inference and the month-first format
    let table = PriceTable::from_raw(raw(
        &["Date", "Close"],
        &[&["31/01/2023", "100.0"], &["01/02/2023", "101.0"]],
    ))
    .unwrap();

    assert_eq!(
        table.dates(),
        &[
            NaiveDate::from_ymd_opt(2023, 1, 31).unwrap(),
            NaiveDate::from_ymd_opt(2023, 2, 1).unwrap(),
        ]
    );
}

#[test]
fn test_unparseable_dates_fail_with_descriptive_error() {
    let err = PriceTable::from_raw(raw(
        &["Date", "Close"],
        &[&["January first", "100.0"]],
    ))
    .unwrap_err();

    assert!(matches!(err, AnalysisError::DateParse));
    assert!(err.to_string().contains("Unable to parse Date column"));
}

#[test]
fn test_duplicate_dates_pass_through_in_input_order() {
    let table = PriceTable::from_raw(raw(
        &["Date", "Close"],
        &[
            &["2023-01-02", "102.0"],
            &["2023-01-01", "100.0"],
            &["2023-01-01", "101.0"],
        ],
    ))
    .unwrap();

    assert_eq!(table.len(), 3);
    // stable sort keeps 100.0 before 101.0 on the tied date
    assert_eq!(table.prices(), &[100.0, 101.0, 102.0]);
}

#[test]
fn test_prices_with_thousands_separators() {
    let table = PriceTable::from_raw(raw(
        &["Date", "Close"],
        &[&["2023-01-01", "1,234.5"]],
    ))
    .unwrap();

    assert_eq!(table.prices()[0], 1234.5);
}

#[test]
fn test_non_numeric_price_is_a_data_error() {
    let err = PriceTable::from_raw(raw(&["Date", "Close"], &[&["2023-01-01", "n/a"]]))
        .unwrap_err();
    assert!(matches!(err, AnalysisError::DataError(_)));
}

#[test]
fn test_missing_file_is_an_error() {
    assert!(load_table("does_not_exist.csv").is_err());
}

fn write_xlsx(rows: &[(&str, f64)]) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Date").unwrap();
    sheet.write_string(0, 1, "Close").unwrap();
    for (i, (date, price)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        sheet.write_string(row, 0, *date).unwrap();
        sheet.write_number(row, 1, *price).unwrap();
    }
    workbook.save(file.path()).unwrap();
    file
}

#[test]
fn test_load_xlsx_file() {
    let file = write_xlsx(&[("2023-01-02", 101.5), ("2023-01-01", 100.0)]);

    let raw = load_table(file.path()).unwrap();
    assert_eq!(raw.headers, vec!["Date", "Close"]);
    // integral numeric cells come back without a trailing ".0"
    assert_eq!(raw.rows[0], vec!["2023-01-02", "101.5"]);
    assert_eq!(raw.rows[1], vec!["2023-01-01", "100"]);

    let table = PriceTable::from_raw(raw).unwrap();
    assert_eq!(table.price_column(), "Close");
    assert_eq!(table.dates()[0], NaiveDate::from_ymd_opt(2023, 1, 1).unwrap());
    assert_eq!(table.prices(), &[100.0, 101.5]);
}

#[test]
fn test_xlsx_reads_the_first_sheet_only() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let first = workbook.add_worksheet();
    first.write_string(0, 0, "Date").unwrap();
    first.write_string(0, 1, "Avg").unwrap();
    first.write_string(1, 0, "2023-01-01").unwrap();
    first.write_number(1, 1, 99.5).unwrap();
    // a trailing sheet with unrelated headers must not shadow the first
    let second = workbook.add_worksheet();
    second.write_string(0, 0, "Notes").unwrap();
    workbook.save(file.path()).unwrap();

    let table = PriceTable::from_raw(load_table(file.path()).unwrap()).unwrap();
    assert_eq!(table.price_column(), "Avg");
    assert_eq!(table.prices(), &[99.5]);
}

#[test]
fn test_xlsx_date_cells_render_as_iso_dates() {
    let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
    let mut workbook = rust_xlsxwriter::Workbook::new();
    let date_format = rust_xlsxwriter::Format::new().set_num_format("yyyy-mm-dd");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Date").unwrap();
    sheet.write_string(0, 1, "Close").unwrap();
    for (i, day) in [2u8, 1].iter().enumerate() {
        let row = (i + 1) as u32;
        let date = rust_xlsxwriter::ExcelDateTime::from_ymd(2023, 1, *day).unwrap();
        sheet
            .write_datetime_with_format(row, 0, &date, &date_format)
            .unwrap();
        sheet.write_number(row, 1, 100.0 + *day as f64).unwrap();
    }
    workbook.save(file.path()).unwrap();

    let raw = load_table(file.path()).unwrap();
    assert_eq!(raw.rows[0][0], "2023-01-02");

    let table = PriceTable::from_raw(raw).unwrap();
    assert_eq!(
        table.dates(),
        &[
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 1, 2).unwrap(),
        ]
    );
    assert_eq!(table.prices(), &[101.0, 102.0]);
}
