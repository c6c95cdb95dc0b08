//! Loading and normalizing tabular price data
//!
//! The loader materializes the whole input file into a [`RawTable`] of string
//! cells; [`PriceTable::from_raw`] then resolves the date and price columns,
//! parses values and sorts the rows chronologically.

use crate::error::{AnalysisError, Result};
use calamine::{open_workbook, DataType, Reader, Xlsx};
use chrono::NaiveDate;
use std::path::Path;

/// Explicit date formats tried, in order, when automatic inference fails.
const DATE_FORMATS: [&str; 6] = [
    "%Y-%m-%d", "%m/%d/%Y", "%d/%m/%Y", "%Y/%m/%d", "%d-%m-%Y", "%m-%d-%Y",
];

/// A fully materialized table of named string columns, as read from disk
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Column headers, exactly as they appear in the file
    pub headers: Vec<String>,
    /// Data rows; short rows are padded with empty cells on access
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Get the cell at (row, column index), treating missing cells as empty.
    fn cell(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }
}

/// Load a tabular file fully into memory.
///
/// Dispatches on the (case-insensitive) file extension; anything other than
/// `.csv` or `.xlsx` is rejected.
pub fn load_table<P: AsRef<Path>>(path: P) -> Result<RawTable> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => load_csv(path),
        "xlsx" => load_xlsx(path),
        _ => Err(AnalysisError::UnsupportedFormat),
    }
}

fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    Ok(RawTable { headers, rows })
}

fn load_xlsx(path: &Path) -> Result<RawTable> {
    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AnalysisError::DataError("Workbook contains no sheets".to_string()))??;

    let mut row_iter = range.rows();
    let headers = row_iter
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let rows = row_iter
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

/// Render a spreadsheet cell the way it would appear in a CSV export.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(s) => s.trim().to_string(),
        DataType::Int(i) => i.to_string(),
        // Integral floats render without the trailing ".0" so that numeric
        // headers or date parts survive a round trip through Excel.
        DataType::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => {
            format!("{}", *f as i64)
        }
        DataType::Float(f) => f.to_string(),
        DataType::Bool(b) => b.to_string(),
        DataType::DateTime(_) | DataType::DateTimeIso(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

/// Normalized price series: one calendar date and one price per row, sorted
/// ascending by date
#[derive(Debug, Clone)]
pub struct PriceTable {
    dates: Vec<NaiveDate>,
    prices: Vec<f64>,
    price_column: String,
}

impl PriceTable {
    /// Normalize a raw table into a chronologically sorted price series.
    ///
    /// Headers are trimmed; a column literally named `Date` is required; the
    /// price column is `Avg` when present, else `Close`. The sort is stable,
    /// so rows with duplicate dates keep their input order.
    pub fn from_raw(raw: RawTable) -> Result<Self> {
        let headers: Vec<String> = raw.headers.iter().map(|h| h.trim().to_string()).collect();

        let date_idx = headers
            .iter()
            .position(|h| h == "Date")
            .ok_or(AnalysisError::MissingDateColumn)?;

        let (price_idx, price_column) = if let Some(i) = headers.iter().position(|h| h == "Avg") {
            (i, "Avg")
        } else if let Some(i) = headers.iter().position(|h| h == "Close") {
            (i, "Close")
        } else {
            return Err(AnalysisError::MissingPriceColumn);
        };

        let date_cells: Vec<&str> = (0..raw.rows.len()).map(|r| raw.cell(r, date_idx)).collect();
        let dates = parse_date_column(&date_cells)?;

        let mut prices = Vec::with_capacity(raw.rows.len());
        for r in 0..raw.rows.len() {
            prices.push(parse_price(raw.cell(r, price_idx))?);
        }

        Self::new(dates, prices, price_column)
    }

    /// Create a price table directly from parsed rows, applying the same
    /// stable chronological sort as [`PriceTable::from_raw`].
    pub fn new(
        dates: Vec<NaiveDate>,
        prices: Vec<f64>,
        price_column: impl Into<String>,
    ) -> Result<Self> {
        if dates.len() != prices.len() {
            return Err(AnalysisError::DataError(format!(
                "Date and price columns have different lengths ({} vs {})",
                dates.len(),
                prices.len()
            )));
        }

        let mut order: Vec<usize> = (0..dates.len()).collect();
        order.sort_by_key(|&i| dates[i]);

        Ok(Self {
            dates: order.iter().map(|&i| dates[i]).collect(),
            prices: order.iter().map(|&i| prices[i]).collect(),
            price_column: price_column.into(),
        })
    }

    /// The parsed dates, ascending
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// The price values, aligned with [`PriceTable::dates`]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Name of the column the prices were taken from (`Avg` or `Close`)
    pub fn price_column(&self) -> &str {
        &self.price_column
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Parse a whole date column under the fallback cascade.
///
/// Automatic inference (chrono's `FromStr`, i.e. ISO dates) is tried first
/// over the entire column; on any failure each explicit format is tried in
/// order, and the first one that parses every value wins.
fn parse_date_column(values: &[&str]) -> Result<Vec<NaiveDate>> {
    let inferred: Option<Vec<NaiveDate>> = values
        .iter()
        .map(|v| v.trim().parse::<NaiveDate>().ok())
        .collect();
    if let Some(dates) = inferred {
        return Ok(dates);
    }

    for fmt in DATE_FORMATS {
        let parsed: Option<Vec<NaiveDate>> = values
            .iter()
            .map(|v| NaiveDate::parse_from_str(v.trim(), fmt).ok())
            .collect();
        if let Some(dates) = parsed {
            log::debug!("date column parsed with explicit format {}", fmt);
            return Ok(dates);
        }
    }

    Err(AnalysisError::DateParse)
}

/// Parse one price cell, tolerating thousands separators.
fn parse_price(value: &str) -> Result<f64> {
    let cleaned = value.trim().replace(',', "");
    cleaned
        .parse::<f64>()
        .map_err(|_| AnalysisError::DataError(format!("Could not parse price value '{}'", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_cascade_prefers_inference() {
        let dates = parse_date_column(&["2023-01-02", "2023-01-03"]).unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 2).unwrap());
    }

    #[test]
    fn date_cascade_falls_back_to_day_first() {
        // 13/01/2023 defeats both inference and %m/%d/%Y
        let dates = parse_date_column(&["13/01/2023", "14/01/2023"]).unwrap();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2023, 1, 13).unwrap());
    }

    #[test]
    fn price_parse_strips_thousands_separators() {
        assert_eq!(parse_price("1,234.5").unwrap(), 1234.5);
        assert!(parse_price("n/a").is_err());
    }
}
