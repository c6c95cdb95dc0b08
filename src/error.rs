//! Error types for the price_chart crate

use thiserror::Error;

/// Custom error types for the analysis pipeline
///
/// The message strings of the structured variants are part of the JSON
/// contract: callers match on them, so they must stay stable.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// No input file path was supplied on the command line
    #[error("File path not provided")]
    MissingArgument,

    /// The input file has an extension other than .csv or .xlsx
    #[error("Unsupported file format. Upload CSV or XLSX.")]
    UnsupportedFormat,

    /// The input table has no `Date` column
    #[error("Missing 'Date' column")]
    MissingDateColumn,

    /// The input table has neither an `Avg` nor a `Close` column
    #[error("Missing price column. Need either 'Avg' or 'Close' column")]
    MissingPriceColumn,

    /// No date format (inferred or explicit) parsed the whole `Date` column
    #[error("Unable to parse Date column. Please use standard date format (YYYY-MM-DD, MM/DD/YYYY, etc.)")]
    DateParse,

    /// Error related to data validation or processing
    #[error("Data error: {0}")]
    DataError(String),

    /// Error from mathematical operations
    #[error("Math error: {0}")]
    MathError(String),

    /// Error while rendering the chart image
    #[error("Chart rendering error: {0}")]
    ChartError(String),

    /// Error from CSV parsing
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Error from spreadsheet parsing
    #[error("Spreadsheet error: {0}")]
    SpreadsheetError(#[from] calamine::XlsxError),

    /// Error from IO operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// Error from JSON serialization
    #[error("Serialization error: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Result type with our custom error
pub type Result<T> = std::result::Result<T, AnalysisError>;
