//! # price_chart
//!
//! A small library and CLI that ingests a tabular price file (CSV or XLSX),
//! computes 50/100/200-row trailing moving averages, optionally fits a linear
//! model over a trailing feature window to project a few days forward, and
//! renders a chart image plus a single JSON summary on standard output.
//!
//! ## Pipeline
//!
//! Loader → Normalizer → Feature Builder → Forecaster → Renderer → Reporter,
//! executed once per invocation with no state carried across runs.
//!
//! ## Quick Start
//!
//! ```no_run
//! use price_chart::{pipeline, ChartConfig};
//!
//! let config = ChartConfig::default();
//! let report = pipeline::run("prices.csv", &config)?;
//! println!("{}", report.to_json()?);
//! # Ok::<(), price_chart::AnalysisError>(())
//! ```

pub mod chart;
pub mod config;
pub mod data;
pub mod error;
pub mod features;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod utils;

// Re-export commonly used types
pub use crate::config::ChartConfig;
pub use crate::data::{PriceTable, RawTable};
pub use crate::error::{AnalysisError, Result};
pub use crate::features::DerivedSeries;
pub use crate::models::Forecast;
pub use crate::report::AnalysisReport;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
