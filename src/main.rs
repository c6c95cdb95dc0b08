use clap::Parser;
use price_chart::error::AnalysisError;
use price_chart::report::error_json;
use price_chart::{pipeline, ChartConfig};
use std::path::PathBuf;
use std::process::ExitCode;

/// Analyze a tabular price file: moving averages, an optional short-horizon
/// forecast, a chart image and one JSON summary on stdout.
#[derive(Parser, Debug)]
#[command(name = "price-chart", version, about)]
struct Cli {
    /// Path to the input CSV or XLSX price file
    input: Option<PathBuf>,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr; stdout carries exactly one JSON object.
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let cli = Cli::parse();
    let config = ChartConfig::from_env();

    let outcome = match cli.input {
        Some(path) => pipeline::run(&path, &config),
        None => Err(AnalysisError::MissingArgument),
    };

    match outcome.and_then(|report| report.to_json()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("analysis failed: {}", err);
            println!("{}", error_json(&err));
            ExitCode::FAILURE
        }
    }
}
