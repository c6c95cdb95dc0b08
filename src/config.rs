//! Pipeline configuration
//!
//! All environment reads happen here, once, before the pipeline runs. The
//! resulting `ChartConfig` is passed explicitly through the pipeline so no
//! stage touches the environment on its own.

use std::env;
use std::path::PathBuf;

/// Environment variable overriding the chart output directory.
pub const CHART_DIR_ENV: &str = "CHART_DIR";

/// Environment variable switching the default output directory to the OS
/// temporary directory (deployment mode). Any non-empty value enables it.
pub const CHART_USE_TMP_ENV: &str = "CHART_USE_TMP";

/// Default number of future points to predict.
pub const DEFAULT_FORECAST_HORIZON: usize = 7;

/// Default number of trailing rows used to fit the forecasting model.
pub const DEFAULT_LOOKBACK_ROWS: usize = 30;

/// Configuration for one pipeline invocation
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Explicit override for the chart output directory
    pub output_dir: Option<PathBuf>,
    /// Default to the OS temporary directory when no override is set
    pub use_temp_dir: bool,
    /// Number of future points to predict
    pub forecast_horizon: usize,
    /// Number of trailing rows used to fit the forecasting model
    pub lookback_rows: usize,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            use_temp_dir: false,
            forecast_horizon: DEFAULT_FORECAST_HORIZON,
            lookback_rows: DEFAULT_LOOKBACK_ROWS,
        }
    }
}

impl ChartConfig {
    /// Build a configuration from the process environment.
    pub fn from_env() -> Self {
        Self {
            output_dir: env::var_os(CHART_DIR_ENV)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            use_temp_dir: env::var_os(CHART_USE_TMP_ENV)
                .map(|v| !v.is_empty())
                .unwrap_or(false),
            ..Self::default()
        }
    }

    /// Resolve the directory the chart image is written to.
    ///
    /// Resolution order: explicit override, OS temporary directory when the
    /// deployment flag is set, else a local `uploads` directory.
    pub fn resolve_output_dir(&self) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }
        if self.use_temp_dir {
            return env::temp_dir();
        }
        PathBuf::from("uploads")
    }
}
