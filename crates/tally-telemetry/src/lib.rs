//! # Tally Telemetry
//!
//! Logging and metrics for tally propagation runs.
//!
//! ## Components
//!
//! - **Logging**: `tracing-subscriber` with an env filter and JSON or pretty output
//! - **Metrics**: Prometheus counters fed from [`tally_fill::RunReport`]
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tally_telemetry::{init_telemetry, metrics, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::from_env())?;
//! let result = propagator.run(index);
//! metrics::record_result(&result);
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TALLY_SERVICE_NAME` | `tally` | Service name in log lines |
//! | `TALLY_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `TALLY_CONSOLE_OUTPUT` | `true` | Write logs to the console |
//! | `TALLY_JSON_LOGS` | `false` | JSON log lines |

mod config;
mod logging;
pub mod metrics;

pub use config::TelemetryConfig;
pub use logging::{build_filter, init_logging};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    #[error("Failed to initialize logger: {0}")]
    LoggerInit(String),

    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics and install the global log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    metrics::register_metrics()?;
    init_logging(config)
}
