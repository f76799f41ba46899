//! # CargoTrack Telemetry
//!
//! Observability for the cargo registry and its node runtime.
//!
//! ## Components
//!
//! - **Logs/Traces**: `tracing` subscriber with env filter, pretty or JSON output
//! - **Metrics**: Prometheus counters and gauges for registry activity
//!
//! ## Usage
//!
//! ```rust,ignore
//! use ct_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let _guard = init_telemetry(TelemetryConfig::from_env())?;
//!     // Registry activity is now logged and counted
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `CT_SERVICE_NAME` | `cargo-track` | Service name in logs |
//! | `CT_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `CT_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |
//! | `CT_CONSOLE_OUTPUT` | `true` | Write logs to stderr |

#![warn(missing_docs)]

mod config;
pub mod metrics;
mod tracing_setup;

pub use config::TelemetryConfig;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, ACTIVE_CARGO,
    CARGO_CREATED, CARGO_PURGED, OPERATIONS_REJECTED, OPERATION_DURATION, STATUS_UPDATES,
};
pub use tracing_setup::init_tracing;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The global subscriber could not be installed.
    #[error("Failed to initialize tracing subscriber: {0}")]
    TracerInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
///
/// # Errors
///
/// Fails if a global subscriber is already installed or the log filter does
/// not parse.
pub fn init_telemetry(config: TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early log lines can already be counted
    let metrics = register_metrics()?;
    init_tracing(&config)?;

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: MetricsHandle,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

/// Convenience macro for creating a span with registry context.
///
/// # Example
///
/// ```rust,ignore
/// let _span = registry_span!("create_cargo", cargo_id = 1);
/// ```
#[macro_export]
macro_rules! registry_span {
    ($name:expr, $($field:tt)*) => {
        tracing::info_span!($name, subsystem = "cargo-registry", $($field)*)
    };
}
