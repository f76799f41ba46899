//! Prometheus metrics for the cargo registry.
//!
//! All metrics follow the naming convention: `ct_registry_<metric>_<unit>`
//!
//! ## Metric Types
//!
//! - **Counter**: Monotonically increasing value (e.g., cargo_created_total)
//! - **Gauge**: Value that can go up or down (e.g., active_cargo)
//! - **Histogram**: Distribution of values (e.g., operation_duration_seconds)

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Gauge, Histogram, HistogramOpts,
    HistogramVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total cargo records created
    pub static ref CARGO_CREATED: Counter = Counter::new(
        "ct_registry_cargo_created_total",
        "Total number of cargo records created"
    ).expect("metric creation failed");

    /// Status updates by resulting status
    pub static ref STATUS_UPDATES: CounterVec = CounterVec::new(
        Opts::new("ct_registry_status_updates_total", "Total shipping status updates"),
        &["status"]  // IN_TRANSIT / DELIVERED
    ).expect("metric creation failed");

    /// Records purged on delivery
    pub static ref CARGO_PURGED: Counter = Counter::new(
        "ct_registry_cargo_purged_total",
        "Total number of cargo records purged on delivery"
    ).expect("metric creation failed");

    /// Rejected operations by operation and error code
    pub static ref OPERATIONS_REJECTED: CounterVec = CounterVec::new(
        Opts::new("ct_registry_operations_rejected_total", "Total rejected registry operations"),
        &["operation", "reason"]
    ).expect("metric creation failed");

    /// Records currently held
    pub static ref ACTIVE_CARGO: Gauge = Gauge::new(
        "ct_registry_active_cargo",
        "Number of cargo records currently in the registry"
    ).expect("metric creation failed");

    /// Time spent per registry operation
    pub static ref OPERATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "ct_registry_operation_duration_seconds",
            "Time spent executing registry operations"
        ).buckets(exponential_buckets(0.000_001, 4.0, 10).unwrap_or_default()),
        &["operation"]
    ).expect("metric creation failed");
}

/// Handle for registered metrics.
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Calling this more than once is harmless.
///
/// # Errors
///
/// `TelemetryError::MetricsInit` if a metric clashes with a differently
/// shaped one already registered.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(CARGO_CREATED.clone()),
        Box::new(STATUS_UPDATES.clone()),
        Box::new(CARGO_PURGED.clone()),
        Box::new(OPERATIONS_REJECTED.clone()),
        Box::new(ACTIVE_CARGO.clone()),
        Box::new(OPERATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
///
/// Registers the metrics first, so the output is complete even when
/// telemetry was never initialised.
///
/// # Errors
///
/// `TelemetryError::MetricsInit` if registration or encoding fails.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    register_metrics()?;
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    #[must_use]
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }

    /// Start a timer for one registry operation.
    #[must_use]
    pub fn operation(name: &str) -> Self {
        Self::new(&OPERATION_DURATION.with_label_values(&[name]))
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}
