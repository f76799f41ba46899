//! # Adapters Layer (Outer Hexagon)
//!
//! `NotificationSink` implementations.
//!
//! - `sinks`: no-op, recording, tracing and fan-out sinks
//! - `bus`: publishes notifications onto the shared event bus

pub mod bus;
pub mod sinks;

pub use bus::BusNotifier;
pub use sinks::{FanoutSink, NoOpSink, RecordingSink, TracingSink};
