//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions for the cargo registry.
//!
//! - **Driving Port (Inbound)**: `CargoRegistryApi`
//! - **Driven Port (Outbound)**: `NotificationSink`
//! - No concrete implementations in this module

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
