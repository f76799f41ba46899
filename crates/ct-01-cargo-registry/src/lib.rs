//! # CT-01 Cargo Registry - Shipment Tracking Subsystem
//!
//! **Subsystem ID:** 1
//!
//! ## Purpose
//!
//! Registers cargo shipments under unique, strictly increasing ids, lets the
//! registry owner advance their shipping status, and purges each record once
//! it is delivered. Every successful change emits exactly one notification.
//!
//! ## Status Machine
//!
//! ```text
//! RECEIVED(0) --markInTransit--> IN_TRANSIT(2) --markDelivered--> DELIVERED(3) -> purged
//!     \_____________________markDelivered_____________________/
//! ```
//!
//! Status code 1 is reserved and never produced.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Ids start at 1, strictly increase, never reused | `domain/allocator.rs` - `IdAllocator::allocate()` |
//! | Only the owner advances status | `domain/access.rs` - `AccessControl::require_owner()` |
//! | No stored record is `DELIVERED` | `domain/registry.rs` - `Transition::Purge` branch |
//! | Failed calls change nothing, emit nothing | `domain/registry.rs` - check before apply |
//! | One notification per success, commit order | `service.rs` - write lock spans notify |
//!
//! ## Outbound Dependencies
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | `NotificationSink` | Receives `CargoReceived` / `ShippingStatusUpdated` |
//!
//! ## Usage Example
//!
//! ```ignore
//! use ct_01_cargo_registry::prelude::*;
//!
//! let service = CargoRegistryService::new(owner, TracingSink);
//! let id = service.create_cargo(caller, sender, receiver, 1_000).await?;
//! service.mark_in_transit(owner, id).await?;
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::cast_precision_loss)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    pub use crate::adapters::{BusNotifier, FanoutSink, NoOpSink, RecordingSink, TracingSink};
    pub use crate::domain::{
        check_all_invariants, Cargo, CargoRegistry, CreationPolicy, RegistryConfig,
    };
    pub use crate::errors::RegistryError;
    pub use crate::ports::{CargoRegistryApi, NotificationSink};
    pub use crate::service::{CargoRegistryService, ServiceStats};
    pub use shared_types::{CargoEvent, CargoId, Grams, Identity, ShippingStatus};
}

pub use domain::{Cargo, CargoRegistry, CreationPolicy, RegistryConfig};
pub use errors::RegistryError;
pub use ports::{CargoRegistryApi, NotificationSink};
pub use service::{CargoRegistryService, ServiceStats};

/// Subsystem identifier.
pub const SUBSYSTEM_ID: u8 = 1;

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Cargo Registry";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
