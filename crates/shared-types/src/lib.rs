//! # Shared Types Crate
//!
//! This crate contains the primitives exchanged between the cargo registry,
//! the event bus and any interface layer placed in front of them.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Identity`, `CargoId`, `ShippingStatus` and
//!   `CargoEvent` are defined here and nowhere else.
//! - **Stable Wire Codes**: shipping statuses keep fixed numeric codes
//!   (`RECEIVED = 0`, `IN_TRANSIT = 2`, `DELIVERED = 3`); code 1 stays reserved.

pub mod entities;
pub mod errors;
pub mod events;
pub mod identity;

pub use entities::*;
pub use errors::*;
pub use events::*;
pub use identity::Identity;
