//! # Domain Layer - Cargo Registry
//!
//! Pure, synchronous business logic. Nothing in here locks, awaits or logs
//! beyond `tracing` events; the service layer adds synchronization.
//!
//! ## Components
//!
//! - `entities`: Cargo record and registry configuration
//! - `value_objects`: CreationPolicy, Transition
//! - `allocator`: IdAllocator (strictly increasing, never reused ids)
//! - `access`: AccessControl (single fixed owner)
//! - `state_machine`: shipping status transition rules
//! - `registry`: CargoRegistry tying the above together
//! - `invariants`: runtime invariant checks over a registry snapshot

pub mod access;
pub mod allocator;
pub mod entities;
pub mod invariants;
pub mod registry;
pub mod state_machine;
pub mod value_objects;

pub use access::AccessControl;
pub use allocator::IdAllocator;
pub use entities::*;
pub use invariants::{check_all_invariants, InvariantCheckResult, InvariantViolation};
pub use registry::CargoRegistry;
pub use state_machine::plan_transition;
pub use value_objects::*;
