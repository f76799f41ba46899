//! # Domain Invariants
//!
//! Invariants that MUST hold before and after every registry call.
//! They are checked over a registry snapshot by tests and, in debug builds,
//! by the service after every mutation.
//!
//! - No live record is `DELIVERED`
//! - Every live id is below the allocator's next id
//! - Map keys match the ids stored in the records
//! - `sender != receiver` and `weight > 0` for every live record

use super::registry::CargoRegistry;
use shared_types::CargoId;
use std::fmt;

/// A broken invariant found in a registry snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A terminal record was not purged.
    TerminalRecordPresent(CargoId),
    /// A live id was never handed out by the allocator.
    IdNotAllocated { cargo_id: CargoId, next: CargoId },
    /// The map key disagrees with the record's own id.
    KeyMismatch { key: CargoId, cargo_id: CargoId },
    /// Sender and receiver are the same identity.
    SenderEqualsReceiver(CargoId),
    /// Weight is zero.
    ZeroWeight(CargoId),
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TerminalRecordPresent(id) => write!(f, "cargo {id} is DELIVERED but still stored"),
            Self::IdNotAllocated { cargo_id, next } => {
                write!(f, "cargo {cargo_id} is not below next id {next}")
            }
            Self::KeyMismatch { key, cargo_id } => {
                write!(f, "record stored under {key} carries id {cargo_id}")
            }
            Self::SenderEqualsReceiver(id) => write!(f, "cargo {id} has sender == receiver"),
            Self::ZeroWeight(id) => write!(f, "cargo {id} has zero weight"),
        }
    }
}

/// Result of an invariant sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvariantCheckResult {
    /// Every violation found, in ascending id order.
    pub violations: Vec<InvariantViolation>,
}

impl InvariantCheckResult {
    /// Returns true if no invariant is broken.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Sweep every live record and collect violations.
#[must_use]
pub fn check_all_invariants(registry: &CargoRegistry) -> InvariantCheckResult {
    let next = registry.next_cargo_id();
    let mut violations = Vec::new();

    for (key, cargo) in registry.records() {
        if *key != cargo.cargo_id {
            violations.push(InvariantViolation::KeyMismatch {
                key: *key,
                cargo_id: cargo.cargo_id,
            });
        }
        if cargo.shipping_status.is_terminal() {
            violations.push(InvariantViolation::TerminalRecordPresent(*key));
        }
        if *key >= next {
            violations.push(InvariantViolation::IdNotAllocated {
                cargo_id: *key,
                next,
            });
        }
        if cargo.sender == cargo.receiver {
            violations.push(InvariantViolation::SenderEqualsReceiver(*key));
        }
        if cargo.weight == 0 {
            violations.push(InvariantViolation::ZeroWeight(*key));
        }
    }

    InvariantCheckResult { violations }
}
