//! # Error Types
//!
//! All error kinds a registry operation can fail with. Every failure aborts
//! the operation before any state is touched.

use shared_types::{CargoId, Identity, ShippingStatus};
use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// Creation rejected because sender and receiver are identical.
    #[error("sender and receiver cannot be the same: {0}")]
    SenderReceiverEqual(Identity),

    /// Creation rejected because weight is not positive.
    #[error("invalid weight: must be a positive number of grams")]
    InvalidWeight,

    /// The id was never issued or has been purged.
    #[error("the cargo was not found: {0}")]
    NotFound(CargoId),

    /// A non-owner invoked an owner-restricted operation.
    #[error("only the registry owner can perform this operation (caller {caller})")]
    AccessDenied {
        /// Identity that attempted the call.
        caller: Identity,
    },

    /// The requested status change is not allowed from the current status.
    #[error("invalid transition for cargo {cargo_id}: {from} -> {to}")]
    InvalidTransition {
        /// Affected cargo.
        cargo_id: CargoId,
        /// Current status.
        from: ShippingStatus,
        /// Requested status.
        to: ShippingStatus,
    },

    /// Every `u64` id has been handed out.
    #[error("cargo id space exhausted")]
    IdSpaceExhausted,
}

impl RegistryError {
    /// Stable machine-readable error code for interface layers and metrics.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::SenderReceiverEqual(_) => "SenderReceiverEqual",
            Self::InvalidWeight => "InvalidWeight",
            Self::NotFound(_) => "NotFound",
            Self::AccessDenied { .. } => "AccessDenied",
            Self::InvalidTransition { .. } => "InvalidTransition",
            Self::IdSpaceExhausted => "IdSpaceExhausted",
        }
    }

    /// Returns true if resubmitting with corrected inputs could succeed.
    ///
    /// The registry never retries on its own.
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::SenderReceiverEqual(_) | Self::InvalidWeight | Self::NotFound(_)
        )
    }
}
