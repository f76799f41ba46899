//! # Cargo Events
//!
//! Notifications emitted by the registry after each successful mutation.

use crate::entities::{CargoId, Grams, ShippingStatus};
use crate::identity::Identity;
use serde::{Deserialize, Serialize};

/// All notifications the registry emits to external observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "PascalCase")]
pub enum CargoEvent {
    /// A new cargo was accepted.
    ///
    /// The id comes first so a caller can recover it from the event alone.
    CargoReceived {
        /// Newly allocated id.
        cargo_id: CargoId,
        /// Shipping party.
        sender: Identity,
        /// Receiving party.
        receiver: Identity,
        /// Weight in grams.
        weight: Grams,
    },

    /// A cargo moved to a new shipping status.
    ShippingStatusUpdated {
        /// Affected cargo.
        cargo_id: CargoId,
        /// Status after the update.
        status: ShippingStatus,
    },
}

impl CargoEvent {
    /// The cargo this event is about.
    #[must_use]
    pub fn cargo_id(&self) -> CargoId {
        match self {
            Self::CargoReceived { cargo_id, .. } | Self::ShippingStatusUpdated { cargo_id, .. } => {
                *cargo_id
            }
        }
    }

    /// Event name as observers see it.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::CargoReceived { .. } => "CargoReceived",
            Self::ShippingStatusUpdated { .. } => "ShippingStatusUpdated",
        }
    }
}
