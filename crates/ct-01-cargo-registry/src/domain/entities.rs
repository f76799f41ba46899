//! # Domain Entities
//!
//! The cargo record and the configuration a registry is built from.

use super::value_objects::CreationPolicy;
use serde::{Deserialize, Serialize};
use shared_types::{CargoId, Grams, Identity, ShippingStatus};

/// One tracked shipment.
///
/// Lives in the registry only while its status is non-terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cargo {
    /// Registry-assigned id.
    pub cargo_id: CargoId,
    /// Shipping party.
    pub sender: Identity,
    /// Receiving party. Never equal to `sender`.
    pub receiver: Identity,
    /// Weight in grams. Always positive.
    pub weight: Grams,
    /// Current lifecycle stage.
    pub shipping_status: ShippingStatus,
}

/// Registry construction parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// The single privileged identity. Fixed for the registry's lifetime.
    pub owner: Identity,
    /// Who may create cargo.
    pub creation_policy: CreationPolicy,
}

impl RegistryConfig {
    /// Configuration with the default (open) creation policy.
    #[must_use]
    pub fn new(owner: Identity) -> Self {
        Self {
            owner,
            creation_policy: CreationPolicy::default(),
        }
    }

    /// Builder-style override of the creation policy.
    #[must_use]
    pub fn with_creation_policy(mut self, creation_policy: CreationPolicy) -> Self {
        self.creation_policy = creation_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cargo_json_shape() {
        let cargo = Cargo {
            cargo_id: CargoId(1),
            sender: Identity::repeat(0xAA),
            receiver: Identity::repeat(0xBB),
            weight: 1000,
            shipping_status: ShippingStatus::Received,
        };
        let value = serde_json::to_value(cargo).unwrap();
        assert_eq!(value["cargo_id"], 1);
        assert_eq!(value["sender"], "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa");
        assert_eq!(value["shipping_status"], "RECEIVED");
    }

    #[test]
    fn test_config_defaults_to_open() {
        let config = RegistryConfig::new(Identity::repeat(1));
        assert_eq!(config.creation_policy, CreationPolicy::Open);
        let config = config.with_creation_policy(CreationPolicy::OwnerOnly);
        assert!(config.creation_policy.requires_owner());
    }
}
