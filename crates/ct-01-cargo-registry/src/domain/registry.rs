//! # Cargo Registry
//!
//! Owns every live cargo record plus the id counter and the owner guard.
//!
//! ## Operation Order
//!
//! Each mutating operation runs in three phases:
//!
//! 1. **Check**: access guard, input validation, lookup, transition planning
//! 2. **Apply**: allocate / update / remove
//! 3. **Notify**: one `CargoEvent` to the sink
//!
//! Every fallible step sits in phase 1 (id allocation is the last check and
//! leaves the counter untouched on failure), so a rejected call changes nothing.

use super::access::AccessControl;
use super::allocator::IdAllocator;
use super::entities::{Cargo, RegistryConfig};
use super::state_machine::plan_transition;
use super::value_objects::{CreationPolicy, Transition};
use crate::errors::RegistryError;
use crate::ports::outbound::NotificationSink;
use shared_types::{CargoEvent, CargoId, Grams, Identity, ShippingStatus};
use std::collections::BTreeMap;
use tracing::{debug, info};

/// The cargo registry.
///
/// INVARIANTS:
/// - No record in `records` has status `DELIVERED`
/// - Every key is below `allocator.peek()`
/// - A purged id never re-enters `records`
#[derive(Debug)]
pub struct CargoRegistry {
    access: AccessControl,
    allocator: IdAllocator,
    records: BTreeMap<CargoId, Cargo>,
    creation_policy: CreationPolicy,
}

impl CargoRegistry {
    /// Creates an empty registry owned by `owner`, with open creation.
    #[must_use]
    pub fn new(owner: Identity) -> Self {
        Self::with_config(RegistryConfig::new(owner))
    }

    /// Creates an empty registry from a full configuration.
    #[must_use]
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            access: AccessControl::new(config.owner),
            allocator: IdAllocator::new(),
            records: BTreeMap::new(),
            creation_policy: config.creation_policy,
        }
    }

    #[cfg(test)]
    pub(crate) fn with_allocator(owner: Identity, allocator: IdAllocator) -> Self {
        Self {
            allocator,
            ..Self::new(owner)
        }
    }

    /// The privileged identity fixed at construction.
    #[must_use]
    pub fn owner(&self) -> Identity {
        self.access.owner()
    }

    /// Active creation policy.
    #[must_use]
    pub fn creation_policy(&self) -> CreationPolicy {
        self.creation_policy
    }

    /// Number of live records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no cargo is currently tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if `cargo_id` is live.
    #[must_use]
    pub fn contains(&self, cargo_id: CargoId) -> bool {
        self.records.contains_key(&cargo_id)
    }

    /// The id the next successful `create` will return.
    #[must_use]
    pub fn next_cargo_id(&self) -> CargoId {
        self.allocator.peek()
    }

    /// Live records in ascending id order.
    pub fn active_cargo(&self) -> impl Iterator<Item = &Cargo> + '_ {
        self.records.values()
    }

    pub(crate) fn records(&self) -> &BTreeMap<CargoId, Cargo> {
        &self.records
    }

    /// Registers a new cargo with status `RECEIVED`.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if the policy is owner-only and `caller` is not the owner
    /// - `SenderReceiverEqual` if `sender == receiver`
    /// - `InvalidWeight` if `weight == 0`
    /// - `IdSpaceExhausted` if no id is left
    pub fn create(
        &mut self,
        caller: Identity,
        sender: Identity,
        receiver: Identity,
        weight: Grams,
        sink: &dyn NotificationSink,
    ) -> Result<CargoId, RegistryError> {
        if self.creation_policy.requires_owner() {
            self.access.require_owner(&caller)?;
        }
        if sender == receiver {
            return Err(RegistryError::SenderReceiverEqual(sender));
        }
        if weight == 0 {
            return Err(RegistryError::InvalidWeight);
        }

        let cargo_id = self.allocator.allocate()?;
        self.records.insert(
            cargo_id,
            Cargo {
                cargo_id,
                sender,
                receiver,
                weight,
                shipping_status: ShippingStatus::Received,
            },
        );

        info!(%cargo_id, %sender, %receiver, weight, "Cargo received");
        sink.notify(&CargoEvent::CargoReceived {
            cargo_id,
            sender,
            receiver,
            weight,
        });

        Ok(cargo_id)
    }

    /// Moves a `RECEIVED` cargo to `IN_TRANSIT`. Owner only.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if `caller` is not the owner
    /// - `NotFound` if the id is unknown or purged
    /// - `InvalidTransition` if the cargo is not `RECEIVED`
    pub fn mark_in_transit(
        &mut self,
        caller: Identity,
        cargo_id: CargoId,
        sink: &dyn NotificationSink,
    ) -> Result<(), RegistryError> {
        self.access.require_owner(&caller)?;
        self.advance(cargo_id, ShippingStatus::InTransit, sink)
    }

    /// Marks a cargo delivered and purges its record. Owner only.
    ///
    /// The `DELIVERED` notification goes out before the record is removed.
    ///
    /// # Errors
    ///
    /// - `AccessDenied` if `caller` is not the owner
    /// - `NotFound` if the id is unknown or already purged
    pub fn mark_delivered(
        &mut self,
        caller: Identity,
        cargo_id: CargoId,
        sink: &dyn NotificationSink,
    ) -> Result<(), RegistryError> {
        self.access.require_owner(&caller)?;
        self.advance(cargo_id, ShippingStatus::Delivered, sink)
    }

    /// Returns a copy of a live record.
    ///
    /// # Errors
    ///
    /// `NotFound` if the id was never issued or has been purged.
    pub fn get_cargo_by_id(&self, cargo_id: CargoId) -> Result<Cargo, RegistryError> {
        let cargo = self
            .records
            .get(&cargo_id)
            .copied()
            .ok_or(RegistryError::NotFound(cargo_id))?;
        debug!(%cargo_id, status = %cargo.shipping_status, "Cargo read");
        Ok(cargo)
    }

    fn advance(
        &mut self,
        cargo_id: CargoId,
        to: ShippingStatus,
        sink: &dyn NotificationSink,
    ) -> Result<(), RegistryError> {
        let from = self
            .records
            .get(&cargo_id)
            .map(|cargo| cargo.shipping_status)
            .ok_or(RegistryError::NotFound(cargo_id))?;

        match plan_transition(cargo_id, from, to)? {
            Transition::Update(status) => {
                if let Some(cargo) = self.records.get_mut(&cargo_id) {
                    cargo.shipping_status = status;
                }
                info!(%cargo_id, %from, %status, "Shipping status updated");
                sink.notify(&CargoEvent::ShippingStatusUpdated { cargo_id, status });
            }
            Transition::Purge => {
                info!(%cargo_id, %from, "Cargo delivered, purging record");
                sink.notify(&CargoEvent::ShippingStatusUpdated {
                    cargo_id,
                    status: ShippingStatus::Delivered,
                });
                self.records.remove(&cargo_id);
            }
        }
        Ok(())
    }
}
