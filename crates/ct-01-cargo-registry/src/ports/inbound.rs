//! # Driving Port (API - Inbound)
//!
//! The public API of the cargo registry. Interface layers (the node command
//! shim, tests, future RPC front-ends) drive the registry through this trait.
//!
//! Every mutating call names its `caller`; authorization is decided inside
//! the registry, never by the adapter.

use crate::domain::entities::Cargo;
use crate::errors::RegistryError;
use async_trait::async_trait;
use shared_types::{CargoId, Grams, Identity};

/// Cargo registry operations.
///
/// Mutations are applied one at a time in arrival order. A call that returns
/// `Err` leaves the registry and the notification stream unchanged.
#[async_trait]
pub trait CargoRegistryApi: Send + Sync {
    /// Register a new cargo and return its id.
    ///
    /// # Arguments
    ///
    /// * `caller` - Identity submitting the request
    /// * `sender` - Shipping party
    /// * `receiver` - Destination party, must differ from `sender`
    /// * `weight` - Weight in grams, must be positive
    async fn create_cargo(
        &self,
        caller: Identity,
        sender: Identity,
        receiver: Identity,
        weight: Grams,
    ) -> Result<CargoId, RegistryError>;

    /// Move a `RECEIVED` cargo to `IN_TRANSIT`. Owner only.
    async fn mark_in_transit(&self, caller: Identity, cargo_id: CargoId)
        -> Result<(), RegistryError>;

    /// Mark a cargo `DELIVERED` and purge it. Owner only.
    async fn mark_delivered(&self, caller: Identity, cargo_id: CargoId)
        -> Result<(), RegistryError>;

    /// Read a live record. Open to any caller.
    async fn get_cargo_by_id(&self, cargo_id: CargoId) -> Result<Cargo, RegistryError>;

    /// The registry owner.
    async fn owner(&self) -> Identity;
}
