//! # Identifier Allocator
//!
//! Hands out cargo ids: 1, 2, 3, ... Ids are consumed even if the cargo is
//! later purged, so an id is never seen twice.

use crate::errors::RegistryError;
use shared_types::CargoId;

/// Monotonic cargo id counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    /// A fresh allocator whose first id is 1.
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: CargoId::FIRST.get(),
        }
    }

    /// Allocator resuming at an arbitrary counter value.
    #[cfg(test)]
    pub(crate) fn starting_at(next: u64) -> Self {
        Self { next }
    }

    /// The id the next `allocate` call will return.
    #[must_use]
    pub fn peek(&self) -> CargoId {
        CargoId(self.next)
    }

    /// Returns the current id and advances the counter.
    ///
    /// # Errors
    ///
    /// `IdSpaceExhausted` once the counter cannot advance. The counter is
    /// left untouched in that case.
    pub fn allocate(&mut self) -> Result<CargoId, RegistryError> {
        let id = self.next;
        self.next = id.checked_add(1).ok_or(RegistryError::IdSpaceExhausted)?;
        Ok(CargoId(id))
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
