//! # Access Control
//!
//! Single-owner guard invoked at the top of every restricted operation.

use crate::errors::RegistryError;
use shared_types::Identity;

/// Holds the owner identity fixed at construction.
///
/// Ownership cannot be transferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccessControl {
    owner: Identity,
}

impl AccessControl {
    /// Fix `owner` as the privileged identity.
    #[must_use]
    pub const fn new(owner: Identity) -> Self {
        Self { owner }
    }

    /// The privileged identity.
    #[must_use]
    pub const fn owner(&self) -> Identity {
        self.owner
    }

    /// Returns true if `caller` is the owner.
    #[must_use]
    pub fn is_owner(&self, caller: &Identity) -> bool {
        self.owner == *caller
    }

    /// Fails with `AccessDenied` unless `caller` is the owner.
    ///
    /// # Errors
    ///
    /// `RegistryError::AccessDenied` carrying the rejected caller.
    pub fn require_owner(&self, caller: &Identity) -> Result<(), RegistryError> {
        if self.is_owner(caller) {
            Ok(())
        } else {
            Err(RegistryError::AccessDenied { caller: *caller })
        }
    }
}
