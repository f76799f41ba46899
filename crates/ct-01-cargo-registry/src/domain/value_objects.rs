//! # Value Objects
//!
//! Small immutable types used by the registry's rules.

use serde::{Deserialize, Serialize};
use shared_types::ShippingStatus;
use std::fmt;
use std::str::FromStr;

/// Who may call `create`. Status changes are always owner-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CreationPolicy {
    /// Any caller may create cargo.
    #[default]
    Open,
    /// Only the owner may create cargo.
    OwnerOnly,
}

impl CreationPolicy {
    /// Returns true if `create` goes through the owner guard.
    #[must_use]
    pub fn requires_owner(self) -> bool {
        matches!(self, Self::OwnerOnly)
    }
}

impl fmt::Display for CreationPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open => f.write_str("open"),
            Self::OwnerOnly => f.write_str("owner-only"),
        }
    }
}

impl FromStr for CreationPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "owner-only" | "owner_only" | "owner" => Ok(Self::OwnerOnly),
            other => Err(format!(
                "unknown creation policy '{other}' (expected 'open' or 'owner-only')"
            )),
        }
    }
}

/// Outcome of a legal status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Record stays, status becomes the given value.
    Update(ShippingStatus),
    /// Terminal status reached: record is removed.
    Purge,
}
