//! # Core Domain Entities
//!
//! Primitives describing a tracked shipment.
//!
//! - **CargoId**: registry-assigned identifier, never reused
//! - **ShippingStatus**: lifecycle stage with stable wire codes
//! - **Grams**: shipment weight unit

use crate::errors::StatusCodeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Weight of a shipment in grams.
pub type Grams = u64;

/// Unique cargo identifier.
///
/// Assigned once by the registry, starting at 1 and strictly increasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CargoId(pub u64);

impl CargoId {
    /// The first id handed out by a fresh registry.
    pub const FIRST: Self = Self(1);

    /// Returns the raw numeric value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CargoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CargoId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

/// Shipping status of a cargo.
///
/// ## State Machine
///
/// ```text
/// [RECEIVED] ──mark_in_transit──→ [IN_TRANSIT] ──mark_delivered──→ [DELIVERED]
///      │                                                               ↑
///      └──────────────────────mark_delivered───────────────────────────┘
/// ```
///
/// `DELIVERED` is terminal: the record is purged the moment it is reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShippingStatus {
    /// Accepted into the registry.
    Received,
    /// Handed to the carrier.
    InTransit,
    /// Handed to the receiver. Terminal.
    Delivered,
}

/// Wire codes for `ShippingStatus`.
pub mod status_codes {
    /// `RECEIVED`.
    pub const RECEIVED: u8 = 0;
    /// Unassigned slot between `RECEIVED` and `IN_TRANSIT`.
    pub const RESERVED: u8 = 1;
    /// `IN_TRANSIT`.
    pub const IN_TRANSIT: u8 = 2;
    /// `DELIVERED`.
    pub const DELIVERED: u8 = 3;
}

impl ShippingStatus {
    /// Returns the numeric wire code.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Received => status_codes::RECEIVED,
            Self::InTransit => status_codes::IN_TRANSIT,
            Self::Delivered => status_codes::DELIVERED,
        }
    }

    /// Decodes a numeric wire code.
    ///
    /// # Errors
    ///
    /// `StatusCodeError::Reserved` for code 1, `StatusCodeError::Unknown` for
    /// anything above 3.
    pub const fn from_code(code: u8) -> Result<Self, StatusCodeError> {
        match code {
            status_codes::RECEIVED => Ok(Self::Received),
            status_codes::IN_TRANSIT => Ok(Self::InTransit),
            status_codes::DELIVERED => Ok(Self::Delivered),
            status_codes::RESERVED => Err(StatusCodeError::Reserved(code)),
            _ => Err(StatusCodeError::Unknown(code)),
        }
    }

    /// Returns true if reaching this status removes the record.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered)
    }

    /// Upper-case name used in logs and metrics labels.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Received => "RECEIVED",
            Self::InTransit => "IN_TRANSIT",
            Self::Delivered => "DELIVERED",
        }
    }
}

impl fmt::Display for ShippingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
