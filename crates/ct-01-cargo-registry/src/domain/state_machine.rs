//! # Status State Machine
//!
//! ```text
//! [RECEIVED] ──→ [IN_TRANSIT] ──→ [DELIVERED]
//!      │                              ↑
//!      └──────────────────────────────┘
//! ```
//!
//! Reaching `DELIVERED` purges the record. Every other pair is illegal,
//! including self-transitions.

use super::value_objects::Transition;
use crate::errors::RegistryError;
use shared_types::{CargoId, ShippingStatus};

/// Decide what moving `cargo_id` from `from` to `to` means.
///
/// # Errors
///
/// `InvalidTransition` for any pair not drawn above.
pub fn plan_transition(
    cargo_id: CargoId,
    from: ShippingStatus,
    to: ShippingStatus,
) -> Result<Transition, RegistryError> {
    use ShippingStatus::{Delivered, InTransit, Received};

    match (from, to) {
        (Received, InTransit) => Ok(Transition::Update(InTransit)),
        (Received | InTransit, Delivered) => Ok(Transition::Purge),
        _ => Err(RegistryError::InvalidTransition { cargo_id, from, to }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ShippingStatus::{Delivered, InTransit, Received};

    const ALL: [ShippingStatus; 3] = [Received, InTransit, Delivered];
    const ID: CargoId = CargoId(1);

    #[test]
    fn test_received_to_in_transit_updates() {
        assert_eq!(
            plan_transition(ID, Received, InTransit),
            Ok(Transition::Update(InTransit))
        );
    }

    #[test]
    fn test_delivery_purges_from_any_live_status() {
        assert_eq!(plan_transition(ID, Received, Delivered), Ok(Transition::Purge));
        assert_eq!(plan_transition(ID, InTransit, Delivered), Ok(Transition::Purge));
    }

    #[test]
    fn test_in_transit_twice_is_invalid() {
        assert_eq!(
            plan_transition(ID, InTransit, InTransit),
            Err(RegistryError::InvalidTransition {
                cargo_id: ID,
                from: InTransit,
                to: InTransit
            })
        );
    }

    #[test]
    fn test_exactly_three_legal_moves() {
        let legal: Vec<_> = ALL
            .iter()
            .flat_map(|&from| ALL.iter().map(move |&to| (from, to)))
            .filter(|&(from, to)| plan_transition(ID, from, to).is_ok())
            .collect();
        assert_eq!(
            legal,
            vec![(Received, InTransit), (Received, Delivered), (InTransit, Delivered)]
        );
    }

    #[test]
    fn test_no_way_back_to_received() {
        for from in ALL {
            assert!(plan_transition(ID, from, Received).is_err());
        }
    }
}
