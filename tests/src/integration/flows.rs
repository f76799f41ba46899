//! # Lifecycle Flows
//!
//! The registry service wired to the event bus the same way the node does
//! it, observed from a bus subscriber.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::time::timeout;

    use ct_01_cargo_registry::prelude::*;
    use shared_bus::{BusMessage, EventFilter, EventTopic, InMemoryEventBus, Subscription};

    const OWNER: Identity = Identity::repeat(0x01);
    const ALICE: Identity = Identity::repeat(0xAA);
    const BOB: Identity = Identity::repeat(0xBB);

    fn setup() -> (Arc<InMemoryEventBus>, CargoRegistryService<BusNotifier>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let service = CargoRegistryService::new(OWNER, BusNotifier::new(Arc::clone(&bus)));
        (bus, service)
    }

    async fn next(sub: &mut Subscription) -> BusMessage {
        timeout(Duration::from_millis(200), sub.recv())
            .await
            .expect("timeout waiting for event")
            .expect("bus closed")
    }

    fn assert_quiet(sub: &mut Subscription) {
        assert_eq!(sub.try_recv().map(|m| m.is_some()), Ok(false));
    }

    // =========================================================================
    // SCENARIOS
    // =========================================================================

    /// Owner creates, moves to transit, then delivers. The record disappears.
    #[tokio::test]
    async fn test_full_lifecycle_emits_three_events() {
        let (bus, service) = setup();
        let mut sub = bus.subscribe(EventFilter::all());

        let id = service.create_cargo(OWNER, ALICE, BOB, 1000).await.unwrap();
        assert_eq!(id, CargoId(1));
        service.mark_in_transit(OWNER, id).await.unwrap();
        service.mark_delivered(OWNER, id).await.unwrap();

        assert_eq!(
            next(&mut sub).await.event,
            CargoEvent::CargoReceived {
                cargo_id: id,
                sender: ALICE,
                receiver: BOB,
                weight: 1000,
            }
        );
        assert_eq!(
            next(&mut sub).await.event,
            CargoEvent::ShippingStatusUpdated {
                cargo_id: id,
                status: ShippingStatus::InTransit,
            }
        );
        assert_eq!(
            next(&mut sub).await.event,
            CargoEvent::ShippingStatusUpdated {
                cargo_id: id,
                status: ShippingStatus::Delivered,
            }
        );
        assert_eq!(
            service.get_cargo_by_id(id).await,
            Err(RegistryError::NotFound(id))
        );
    }

    /// A stranger may create but cannot move the cargo.
    #[tokio::test]
    async fn test_stranger_creates_but_cannot_advance() {
        let (bus, service) = setup();
        let id = service.create_cargo(ALICE, ALICE, BOB, 5).await.unwrap();
        let mut sub = bus.subscribe(EventFilter::all());

        assert_eq!(
            service.mark_in_transit(ALICE, id).await,
            Err(RegistryError::AccessDenied { caller: ALICE })
        );
        assert_eq!(
            service.get_cargo_by_id(id).await.unwrap().shipping_status,
            ShippingStatus::Received
        );
        assert_quiet(&mut sub);
    }

    /// Delivering straight from RECEIVED is allowed.
    #[tokio::test]
    async fn test_direct_delivery() {
        let (bus, service) = setup();
        let id = service.create_cargo(OWNER, ALICE, BOB, 5).await.unwrap();
        let mut sub = bus.subscribe(EventFilter::topics(vec![EventTopic::Status]));

        service.mark_delivered(OWNER, id).await.unwrap();

        assert_eq!(
            next(&mut sub).await.event,
            CargoEvent::ShippingStatusUpdated {
                cargo_id: id,
                status: ShippingStatus::Delivered,
            }
        );
        assert_eq!(service.active_count().await, 0);
    }

    /// Invalid input leaves the registry and bus untouched and does not burn an id.
    #[tokio::test]
    async fn test_invalid_input_is_atomic() {
        let (bus, service) = setup();
        let mut sub = bus.subscribe(EventFilter::all());

        assert_eq!(
            service.create_cargo(OWNER, ALICE, ALICE, 10).await,
            Err(RegistryError::SenderReceiverEqual(ALICE))
        );
        assert_eq!(
            service.create_cargo(OWNER, ALICE, BOB, 0).await,
            Err(RegistryError::InvalidWeight)
        );
        assert_quiet(&mut sub);

        assert_eq!(service.create_cargo(OWNER, ALICE, BOB, 1).await, Ok(CargoId(1)));
    }

    /// Repeated transitions fail without side effects.
    #[tokio::test]
    async fn test_repeated_transitions_rejected() {
        let (bus, service) = setup();
        let id = service.create_cargo(OWNER, ALICE, BOB, 10).await.unwrap();
        service.mark_in_transit(OWNER, id).await.unwrap();
        let mut sub = bus.subscribe(EventFilter::all());

        assert!(matches!(
            service.mark_in_transit(OWNER, id).await,
            Err(RegistryError::InvalidTransition { .. })
        ));
        service.mark_delivered(OWNER, id).await.unwrap();
        assert_eq!(
            service.mark_delivered(OWNER, id).await,
            Err(RegistryError::NotFound(id))
        );

        assert_eq!(next(&mut sub).await.event.name(), "ShippingStatusUpdated");
        assert_quiet(&mut sub);
    }

    /// Cargo-scoped subscribers only see their own cargo.
    #[tokio::test]
    async fn test_cargo_filter() {
        let (bus, service) = setup();
        let mut sub = bus.subscribe(EventFilter::cargo(vec![CargoId(2)]));

        for _ in 0..3 {
            service.create_cargo(OWNER, ALICE, BOB, 10).await.unwrap();
        }
        service.mark_in_transit(OWNER, CargoId(1)).await.unwrap();
        service.mark_in_transit(OWNER, CargoId(2)).await.unwrap();

        assert_eq!(next(&mut sub).await.event.cargo_id(), CargoId(2));
        let second = next(&mut sub).await;
        assert_eq!(
            second.event,
            CargoEvent::ShippingStatusUpdated {
                cargo_id: CargoId(2),
                status: ShippingStatus::InTransit,
            }
        );
        assert_quiet(&mut sub);
    }

    /// The bus sequence numbers follow commit order.
    #[tokio::test]
    async fn test_stream_sequence_is_commit_order() {
        use tokio_stream::StreamExt;

        let (bus, service) = setup();
        let stream = bus.event_stream(EventFilter::all());

        let a = service.create_cargo(OWNER, ALICE, BOB, 1).await.unwrap();
        let b = service.create_cargo(OWNER, BOB, ALICE, 2).await.unwrap();
        service.mark_delivered(OWNER, a).await.unwrap();
        service.mark_in_transit(OWNER, b).await.unwrap();

        let messages: Vec<BusMessage> = timeout(Duration::from_millis(200), stream.take(4).collect())
            .await
            .expect("timeout collecting stream");
        let sequences: Vec<u64> = messages.iter().map(|m| m.sequence).collect();
        assert!(sequences.windows(2).all(|w| w[0] < w[1]));
        let ids: Vec<u64> = messages.iter().map(|m| m.event.cargo_id().get()).collect();
        assert_eq!(ids, vec![1, 2, 1, 2]);
    }
}
