//! # Bus Messages
//!
//! Envelope, topics and filters for cargo notifications on the bus.

use serde::{Deserialize, Serialize};
use shared_types::{CargoEvent, CargoId};

/// A cargo event as delivered by the bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusMessage {
    /// Bus-wide publication order, starting at 1.
    pub sequence: u64,
    /// The notification itself.
    pub event: CargoEvent,
}

impl BusMessage {
    /// Get the topic for this message (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        EventTopic::of(&self.event)
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// `CargoReceived` notifications.
    Intake,
    /// `ShippingStatusUpdated` notifications.
    Status,
    /// All events (no filtering).
    All,
}

impl EventTopic {
    /// Topic an event is published under.
    #[must_use]
    pub fn of(event: &CargoEvent) -> Self {
        match event {
            CargoEvent::CargoReceived { .. } => Self::Intake,
            CargoEvent::ShippingStatusUpdated { .. } => Self::Status,
        }
    }
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Cargo ids to include. Empty means every cargo.
    pub cargo_ids: Vec<CargoId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            cargo_ids: Vec::new(),
        }
    }

    /// Create a filter following specific cargo.
    #[must_use]
    pub fn cargo(cargo_ids: Vec<CargoId>) -> Self {
        Self {
            topics: Vec::new(),
            cargo_ids,
        }
    }

    /// Check if a message matches this filter.
    #[must_use]
    pub fn matches(&self, message: &BusMessage) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&message.topic());

        let cargo_match =
            self.cargo_ids.is_empty() || self.cargo_ids.contains(&message.event.cargo_id());

        topic_match && cargo_match
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Identity, ShippingStatus};

    fn received(id: u64) -> BusMessage {
        BusMessage {
            sequence: id,
            event: CargoEvent::CargoReceived {
                cargo_id: CargoId(id),
                sender: Identity::repeat(0xAA),
                receiver: Identity::repeat(0xBB),
                weight: 1000,
            },
        }
    }

    fn in_transit(id: u64) -> BusMessage {
        BusMessage {
            sequence: id + 100,
            event: CargoEvent::ShippingStatusUpdated {
                cargo_id: CargoId(id),
                status: ShippingStatus::InTransit,
            },
        }
    }

    #[test]
    fn test_event_topic_mapping() {
        assert_eq!(received(1).topic(), EventTopic::Intake);
        assert_eq!(in_transit(1).topic(), EventTopic::Status);
    }

    #[test]
    fn test_filter_all() {
        let filter = EventFilter::all();
        assert!(filter.matches(&received(1)));
        assert!(filter.matches(&in_transit(1)));
    }

    #[test]
    fn test_filter_by_topic() {
        let filter = EventFilter::topics(vec![EventTopic::Status]);
        assert!(filter.matches(&in_transit(1)));
        assert!(!filter.matches(&received(1)));
    }

    #[test]
    fn test_filter_all_topic_overrides() {
        let filter = EventFilter::topics(vec![EventTopic::Intake, EventTopic::All]);
        assert!(filter.matches(&in_transit(1)));
    }

    #[test]
    fn test_filter_by_cargo() {
        let filter = EventFilter::cargo(vec![CargoId(2)]);
        assert!(filter.matches(&in_transit(2)));
        assert!(!filter.matches(&in_transit(3)));
    }
}
