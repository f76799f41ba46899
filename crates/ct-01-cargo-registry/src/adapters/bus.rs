//! Event bus adapter.
//!
//! Turns registry notifications into `BusMessage`s on the shared
//! `InMemoryEventBus`. Publishing is synchronous (`emit`) so the message is
//! sequenced while the registry lock is still held.

use crate::ports::outbound::NotificationSink;
use shared_bus::InMemoryEventBus;
use shared_types::CargoEvent;
use std::sync::Arc;
use tracing::trace;

/// Publishes every notification to the event bus.
#[derive(Debug, Clone)]
pub struct BusNotifier {
    bus: Arc<InMemoryEventBus>,
}

impl BusNotifier {
    #[must_use]
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }

    /// The underlying bus.
    #[must_use]
    pub fn bus(&self) -> &Arc<InMemoryEventBus> {
        &self.bus
    }
}

impl NotificationSink for BusNotifier {
    fn notify(&self, event: &CargoEvent) {
        let receivers = self.bus.emit(event.clone());
        trace!(event = event.name(), receivers, "Notification published");
    }
}
