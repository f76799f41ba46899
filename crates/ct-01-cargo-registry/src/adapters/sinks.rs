//! Simple notification sinks.

use crate::ports::outbound::NotificationSink;
use parking_lot::Mutex;
use shared_types::CargoEvent;
use tracing::info;

/// Discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpSink;

impl NotificationSink for NoOpSink {
    fn notify(&self, _event: &CargoEvent) {}
}

/// Keeps every notification in memory, in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<CargoEvent>>,
}

impl RecordingSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<CargoEvent> {
        self.events.lock().clone()
    }

    /// Drain recorded events.
    pub fn take(&self) -> Vec<CargoEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, event: &CargoEvent) {
        self.events.lock().push(event.clone());
    }
}

/// Writes each notification as a structured `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&self, event: &CargoEvent) {
        match event {
            CargoEvent::CargoReceived {
                cargo_id,
                sender,
                receiver,
                weight,
            } => info!(
                target: "ct::notifications",
                event = event.name(),
                %cargo_id,
                %sender,
                %receiver,
                weight,
                "notification"
            ),
            CargoEvent::ShippingStatusUpdated { cargo_id, status } => info!(
                target: "ct::notifications",
                event = event.name(),
                %cargo_id,
                %status,
                "notification"
            ),
        }
    }
}

/// Forwards each notification to every inner sink, in insertion order.
#[derive(Default)]
pub struct FanoutSink {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl FanoutSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink.
    #[must_use]
    pub fn with(mut self, sink: impl NotificationSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl std::fmt::Debug for FanoutSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FanoutSink")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl NotificationSink for FanoutSink {
    fn notify(&self, event: &CargoEvent) {
        for sink in &self.sinks {
            sink.notify(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{CargoId, ShippingStatus};
    use std::sync::Arc;

    fn updated(id: u64) -> CargoEvent {
        CargoEvent::ShippingStatusUpdated {
            cargo_id: CargoId(id),
            status: ShippingStatus::InTransit,
        }
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.notify(&updated(1));
        sink.notify(&updated(2));
        assert_eq!(sink.events(), vec![updated(1), updated(2)]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_fanout_reaches_every_sink() {
        let a = Arc::new(RecordingSink::new());
        let b = Arc::new(RecordingSink::new());
        let fanout = FanoutSink::new()
            .with(Arc::clone(&a))
            .with(Arc::clone(&b))
            .with(TracingSink);

        fanout.notify(&updated(7));

        assert_eq!(fanout.len(), 3);
        assert_eq!(a.events(), vec![updated(7)]);
        assert_eq!(b.events(), vec![updated(7)]);
    }

    #[test]
    fn test_noop_sink() {
        NoOpSink.notify(&updated(1));
    }
}
