//! # Driven Port (SPI - Outbound)
//!
//! Where the registry sends its notifications. Adapters decide what a
//! notification turns into: a bus message, a log line, a test recording.

use shared_types::CargoEvent;

/// Receives one event per successful mutation, in commit order.
///
/// Called while the registry is still exclusively held, so implementations
/// must not block and must not call back into the registry.
pub trait NotificationSink: Send + Sync {
    /// Deliver a single event.
    fn notify(&self, event: &CargoEvent);
}

impl<T: NotificationSink + ?Sized> NotificationSink for std::sync::Arc<T> {
    fn notify(&self, event: &CargoEvent) {
        (**self).notify(event);
    }
}
