//! # Node Runtime
//!
//! Wires the registry to the outside world.
//!
//! ```text
//! shim ──> CargoRegistryService ──> FanoutSink ──┬──> BusNotifier ──> InMemoryEventBus ──> observer
//!                                                └──> TracingSink
//! ```

use crate::config::NodeConfig;
use crate::shim::CommandHandler;
use ct_01_cargo_registry::adapters::{BusNotifier, FanoutSink, TracingSink};
use ct_01_cargo_registry::CargoRegistryService;
use shared_bus::{BusMessage, EventFilter, EventPublisher, InMemoryEventBus, Subscription};
use shared_types::CargoEvent;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// Concrete service type the node runs.
pub type NodeService = CargoRegistryService<FanoutSink>;

/// The running node.
pub struct NodeRuntime {
    config: NodeConfig,
    bus: Arc<InMemoryEventBus>,
    service: Arc<NodeService>,
    shutdown_tx: watch::Sender<bool>,
    shutdown_rx: watch::Receiver<bool>,
}

impl NodeRuntime {
    /// Build the bus and the registry service.
    pub fn new(config: NodeConfig) -> Self {
        let bus = Arc::new(InMemoryEventBus::with_capacity(config.bus_capacity));
        let sink = FanoutSink::new()
            .with(BusNotifier::new(Arc::clone(&bus)))
            .with(TracingSink);
        let service = Arc::new(CargoRegistryService::with_config(config.registry, sink));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        Self {
            config,
            bus,
            service,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Spawn the bus observer. Returns its handle.
    pub fn start(&self) -> JoinHandle<()> {
        info!(
            owner = %self.config.registry.owner,
            policy = %self.config.registry.creation_policy,
            bus_capacity = self.bus.capacity(),
            "Cargo registry node starting"
        );

        let subscription = self.bus.subscribe(EventFilter::all());
        let mut shutdown = self.shutdown_rx.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = observe(subscription) => {}
                _ = shutdown.changed() => {
                    info!("[observer] Shutdown signal received");
                }
            }
        })
    }

    /// Command handler bound to this node's service.
    pub fn handler(&self) -> CommandHandler<NodeService> {
        CommandHandler::new(Arc::clone(&self.service))
    }

    pub fn service(&self) -> Arc<NodeService> {
        Arc::clone(&self.service)
    }

    pub fn bus(&self) -> Arc<InMemoryEventBus> {
        Arc::clone(&self.bus)
    }

    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// Notifications the bus has carried since startup.
    pub fn events_published(&self) -> u64 {
        self.bus.events_published()
    }

    /// Signal background tasks to stop.
    pub fn shutdown(&self) {
        info!(
            events_published = self.events_published(),
            "Initiating graceful shutdown..."
        );
        if let Err(e) = self.shutdown_tx.send(true) {
            error!("Failed to send shutdown signal: {}", e);
        }
    }
}

async fn observe(mut subscription: Subscription) {
    while let Some(message) = subscription.recv().await {
        log_message(&message);
    }
    info!("[observer] Event bus closed");
}

fn log_message(message: &BusMessage) {
    let status_code = match &message.event {
        CargoEvent::ShippingStatusUpdated { status, .. } => Some(status.code()),
        CargoEvent::CargoReceived { .. } => None,
    };
    match serde_json::to_string(&message.event) {
        Ok(payload) => info!(
            target: "ct::observer",
            sequence = message.sequence,
            topic = ?message.topic(),
            status_code,
            %payload,
            "Bus message"
        ),
        Err(e) => error!(sequence = message.sequence, "Failed to encode bus message: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ct_01_cargo_registry::CargoRegistryApi;
    use shared_types::{CargoId, Identity, ShippingStatus};

    const OWNER: Identity = Identity::repeat(0x01);

    #[tokio::test]
    async fn test_service_publishes_to_bus() {
        let runtime = NodeRuntime::new(NodeConfig::new(OWNER));
        let mut sub = runtime.bus().subscribe(EventFilter::all());
        let service = runtime.service();

        let id = service
            .create_cargo(OWNER, Identity::repeat(2), Identity::repeat(3), 50)
            .await
            .unwrap();
        service.mark_delivered(OWNER, id).await.unwrap();

        let first = sub.recv().await.unwrap();
        assert!(matches!(first.event, CargoEvent::CargoReceived { cargo_id, .. } if cargo_id == CargoId(1)));
        let second = sub.recv().await.unwrap();
        assert_eq!(
            second.event,
            CargoEvent::ShippingStatusUpdated {
                cargo_id: id,
                status: ShippingStatus::Delivered,
            }
        );
    }

    #[tokio::test]
    async fn test_events_published_counts_notifications() {
        let runtime = NodeRuntime::new(NodeConfig::new(OWNER));
        let service = runtime.service();
        assert_eq!(runtime.events_published(), 0);

        let id = service
            .create_cargo(OWNER, Identity::repeat(2), Identity::repeat(3), 50)
            .await
            .unwrap();
        service.mark_in_transit(OWNER, id).await.unwrap();
        assert!(service.mark_in_transit(OWNER, id).await.is_err());

        assert_eq!(runtime.events_published(), 2);
        runtime.shutdown();
    }

    #[tokio::test]
    async fn test_observer_stops_on_shutdown() {
        let runtime = NodeRuntime::new(NodeConfig::new(OWNER));
        let observer = runtime.start();
        runtime.shutdown();
        observer.await.unwrap();
    }

    #[tokio::test]
    async fn test_handler_uses_node_owner() {
        let runtime = NodeRuntime::new(NodeConfig::new(OWNER));
        let response = runtime.handler().handle_line(r#"{"op":"owner"}"#).await;
        assert_eq!(
            response.result.unwrap()["owner"],
            "0x0101010101010101010101010101010101010101"
        );
    }
}
