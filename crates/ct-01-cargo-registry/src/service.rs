//! # Cargo Registry Service
//!
//! Async, shareable front of the registry. Implements `CargoRegistryApi`.
//!
//! ## Concurrency
//!
//! The registry sits behind one `tokio::sync::RwLock`. Every mutation takes
//! the write lock for its whole check/apply/notify sequence, so mutations are
//! serialized, notifications leave in commit order, and readers never observe
//! a half-applied change.
//!
//! ## Observability
//!
//! - `tracing` spans per operation, `warn!` on rejection
//! - Prometheus counters from `ct-telemetry`
//! - `ServiceStats` snapshot for callers without a metrics scraper

use crate::domain::entities::{Cargo, RegistryConfig};
use crate::domain::invariants::check_all_invariants;
use crate::domain::registry::CargoRegistry;
use crate::domain::value_objects::CreationPolicy;
use crate::errors::RegistryError;
use crate::ports::inbound::CargoRegistryApi;
use crate::ports::outbound::NotificationSink;

use async_trait::async_trait;
use ct_telemetry::{
    HistogramTimer, ACTIVE_CARGO, CARGO_CREATED, CARGO_PURGED, OPERATIONS_REJECTED,
    STATUS_UPDATES,
};
use shared_types::{CargoId, Grams, Identity, ShippingStatus};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, instrument, warn};

/// Counters kept by the service.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ServiceStats {
    /// Successful creations.
    pub cargo_created: u64,
    /// Successful `RECEIVED -> IN_TRANSIT` moves.
    pub marked_in_transit: u64,
    /// Successful deliveries (each one a purge).
    pub delivered: u64,
    /// Calls that returned an error.
    pub rejected: u64,
    /// Live records when the snapshot was taken.
    pub active_cargo: usize,
}

/// The cargo registry service.
///
/// Cloning is cheap and every clone drives the same registry.
///
/// Lock order is registry, then stats. Stats only change while the registry
/// write lock is held.
pub struct CargoRegistryService<N: NotificationSink> {
    registry: Arc<RwLock<CargoRegistry>>,
    sink: Arc<N>,
    stats: Arc<RwLock<ServiceStats>>,
}

impl<N: NotificationSink> Clone for CargoRegistryService<N> {
    fn clone(&self) -> Self {
        Self {
            registry: Arc::clone(&self.registry),
            sink: Arc::clone(&self.sink),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl<N: NotificationSink> CargoRegistryService<N> {
    /// Create a service with open creation.
    pub fn new(owner: Identity, sink: N) -> Self {
        Self::with_config(RegistryConfig::new(owner), sink)
    }

    /// Create a service from a full configuration.
    pub fn with_config(config: RegistryConfig, sink: N) -> Self {
        debug!(owner = %config.owner, policy = %config.creation_policy, "Cargo registry created");
        Self {
            registry: Arc::new(RwLock::new(CargoRegistry::with_config(config))),
            sink: Arc::new(sink),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// The notification sink.
    pub fn sink(&self) -> &N {
        &self.sink
    }

    /// Current service statistics, consistent with the registry contents.
    pub async fn stats(&self) -> ServiceStats {
        let registry = self.registry.read().await;
        let mut stats = self.stats.read().await.clone();
        stats.active_cargo = registry.len();
        stats
    }

    /// Active creation policy.
    pub async fn creation_policy(&self) -> CreationPolicy {
        self.registry.read().await.creation_policy()
    }

    /// Number of live records.
    pub async fn active_count(&self) -> usize {
        self.registry.read().await.len()
    }

    /// Copies of every live record in ascending id order.
    pub async fn active_cargo(&self) -> Vec<Cargo> {
        self.registry.read().await.active_cargo().copied().collect()
    }

    /// The id the next successful creation will receive.
    pub async fn next_cargo_id(&self) -> CargoId {
        self.registry.read().await.next_cargo_id()
    }

    async fn reject(&self, operation: &'static str, err: &RegistryError) {
        warn!(
            operation,
            code = err.code(),
            input_error = err.is_input_error(),
            error = %err,
            "Registry operation rejected"
        );
        OPERATIONS_REJECTED
            .with_label_values(&[operation, err.code()])
            .inc();
        self.stats.write().await.rejected += 1;
    }

    fn check_invariants(registry: &CargoRegistry) {
        if cfg!(debug_assertions) {
            let result = check_all_invariants(registry);
            if !result.is_ok() {
                error!(violations = ?result.violations, "Registry invariant violated");
            }
            debug_assert!(result.is_ok(), "invariant violations: {:?}", result.violations);
        }
    }
}

#[async_trait]
impl<N: NotificationSink + 'static> CargoRegistryApi for CargoRegistryService<N> {
    #[instrument(skip_all, fields(%caller, %sender, %receiver, weight = weight))]
    async fn create_cargo(
        &self,
        caller: Identity,
        sender: Identity,
        receiver: Identity,
        weight: Grams,
    ) -> Result<CargoId, RegistryError> {
        let _timer = HistogramTimer::operation("create_cargo");
        let mut registry = self.registry.write().await;
        let result = registry.create(caller, sender, receiver, weight, self.sink.as_ref());
        Self::check_invariants(&registry);
        ACTIVE_CARGO.set(registry.len() as f64);

        match &result {
            Ok(_) => {
                CARGO_CREATED.inc();
                self.stats.write().await.cargo_created += 1;
            }
            Err(err) => self.reject("create_cargo", err).await,
        }
        result
    }

    #[instrument(skip_all, fields(%caller, %cargo_id))]
    async fn mark_in_transit(
        &self,
        caller: Identity,
        cargo_id: CargoId,
    ) -> Result<(), RegistryError> {
        let _timer = HistogramTimer::operation("mark_in_transit");
        let mut registry = self.registry.write().await;
        let result = registry.mark_in_transit(caller, cargo_id, self.sink.as_ref());
        Self::check_invariants(&registry);

        match &result {
            Ok(()) => {
                STATUS_UPDATES
                    .with_label_values(&[ShippingStatus::InTransit.as_str()])
                    .inc();
                self.stats.write().await.marked_in_transit += 1;
            }
            Err(err) => self.reject("mark_in_transit", err).await,
        }
        result
    }

    #[instrument(skip_all, fields(%caller, %cargo_id))]
    async fn mark_delivered(
        &self,
        caller: Identity,
        cargo_id: CargoId,
    ) -> Result<(), RegistryError> {
        let _timer = HistogramTimer::operation("mark_delivered");
        let mut registry = self.registry.write().await;
        let result = registry.mark_delivered(caller, cargo_id, self.sink.as_ref());
        Self::check_invariants(&registry);
        ACTIVE_CARGO.set(registry.len() as f64);

        match &result {
            Ok(()) => {
                STATUS_UPDATES
                    .with_label_values(&[ShippingStatus::Delivered.as_str()])
                    .inc();
                CARGO_PURGED.inc();
                self.stats.write().await.delivered += 1;
            }
            Err(err) => self.reject("mark_delivered", err).await,
        }
        result
    }

    #[instrument(skip_all, fields(%cargo_id))]
    async fn get_cargo_by_id(&self, cargo_id: CargoId) -> Result<Cargo, RegistryError> {
        let _timer = HistogramTimer::operation("get_cargo_by_id");
        self.registry.read().await.get_cargo_by_id(cargo_id)
    }

    async fn owner(&self) -> Identity {
        self.registry.read().await.owner()
    }
}
