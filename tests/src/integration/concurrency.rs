//! # Concurrency
//!
//! Many tasks sharing one registry service.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use ct_01_cargo_registry::prelude::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const OWNER: Identity = Identity::repeat(0x01);

    /// Concurrent creators always get unique, gap-free ids.
    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_parallel_creates_unique_ids() {
        let service = Arc::new(CargoRegistryService::new(OWNER, RecordingSink::new()));

        let mut handles = Vec::new();
        for worker in 0..8u8 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let me = Identity::repeat(0x10 + worker);
                let mut ids = Vec::new();
                for n in 0..50u64 {
                    ids.push(
                        service
                            .create_cargo(me, me, OWNER, n + 1)
                            .await
                            .unwrap()
                            .get(),
                    );
                }
                ids
            }));
        }

        let mut all = Vec::new();
        for handle in handles {
            let ids = handle.await.unwrap();
            assert!(ids.windows(2).all(|w| w[0] < w[1]), "per-task ids increase");
            all.extend(ids);
        }

        let unique: HashSet<_> = all.iter().copied().collect();
        assert_eq!(unique.len(), 400);
        assert_eq!(*all.iter().max().unwrap(), 400);
        assert_eq!(service.sink().len(), 400);
    }

    /// Owner traffic racing with stranger traffic: invariants hold and every
    /// success produced exactly one notification.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_mixed_traffic_keeps_invariants() {
        let service = Arc::new(CargoRegistryService::new(OWNER, RecordingSink::new()));

        let mut handles = Vec::new();
        for seed in 0..4u64 {
            let service = Arc::clone(&service);
            handles.push(tokio::spawn(async move {
                let mut rng = StdRng::seed_from_u64(seed);
                let mut successes = 0u64;
                for _ in 0..200 {
                    let caller = if rng.gen_bool(0.5) {
                        OWNER
                    } else {
                        Identity::repeat(0x50)
                    };
                    let id = CargoId(rng.gen_range(1..=60));
                    let ok = match rng.gen_range(0..3) {
                        0 => service
                            .create_cargo(caller, Identity::repeat(0x02), Identity::repeat(0x03), 7)
                            .await
                            .is_ok(),
                        1 => service.mark_in_transit(caller, id).await.is_ok(),
                        _ => service.mark_delivered(caller, id).await.is_ok(),
                    };
                    if ok {
                        successes += 1;
                    }
                }
                successes
            }));
        }

        let mut successes = 0u64;
        for handle in handles {
            successes += handle.await.unwrap();
        }

        let stats = service.stats().await;
        assert_eq!(
            stats.cargo_created + stats.marked_in_transit + stats.delivered,
            successes
        );
        assert_eq!(stats.rejected, 800 - successes);
        assert_eq!(service.sink().len() as u64, successes);

        for cargo in service.active_cargo().await {
            assert_ne!(cargo.shipping_status, ShippingStatus::Delivered);
        }
        assert_eq!(
            service.active_count().await as u64,
            stats.cargo_created - stats.delivered
        );
    }
}
