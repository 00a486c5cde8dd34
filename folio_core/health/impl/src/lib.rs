use std::{sync::Arc, time::Duration};

use chrono::{DateTime, Utc};
use folio_core_health_contracts::{HealthFeatureService, HealthStatus};
use folio_delivery_contracts::DeliveryService;
use folio_shared_contracts::{network::NetworkService, time::TimeService};
use tokio::sync::RwLock;
use tracing::error;

#[derive(Debug, Clone)]
pub struct HealthFeatureServiceImpl<Time, Delivery, Network> {
    time: Time,
    delivery: Delivery,
    network: Network,
    config: HealthFeatureConfig,
    state: Arc<State>,
}

#[derive(Debug, Clone)]
pub struct HealthFeatureConfig {
    pub cache_ttl: Duration,
}

#[derive(Debug, Default)]
struct State {
    cache: RwLock<Option<CachedStatus>>,
}

#[derive(Debug)]
struct CachedStatus {
    status: HealthStatus,
    timestamp: DateTime<Utc>,
}

impl<Time, Delivery, Network> HealthFeatureServiceImpl<Time, Delivery, Network> {
    pub fn new(time: Time, delivery: Delivery, network: Network, config: HealthFeatureConfig) -> Self {
        Self {
            time,
            delivery,
            network,
            config,
            state: Arc::default(),
        }
    }
}

impl<Time, Delivery, Network> HealthFeatureService
    for HealthFeatureServiceImpl<Time, Delivery, Network>
where
    Time: TimeService,
    Delivery: DeliveryService,
    Network: NetworkService,
{
    async fn get_status(&self) -> HealthStatus {
        let now = self.time.now();
        let cache_guard = self.state.cache.read().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }
        drop(cache_guard);

        let mut cache_guard = self.state.cache.write().await;
        if let Some(cached) = cache_guard
            .as_ref()
            .filter(|c| now < c.timestamp + self.config.cache_ttl)
        {
            return cached.status;
        }

        let delivery = self
            .delivery
            .ping()
            .await
            .inspect_err(|err| error!("Failed to ping delivery api: {err}"))
            .is_ok();

        let network = self.network.is_online();

        let status = HealthStatus { delivery, network };

        cache_guard
            .insert(CachedStatus {
                status,
                timestamp: now,
            })
            .status
    }
}
