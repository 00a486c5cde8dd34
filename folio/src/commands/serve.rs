use std::sync::Arc;

use folio_api_rest::RestServer;
use folio_config::Config;
use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
use folio_core_content_impl::ContentServiceImpl;
use folio_core_health_impl::{HealthFeatureConfig, HealthFeatureServiceImpl};
use folio_delivery_contracts::DeliveryService;
use folio_delivery_impl::{DeliveryServiceConfig, DeliveryServiceImpl};
use folio_shared_impl::{
    network::{NetworkProbeConfig, NetworkWatchServiceImpl},
    time::TimeServiceImpl,
};
use folio_utils::diag::diag;
use tracing::info;

pub async fn serve(config: Config) -> anyhow::Result<()> {
    let delivery = DeliveryServiceImpl::new(DeliveryServiceConfig::new(
        config.delivery.endpoint,
        config.delivery.service_id,
        config.delivery.template_id,
        config.delivery.public_key,
    ));
    if !delivery.is_configured() {
        diag().warn(
            "Email delivery credentials missing; submissions will be rejected",
            "Startup",
        );
    }

    let network = NetworkWatchServiceImpl::new();
    tokio::spawn(network.clone().run_probe(NetworkProbeConfig {
        target: config.network.probe_target.into(),
        interval: config.network.probe_interval.into(),
        connect_timeout: config.network.probe_timeout.into(),
    }));

    let time = TimeServiceImpl;
    let contact = ContactFeatureServiceImpl::new(
        Arc::new(delivery.clone()),
        network.clone(),
        time,
        ContactFeatureConfig {
            send_timeout: config.contact.send_timeout.into(),
            success_banner_ttl: config.contact.success_banner_ttl.into(),
            error_banner_ttl: config.contact.error_banner_ttl.into(),
        },
    );
    let content = ContentServiceImpl::new(folio_assets::site_content());
    let health = HealthFeatureServiceImpl::new(
        time,
        delivery,
        network,
        HealthFeatureConfig {
            cache_ttl: config.health.cache_ttl.into(),
        },
    );

    info!(
        "Starting http server on {}:{}",
        config.http.host, config.http.port
    );
    RestServer::new(health, contact, content, config.contact.fallback_email)
        .serve(config.http.host, config.http.port)
        .await
}
