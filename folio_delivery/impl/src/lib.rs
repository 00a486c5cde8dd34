use std::sync::Arc;

use anyhow::{bail, Context};
use folio_delivery_contracts::DeliveryService;
use folio_models::contact::ContactPayload;
use serde::Serialize;
use url::Url;

use crate::http::HttpClient;

pub mod http;

const SEND_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Debug, Clone)]
pub struct DeliveryServiceImpl {
    config: DeliveryServiceConfig,
    client: HttpClient,
}

#[derive(Debug, Clone)]
pub struct DeliveryServiceConfig {
    endpoint: Arc<Url>,
    credentials: Option<Arc<DeliveryCredentials>>,
}

/// All three values are required by the API; a partially configured set
/// counts as not configured at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl DeliveryServiceConfig {
    pub fn new(
        endpoint_override: Option<Url>,
        service_id: Option<String>,
        template_id: Option<String>,
        public_key: Option<String>,
    ) -> Self {
        let credentials = match (service_id, template_id, public_key) {
            (Some(service_id), Some(template_id), Some(public_key)) => {
                Some(Arc::new(DeliveryCredentials {
                    service_id,
                    template_id,
                    public_key,
                }))
            }
            _ => None,
        };

        Self {
            endpoint: endpoint_override
                .unwrap_or_else(|| SEND_ENDPOINT.parse().unwrap())
                .into(),
            credentials,
        }
    }
}

impl DeliveryServiceImpl {
    pub fn new(config: DeliveryServiceConfig) -> Self {
        Self {
            config,
            client: HttpClient::default(),
        }
    }
}

impl DeliveryService for DeliveryServiceImpl {
    fn is_configured(&self) -> bool {
        self.config.credentials.is_some()
    }

    async fn send(&self, payload: ContactPayload) -> anyhow::Result<()> {
        let Some(credentials) = self.config.credentials.as_deref() else {
            bail!("Email delivery service not configured");
        };

        let response = self
            .client
            .post((*self.config.endpoint).clone())
            .json(&SendRequest {
                service_id: &credentials.service_id,
                template_id: &credentials.template_id,
                user_id: &credentials.public_key,
                template_params: &payload,
            })
            .send()
            .await
            .context("Network request failed")?;

        response
            .error_for_status()
            .context("Delivery request rejected")?;

        Ok(())
    }

    async fn ping(&self) -> anyhow::Result<()> {
        self.client
            .head((*self.config.endpoint).clone())
            .send()
            .await
            .context("Network request failed")?;
        Ok(())
    }
}

#[derive(Serialize)]
struct SendRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a ContactPayload,
}
