use std::future::Future;

use folio_models::contact::ContactPayload;

/// Client for the external email-delivery API. Success or failure is the
/// whole contract; no response body is consumed.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait DeliveryService: Send + Sync + 'static {
    /// Whether all credentials required to call the API are present. Does
    /// not perform a network call.
    fn is_configured(&self) -> bool;

    fn send(&self, payload: ContactPayload) -> impl Future<Output = anyhow::Result<()>> + Send;

    /// Checks that the API endpoint is reachable.
    fn ping(&self) -> impl Future<Output = anyhow::Result<()>> + Send;
}

#[cfg(feature = "mock")]
impl MockDeliveryService {
    pub fn with_is_configured(mut self, configured: bool) -> Self {
        self.expect_is_configured().once().return_const(configured);
        self
    }

    pub fn with_send(mut self, payload: ContactPayload, result: anyhow::Result<()>) -> Self {
        self.expect_send()
            .once()
            .with(mockall::predicate::eq(payload))
            .return_once(move |_| Box::pin(std::future::ready(result)));
        self
    }
}
