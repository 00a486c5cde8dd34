use std::{any::Any, net::IpAddr};

use axum::{http::StatusCode, response::Response, Router};
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_content_contracts::ContentService;
use folio_core_health_contracts::HealthFeatureService;
use folio_models::contact::ContactEmail;
use folio_utils::diag::diag;
use tokio::net::TcpListener;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

mod models;
mod routes;

#[derive(Debug)]
pub struct RestServer<Health, Contact, Content> {
    health: Health,
    contact: Contact,
    content: Content,
    fallback_email: ContactEmail,
}

impl<Health, Contact, Content> RestServer<Health, Contact, Content>
where
    Health: HealthFeatureService,
    Contact: ContactFeatureService,
    Content: ContentService,
{
    pub fn new(
        health: Health,
        contact: Contact,
        content: Content,
        fallback_email: ContactEmail,
    ) -> Self {
        Self {
            health,
            contact,
            content,
            fallback_email,
        }
    }

    pub async fn serve(self, host: IpAddr, port: u16) -> anyhow::Result<()> {
        let router = self.router();
        let listener = TcpListener::bind((host, port)).await?;
        tracing::info!("listening on {}:{port}", host);
        axum::serve(listener, router).await.map_err(Into::into)
    }

    fn router(self) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::contact::router(
                self.contact.into(),
                self.fallback_email,
            ))
            .merge(routes::content::router(self.content.into()))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }
}

/// Last-resort containment: a panicking handler must not take the server
/// down, only the one request.
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic");
    diag().error(format!("Request handler panicked: {detail}"), "RestServer");
    routes::error(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}
