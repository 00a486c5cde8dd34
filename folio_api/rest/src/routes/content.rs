use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_content_contracts::ContentService;
use folio_models::content::EventCategoryFilter;
use serde::Deserialize;

use super::error;

pub fn router(service: Arc<impl ContentService>) -> Router<()> {
    Router::new()
        .route("/profile", routing::get(profile))
        .route("/projects", routing::get(projects))
        .route("/events", routing::get(events))
        .route("/faqs", routing::get(faqs))
        .route("/skills", routing::get(skills))
        .with_state(service)
}

async fn profile(service: State<Arc<impl ContentService>>) -> Response {
    Json(service.profile()).into_response()
}

async fn projects(service: State<Arc<impl ContentService>>) -> Response {
    Json(service.projects()).into_response()
}

#[derive(Deserialize)]
struct EventsQuery {
    category: Option<String>,
}

async fn events(
    service: State<Arc<impl ContentService>>,
    Query(query): Query<EventsQuery>,
) -> Response {
    let filter = match query.category.as_deref() {
        None => EventCategoryFilter::All,
        Some(raw) => match raw.parse() {
            Ok(filter) => filter,
            Err(_) => return error(StatusCode::BAD_REQUEST, "Unknown event category"),
        },
    };
    Json(service.events(filter)).into_response()
}

async fn faqs(service: State<Arc<impl ContentService>>) -> Response {
    Json(service.faqs()).into_response()
}

async fn skills(service: State<Arc<impl ContentService>>) -> Response {
    Json(service.skills()).into_response()
}
