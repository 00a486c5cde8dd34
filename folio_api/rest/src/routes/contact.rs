use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing, Json, Router,
};
use folio_core_contact_contracts::ContactFeatureService;
use folio_models::contact::{ContactEmail, SubmissionStatus};

use super::error;
use crate::models::{ApiContactMessage, ApiSubmissionRejected, ApiValidationFailed};

pub fn router(
    service: Arc<impl ContactFeatureService>,
    fallback_email: ContactEmail,
) -> Router<()> {
    Router::new()
        .route("/contact", routing::post(send_message))
        .with_state(ContactState {
            service,
            submit_lock: Arc::default(),
            fallback_email: fallback_email.into_inner(),
        })
}

struct ContactState<Contact> {
    service: Arc<Contact>,
    /// The controller holds one form shared by all requests, so storing a
    /// request's fields and submitting them must be one atomic unit.
    /// Concurrent requests queue here instead of interleaving.
    submit_lock: Arc<tokio::sync::Mutex<()>>,
    fallback_email: String,
}

impl<Contact> Clone for ContactState<Contact> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            submit_lock: Arc::clone(&self.submit_lock),
            fallback_email: self.fallback_email.clone(),
        }
    }
}

async fn send_message(
    State(state): State<ContactState<impl ContactFeatureService>>,
    Json(message): Json<ApiContactMessage>,
) -> Response {
    let report = {
        let _guard = state.submit_lock.lock().await;
        for (field, value) in message.fields() {
            state.service.update_field(field, value);
        }
        state.service.submit().await
    };
    match report.status {
        SubmissionStatus::Success => Json(true).into_response(),
        // Validation failures leave the status untouched.
        SubmissionStatus::Idle => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ApiValidationFailed {
                detail: "Validation failed",
                field_errors: report.field_errors,
            }),
        )
            .into_response(),
        SubmissionStatus::Submitting => {
            error(StatusCode::CONFLICT, "A submission is already in progress")
        }
        status @ (SubmissionStatus::Error | SubmissionStatus::NetworkError) => {
            let code = if status == SubmissionStatus::NetworkError {
                StatusCode::SERVICE_UNAVAILABLE
            } else {
                StatusCode::BAD_GATEWAY
            };
            (
                code,
                Json(ApiSubmissionRejected {
                    detail: "Could not send message",
                    status,
                    message: report.message,
                    fallback_email: state.fallback_email.clone(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, http::Request};
    use folio_core_contact_contracts::{messages, MockContactFeatureService, SubmissionReport};
    use folio_core_contact_impl::{ContactFeatureConfig, ContactFeatureServiceImpl};
    use folio_delivery_contracts::MockDeliveryService;
    use folio_models::contact::{ContactField, FieldErrors};
    use folio_shared_contracts::{network::MockNetworkService, time::MockTimeService};
    use http_body_util::BodyExt;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    #[tokio::test]
    async fn accepted_submission_returns_true() {
        // Arrange
        let mut service = MockContactFeatureService::new();
        service.expect_update_field().times(3).return_const(());
        service.expect_submit().once().return_once(|| {
            Box::pin(std::future::ready(SubmissionReport {
                status: SubmissionStatus::Success,
                message: Some("Message sent successfully! I'll get back to you soon.".into()),
                field_errors: FieldErrors::default(),
            }))
        });

        // Act
        let response = sut(service)
            .oneshot(request(
                "Grace Li",
                "visitor@example.com",
                "Hello, I would like to get in touch.",
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&*body, b"true");
    }

    #[tokio::test]
    async fn invalid_fields_are_reported_per_field() {
        // Arrange
        let mut errors = FieldErrors::default();
        errors.insert(ContactField::Name, messages::NAME_REQUIRED);
        errors.insert(ContactField::Message, messages::MESSAGE_TOO_SHORT);

        let mut service = MockContactFeatureService::new();
        service.expect_update_field().times(3).return_const(());
        service.expect_submit().once().return_once(move || {
            Box::pin(std::future::ready(SubmissionReport {
                status: SubmissionStatus::Idle,
                message: None,
                field_errors: errors,
            }))
        });

        // Act
        let response = sut(service)
            .oneshot(request("", "visitor@example.com", "short"))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "detail": "Validation failed",
                "field_errors": {
                    "name": messages::NAME_REQUIRED,
                    "message": messages::MESSAGE_TOO_SHORT,
                },
            })
        );
    }

    #[tokio::test]
    async fn offline_submission_names_the_fallback_address() {
        // Arrange
        let mut service = MockContactFeatureService::new();
        service.expect_update_field().times(3).return_const(());
        service.expect_submit().once().return_once(|| {
            Box::pin(std::future::ready(SubmissionReport {
                status: SubmissionStatus::NetworkError,
                message: Some(messages::OFFLINE.into()),
                field_errors: FieldErrors::default(),
            }))
        });

        // Act
        let response = sut(service)
            .oneshot(request(
                "Grace Li",
                "visitor@example.com",
                "Hello, I would like to get in touch.",
            ))
            .await
            .unwrap();

        // Assert
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(body["message"], messages::OFFLINE);
        assert_eq!(body["fallback_email"], "graceli9095@gmail.com");
    }

    #[tokio::test]
    async fn concurrent_requests_do_not_mix_form_fields() {
        // Arrange: a real controller behind the router; every delivered
        // payload must be internally consistent with one request, and no
        // request may be dropped while another is in flight.
        let mut delivery = MockDeliveryService::new();
        delivery.expect_is_configured().times(2).return_const(true);
        delivery.expect_send().times(2).returning(|payload| {
            assert!(
                payload.message.contains(&*payload.from_name),
                "payload mixes fields from two requests: {payload:?}"
            );
            Box::pin(std::future::ready(Ok(())))
        });
        let mut network = MockNetworkService::new();
        network.expect_is_online().times(2).return_const(true);
        let mut time = MockTimeService::new();
        time.expect_now().times(2).return_const(chrono::Utc::now());
        let controller = ContactFeatureServiceImpl::new(
            Arc::new(delivery),
            network,
            time,
            ContactFeatureConfig::default(),
        );
        let app = router(
            Arc::new(controller),
            ContactEmail::try_new("graceli9095@gmail.com").unwrap(),
        );

        // Act
        let (first, second) = tokio::join!(
            app.clone().oneshot(request(
                "Alice",
                "alice@example.com",
                "Hello, this message is from Alice.",
            )),
            app.clone().oneshot(request(
                "Bob",
                "bob@example.com",
                "Hello, this message is from Bob.",
            )),
        );

        // Assert
        assert_eq!(first.unwrap().status(), StatusCode::OK);
        assert_eq!(second.unwrap().status(), StatusCode::OK);
    }

    fn sut(service: MockContactFeatureService) -> Router<()> {
        router(
            Arc::new(service),
            ContactEmail::try_new("graceli9095@gmail.com").unwrap(),
        )
    }

    fn request(name: &str, email: &str, message: &str) -> Request<Body> {
        Request::post("/contact")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::json!({ "name": name, "email": email, "message": message }).to_string(),
            ))
            .unwrap()
    }
}
