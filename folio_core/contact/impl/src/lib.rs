use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError},
    time::Duration,
};

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use folio_core_contact_contracts::{
    messages, ContactFeatureService, ContactFormSnapshot, SubmissionReport,
};
use folio_delivery_contracts::DeliveryService;
use folio_models::{
    contact::{
        ContactEmail, ContactField, ContactFields, ContactMessageBody, ContactName,
        ContactPayload, FieldErrors, SubmissionStatus, MIN_MESSAGE_CHARS,
    },
    EMAIL_REGEX,
};
use folio_shared_contracts::{network::NetworkService, time::TimeService};
use folio_utils::diag::diag;

const CONTEXT: &str = "ContactForm";

#[derive(Debug, Clone)]
pub struct ContactFeatureServiceImpl<Delivery, Network, Time> {
    delivery: Arc<Delivery>,
    network: Network,
    time: Time,
    config: ContactFeatureConfig,
    state: Arc<FormState>,
}

#[derive(Debug, Clone)]
pub struct ContactFeatureConfig {
    /// Bound on the delivery call. A race, not a cancellation: the
    /// underlying send keeps running if it loses.
    pub send_timeout: Duration,
    /// How long the success banner stays up before the status returns to
    /// idle.
    pub success_banner_ttl: Duration,
    /// Same for the error and network-error banners.
    pub error_banner_ttl: Duration,
}

impl Default for ContactFeatureConfig {
    fn default() -> Self {
        Self {
            send_timeout: Duration::from_secs(30),
            success_banner_ttl: Duration::from_secs(7),
            error_banner_ttl: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Default)]
struct FormState {
    inner: Mutex<FormInner>,
}

#[derive(Debug, Default)]
struct FormInner {
    fields: ContactFields,
    errors: FieldErrors,
    status: SubmissionStatus,
    status_message: Option<String>,
    is_submitting: bool,
    /// Bumped at the start of every accepted submission. Auto-reset timers
    /// remember the generation they were scheduled for and do nothing if a
    /// newer submission has started since.
    generation: u64,
}

impl FormState {
    fn lock(&self) -> MutexGuard<'_, FormInner> {
        // The form must stay usable even if a timer task panicked while
        // holding the lock.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl FormInner {
    fn report(&self) -> SubmissionReport {
        SubmissionReport {
            status: self.status,
            message: self.status_message.clone(),
            field_errors: self.errors.clone(),
        }
    }

    fn snapshot(&self) -> ContactFormSnapshot {
        ContactFormSnapshot {
            fields: self.fields.clone(),
            errors: self.errors.clone(),
            status: self.status,
            status_message: self.status_message.clone(),
            is_submitting: self.is_submitting,
        }
    }
}

/// Clears the submitting flag when the submit call unwinds, so the trigger
/// button is re-enabled no matter how the attempt ended.
struct SubmitGuard {
    state: Arc<FormState>,
}

impl Drop for SubmitGuard {
    fn drop(&mut self) {
        self.state.lock().is_submitting = false;
    }
}

impl<Delivery, Network, Time> ContactFeatureServiceImpl<Delivery, Network, Time>
where
    Delivery: DeliveryService,
    Network: NetworkService,
    Time: TimeService,
{
    pub fn new(
        delivery: Arc<Delivery>,
        network: Network,
        time: Time,
        config: ContactFeatureConfig,
    ) -> Self {
        Self {
            delivery,
            network,
            time,
            config,
            state: Arc::default(),
        }
    }

    /// Stores a terminal status that stays up until the user dismisses it
    /// or a new submission replaces it.
    fn conclude(&self, status: SubmissionStatus, message: &str) -> SubmissionReport {
        let mut inner = self.state.lock();
        inner.status = status;
        inner.status_message = Some(message.into());
        inner.report()
    }

    /// Stores a terminal status and schedules its return to idle.
    fn conclude_with_reset(
        &self,
        generation: u64,
        status: SubmissionStatus,
        message: Option<&str>,
        after: Duration,
    ) -> SubmissionReport {
        let report = {
            let mut inner = self.state.lock();
            inner.status = status;
            inner.status_message = message.map(Into::into);
            inner.report()
        };
        self.schedule_reset(generation, after);
        report
    }

    fn schedule_reset(&self, generation: u64, after: Duration) {
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            tokio::time::sleep(after).await;
            let mut inner = state.lock();
            if inner.generation == generation {
                inner.status = SubmissionStatus::Idle;
                inner.status_message = None;
            }
        });
    }
}

impl<Delivery, Network, Time> ContactFeatureService
    for ContactFeatureServiceImpl<Delivery, Network, Time>
where
    Delivery: DeliveryService,
    Network: NetworkService,
    Time: TimeService,
{
    fn update_field(&self, field: ContactField, value: String) {
        let mut inner = self.state.lock();
        inner.fields.set(field, value);
        inner.errors.clear_field(field);
    }

    fn validate(&self) -> FieldErrors {
        let mut inner = self.state.lock();
        inner.errors = validate_fields(&inner.fields);
        inner.errors.clone()
    }

    async fn submit(&self) -> SubmissionReport {
        let generation = {
            let mut inner = self.state.lock();

            // Defense in depth: the button is disabled while submitting,
            // but the controller itself must also refuse reentry.
            if inner.is_submitting || !inner.status.accepts_submit() {
                return inner.report();
            }

            let errors = validate_fields(&inner.fields);
            if !errors.is_empty() {
                inner.errors = errors;
                diag().warn("Form validation failed", CONTEXT);
                return inner.report();
            }

            inner.errors = FieldErrors::default();
            inner.status = SubmissionStatus::Submitting;
            inner.status_message = None;
            inner.is_submitting = true;
            inner.generation += 1;
            inner.generation
        };
        let _guard = SubmitGuard {
            state: Arc::clone(&self.state),
        };

        if !self.network.is_online() {
            diag().warn("No internet connection", CONTEXT);
            return self.conclude(SubmissionStatus::NetworkError, messages::OFFLINE);
        }

        if !self.delivery.is_configured() {
            diag().error("Missing email delivery credentials", CONTEXT);
            return self.conclude(SubmissionStatus::Error, messages::NOT_CONFIGURED);
        }

        let payload = {
            let inner = self.state.lock();
            build_payload(&inner.fields, self.time.now())
        };
        let payload = match payload {
            Ok(payload) => payload,
            Err(err) => {
                diag().error(format!("Failed to build payload: {err:#}"), CONTEXT);
                return self.conclude_with_reset(
                    generation,
                    SubmissionStatus::Error,
                    Some(messages::UNEXPECTED),
                    self.config.error_banner_ttl,
                );
            }
        };

        // Race the send against a timer. The send task is not aborted when
        // the timer wins; its eventual result is ignored.
        let delivery = Arc::clone(&self.delivery);
        let send_task = tokio::spawn(async move { delivery.send(payload).await });
        let result = tokio::select! {
            outcome = send_task => match outcome {
                Ok(result) => result,
                Err(join_err) => {
                    diag().error(format!("Send task failed: {join_err}"), CONTEXT);
                    return self.conclude_with_reset(
                        generation,
                        SubmissionStatus::Error,
                        Some(messages::UNEXPECTED),
                        self.config.error_banner_ttl,
                    );
                }
            },
            () = tokio::time::sleep(self.config.send_timeout) => Err(anyhow!("Request timeout")),
        };

        match result {
            Ok(()) => {
                diag().info("Contact form submitted successfully", CONTEXT);
                self.state.lock().fields = ContactFields::default();
                self.conclude_with_reset(
                    generation,
                    SubmissionStatus::Success,
                    None,
                    self.config.success_banner_ttl,
                )
            }
            Err(err) => {
                diag().error(format!("Submission failed: {err:#}"), CONTEXT);
                let (status, message) = classify_failure(&err);
                self.conclude_with_reset(
                    generation,
                    status,
                    Some(message),
                    self.config.error_banner_ttl,
                )
            }
        }
    }

    fn dismiss(&self) {
        let mut inner = self.state.lock();
        inner.status = SubmissionStatus::Idle;
        inner.status_message = None;
    }

    fn snapshot(&self) -> ContactFormSnapshot {
        self.state.lock().snapshot()
    }
}

/// Computes the errors for all fields; never short-circuits, so multiple
/// invalid fields surface together.
fn validate_fields(fields: &ContactFields) -> FieldErrors {
    let mut errors = FieldErrors::default();

    if fields.name.trim().is_empty() {
        errors.insert(ContactField::Name, messages::NAME_REQUIRED);
    }

    let email = fields.email.trim();
    if email.is_empty() {
        errors.insert(ContactField::Email, messages::EMAIL_REQUIRED);
    } else if !EMAIL_REGEX.is_match(email) {
        errors.insert(ContactField::Email, messages::EMAIL_INVALID);
    }

    let message = fields.message.trim();
    if message.is_empty() {
        errors.insert(ContactField::Message, messages::MESSAGE_REQUIRED);
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        errors.insert(ContactField::Message, messages::MESSAGE_TOO_SHORT);
    }

    errors
}

fn build_payload(fields: &ContactFields, now: DateTime<Utc>) -> anyhow::Result<ContactPayload> {
    Ok(ContactPayload {
        from_name: ContactName::try_new(&fields.name)?,
        from_email: ContactEmail::try_new(&fields.email)?,
        message: ContactMessageBody::try_new(&fields.message)?,
        submission_date: now.format("%B %-d, %Y, %-I:%M %p UTC").to_string(),
    })
}

/// Maps a raw failure onto a user-facing status and message by inspecting
/// its text, most specific condition first.
fn classify_failure(err: &anyhow::Error) -> (SubmissionStatus, &'static str) {
    let text = format!("{err:#}");
    if text.contains("timeout") {
        (SubmissionStatus::Error, messages::TIMED_OUT)
    } else if text.contains("Failed to fetch") || text.contains("Network") {
        (SubmissionStatus::NetworkError, messages::NETWORK_FAILURE)
    } else if text.contains("not configured") {
        (SubmissionStatus::Error, messages::NOT_CONFIGURED_LATE)
    } else {
        (SubmissionStatus::Error, messages::SEND_FAILED)
    }
}
