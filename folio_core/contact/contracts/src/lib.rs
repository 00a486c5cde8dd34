use std::future::Future;

use folio_models::contact::{ContactField, ContactFields, FieldErrors, SubmissionStatus};
use serde::Serialize;

/// The contact submission controller: owns the form state for one page
/// view, validates input, attempts delivery with a bounded wait, and
/// classifies the outcome into a small set of user-facing states.
#[cfg_attr(feature = "mock", mockall::automock)]
pub trait ContactFeatureService: Send + Sync + 'static {
    /// Stores an edited field value and clears that field's error, if any.
    fn update_field(&self, field: ContactField, value: String);

    /// Recomputes the errors for all fields and stores them. The form is
    /// valid iff the returned map is empty.
    fn validate(&self) -> FieldErrors;

    /// Runs the full submission pipeline: validate, connectivity gate,
    /// configuration gate, delivery with timeout race, outcome
    /// classification. Never fails; every failure is folded into the
    /// returned report. A call while a submission is in flight is a no-op.
    fn submit(&self) -> impl Future<Output = SubmissionReport> + Send;

    /// Manually dismisses the current status banner.
    fn dismiss(&self);

    fn snapshot(&self) -> ContactFormSnapshot;
}

/// Result of one submit attempt, as surfaced to the display layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionReport {
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub field_errors: FieldErrors,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactFormSnapshot {
    pub fields: ContactFields,
    pub errors: FieldErrors,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    pub is_submitting: bool,
}

/// User-facing message texts. Raw transport errors never leak; one of these
/// is shown instead.
pub mod messages {
    pub const NAME_REQUIRED: &str = "Name is required";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Please enter a valid email address";
    pub const MESSAGE_REQUIRED: &str = "Message is required";
    pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

    pub const OFFLINE: &str = "No internet connection. Please check your network and try again.";
    pub const NOT_CONFIGURED: &str =
        "Email service is not configured. Please contact me directly via email.";
    pub const TIMED_OUT: &str = "Request timed out. Please check your connection and try again.";
    pub const NETWORK_FAILURE: &str = "Network error. Please check your internet connection.";
    pub const NOT_CONFIGURED_LATE: &str =
        "Email service not configured. Please contact me directly.";
    pub const SEND_FAILED: &str =
        "Failed to send message. Please try again or contact me directly via email.";
    pub const UNEXPECTED: &str = "An unexpected error occurred. Please try again.";
}
