use folio_models::contact::{ContactField, FieldErrors, SubmissionStatus};
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct ApiError {
    pub detail: &'static str,
}

/// Body of `POST /contact`. Raw text as typed; validation happens in the
/// contact feature and is reported per field.
#[derive(Debug, Deserialize)]
pub struct ApiContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ApiContactMessage {
    pub fn fields(self) -> [(ContactField, String); 3] {
        [
            (ContactField::Name, self.name),
            (ContactField::Email, self.email),
            (ContactField::Message, self.message),
        ]
    }
}

#[derive(Debug, Serialize)]
pub struct ApiSubmissionRejected {
    pub detail: &'static str,
    pub status: SubmissionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Direct address the sender can fall back to when delivery fails.
    pub fallback_email: String,
}

#[derive(Debug, Serialize)]
pub struct ApiValidationFailed {
    pub detail: &'static str,
    pub field_errors: FieldErrors,
}
