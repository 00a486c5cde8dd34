use std::collections::BTreeMap;

use nutype::nutype;
use serde::{Deserialize, Serialize};

/// Raw form input as typed by the user. Values are unvalidated; validation
/// happens on submit and produces [`FieldErrors`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: ContactField, value: String) {
        match field {
            ContactField::Name => self.name = value,
            ContactField::Email => self.email = value,
            ContactField::Message => self.message = value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Message => "message",
        }
    }
}

/// Validation errors keyed by field. Recomputed in full on every validation
/// pass; a field's entry is removed as soon as the user edits that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldErrors(BTreeMap<ContactField, &'static str>);

impl FieldErrors {
    pub fn insert(&mut self, field: ContactField, message: &'static str) {
        self.0.insert(field, message);
    }

    pub fn clear_field(&mut self, field: ContactField) {
        self.0.remove(&field);
    }

    pub fn get(&self, field: ContactField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ContactField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }
}

/// Outcome indicator of the submission pipeline. Exactly one value at a
/// time; `Idle` is both the initial state and the resting state after the
/// transient states expire.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
    NetworkError,
}

impl SubmissionStatus {
    /// Whether a new submission may be started from this state.
    pub fn accepts_submit(self) -> bool {
        !matches!(self, Self::Submitting)
    }
}

/// Minimum trimmed message length accepted by validation.
pub const MIN_MESSAGE_CHARS: usize = 10;

// The constraints here mirror `validate` on the form exactly; anything the
// form accepts must construct, so no upper length bounds.
#[nutype(
    sanitize(trim),
    validate(not_empty),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactName(String);

#[nutype(
    sanitize(trim),
    validate(regex = crate::EMAIL_REGEX),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactEmail(String);

#[nutype(
    sanitize(trim),
    validate(len_char_min = 10),
    derive(Debug, Clone, PartialEq, Eq, TryFrom, Deref, Serialize, Deserialize)
)]
pub struct ContactMessageBody(String);

/// The structured message handed to the email-delivery service. Only built
/// from fields that already passed validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub from_name: ContactName,
    pub from_email: ContactEmail,
    pub message: ContactMessageBody,
    pub submission_date: String,
}

#[cfg(test)]
mod tests {
    use folio_utils::assert_matches;

    use super::*;

    #[test]
    fn contact_name_trims_and_rejects_empty() {
        let name = ContactName::try_new("  Grace Li  ").unwrap();
        assert_eq!(&*name, "Grace Li");
        assert_matches!(ContactName::try_new("   "), Err(_));
    }

    #[test]
    fn contact_email_shape() {
        ContactEmail::try_new("a@b.co").unwrap();
        assert_matches!(ContactEmail::try_new("not-an-email"), Err(_));
        assert_matches!(ContactEmail::try_new("with space@b.co"), Err(_));
    }

    #[test]
    fn message_body_minimum_length_counts_trimmed_chars() {
        assert_matches!(ContactMessageBody::try_new("  too short  "), Err(_));
        let body = ContactMessageBody::try_new("0123456789").unwrap();
        assert_eq!(body.len(), MIN_MESSAGE_CHARS);
    }

    #[test]
    fn payload_parts_have_no_upper_length_bound() {
        ContactName::try_new("G".repeat(300)).unwrap();
        ContactEmail::try_new(format!("{}@example.com", "a".repeat(400))).unwrap();
        ContactMessageBody::try_new("m".repeat(5000)).unwrap();
    }

    #[test]
    fn field_errors_clear_single_field() {
        let mut errors = FieldErrors::default();
        errors.insert(ContactField::Name, "Name is required");
        errors.insert(ContactField::Email, "Email is required");

        errors.clear_field(ContactField::Name);

        assert_eq!(errors.get(ContactField::Name), None);
        assert_eq!(errors.get(ContactField::Email), Some("Email is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn field_errors_serialize_as_map() {
        let mut errors = FieldErrors::default();
        errors.insert(ContactField::Message, "Message is required");
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "Message is required" }));
    }

    #[test]
    fn submitting_blocks_resubmission() {
        assert!(!SubmissionStatus::Submitting.accepts_submit());
        for status in [
            SubmissionStatus::Idle,
            SubmissionStatus::Success,
            SubmissionStatus::Error,
            SubmissionStatus::NetworkError,
        ] {
            assert!(status.accepts_submit());
        }
    }
}
