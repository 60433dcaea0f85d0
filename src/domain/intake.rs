use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use crate::error::AppError;

const REQUIRED: &str = "This field is required.";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdmissionMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnquiryMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated admission request, ready to insert.
#[derive(Debug, Clone)]
pub struct NewAdmissionMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

/// Validated contact enquiry, ready to insert.
#[derive(Debug, Clone)]
pub struct NewEnquiryMessage {
    pub name: String,
    pub email: String,
    pub subject: Option<String>,
    pub message: String,
}

/// A raw website form body that can be checked without being consumed.
pub trait SubmissionForm: Clone {
    fn check(&self) -> crate::error::Result<()>;
}

/// Raw admission form body as posted by the website (JSON or urlencoded).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AdmissionSubmission {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(length(max = 20, message = "Ensure this field has no more than 20 characters."))]
    pub phone: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 1000, message = "Ensure this field has no more than 1000 characters.")
    )]
    pub message: Option<String>,
}

/// Raw contact form body.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct EnquirySubmission {
    #[validate(
        required(message = "This field is required."),
        length(max = 100, message = "Ensure this field has no more than 100 characters.")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "This field is required."),
        email(message = "Enter a valid email address.")
    )]
    pub email: Option<String>,
    #[validate(length(max = 150, message = "Ensure this field has no more than 150 characters."))]
    pub subject: Option<String>,
    #[validate(
        required(message = "This field is required."),
        length(max = 1000, message = "Ensure this field has no more than 1000 characters.")
    )]
    pub message: Option<String>,
}

/// Blank or whitespace-only input counts as absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl AdmissionSubmission {
    pub fn normalized(self) -> Self {
        Self {
            name: clean(self.name),
            email: clean(self.email),
            phone: clean(self.phone),
            message: clean(self.message),
        }
    }

    pub fn into_new_message(self) -> Result<NewAdmissionMessage, ValidationErrors> {
        let submission = self.normalized();
        submission.validate()?;

        match (submission.name, submission.email, submission.message) {
            (Some(name), Some(email), Some(message)) => Ok(NewAdmissionMessage {
                name,
                email,
                phone: submission.phone,
                message,
            }),
            (name, email, message) => Err(missing_fields(&[
                ("name", name.is_none()),
                ("email", email.is_none()),
                ("message", message.is_none()),
            ])),
        }
    }
}

impl EnquirySubmission {
    pub fn normalized(self) -> Self {
        Self {
            name: clean(self.name),
            email: clean(self.email),
            subject: clean(self.subject),
            message: clean(self.message),
        }
    }

    pub fn into_new_message(self) -> Result<NewEnquiryMessage, ValidationErrors> {
        let submission = self.normalized();
        submission.validate()?;

        match (submission.name, submission.email, submission.message) {
            (Some(name), Some(email), Some(message)) => Ok(NewEnquiryMessage {
                name,
                email,
                subject: submission.subject,
                message,
            }),
            (name, email, message) => Err(missing_fields(&[
                ("name", name.is_none()),
                ("email", email.is_none()),
                ("message", message.is_none()),
            ])),
        }
    }
}

impl SubmissionForm for AdmissionSubmission {
    fn check(&self) -> crate::error::Result<()> {
        self.clone().into_new_message().map(|_| ()).map_err(AppError::from)
    }
}

impl SubmissionForm for EnquirySubmission {
    fn check(&self) -> crate::error::Result<()> {
        self.clone().into_new_message().map(|_| ()).map_err(AppError::from)
    }
}

// Fallback for required fields `validate()` should already have rejected.
fn missing_fields(fields: &[(&'static str, bool)]) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    for (field, missing) in fields {
        if *missing {
            let mut error = validator::ValidationError::new("required");
            error.message = Some(REQUIRED.into());
            errors.add(*field, error);
        }
    }
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admission(name: &str, email: &str, message: &str) -> AdmissionSubmission {
        AdmissionSubmission {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            phone: Some("0712345678".to_string()),
            message: Some(message.to_string()),
        }
    }

    #[test]
    fn accepts_complete_admission() {
        let new = admission(" Jane Doe ", "jane@example.com", "Grade 4 place for 2025")
            .into_new_message()
            .unwrap();
        assert_eq!(new.name, "Jane Doe");
        assert_eq!(new.phone.as_deref(), Some("0712345678"));
    }

    #[test]
    fn rejects_missing_email() {
        let mut submission = admission("Jane", "jane@example.com", "Hello");
        submission.email = None;
        let errors = submission.into_new_message().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn rejects_malformed_email() {
        let errors = admission("Jane", "not-an-email", "Hello")
            .into_new_message()
            .unwrap_err();
        let email_errors = errors.field_errors();
        let messages: Vec<_> = email_errors["email"]
            .iter()
            .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
            .collect();
        assert_eq!(messages, vec!["Enter a valid email address.".to_string()]);
    }

    #[test]
    fn whitespace_only_counts_as_missing() {
        let errors = admission("   ", "jane@example.com", "\n\t")
            .into_new_message()
            .unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("message"));
        assert!(!fields.contains_key("email"));
    }

    #[test]
    fn enquiry_subject_is_optional() {
        let new = EnquirySubmission {
            name: Some("Sam".to_string()),
            email: Some("sam@example.com".to_string()),
            subject: None,
            message: Some("Is there a bus to Kitengela?".to_string()),
        }
        .into_new_message()
        .unwrap();
        assert!(new.subject.is_none());
    }
}
