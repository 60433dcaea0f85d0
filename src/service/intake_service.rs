use std::sync::Arc;

use crate::{
    domain::{AdmissionMessage, AdmissionSubmission, EnquiryMessage, EnquirySubmission},
    error::Result,
    repository::{AdmissionRepository, EnquiryRepository},
};

pub const ADMISSION_RECEIVED: &str = "Admission request submitted successfully.";
pub const ENQUIRY_RECEIVED: &str = "Your message has been sent successfully.";

/// Accepts website form posts. Nothing is stored unless every field validates.
pub struct IntakeService {
    admissions: Arc<dyn AdmissionRepository>,
    enquiries: Arc<dyn EnquiryRepository>,
}

impl IntakeService {
    pub fn new(admissions: Arc<dyn AdmissionRepository>, enquiries: Arc<dyn EnquiryRepository>) -> Self {
        Self { admissions, enquiries }
    }

    pub async fn submit_admission(&self, submission: AdmissionSubmission) -> Result<AdmissionMessage> {
        let new_message = submission.into_new_message()?;
        let message = self.admissions.create(new_message).await?;
        tracing::info!(admission_id = message.id, "Admission request received");
        Ok(message)
    }

    pub async fn submit_enquiry(&self, submission: EnquirySubmission) -> Result<EnquiryMessage> {
        let new_message = submission.into_new_message()?;
        let message = self.enquiries.create(new_message).await?;
        tracing::info!(enquiry_id = message.id, subject = ?message.subject, "Contact enquiry received");
        Ok(message)
    }

    pub async fn count_admissions(&self) -> Result<i64> {
        self.admissions.count().await
    }

    pub async fn count_enquiries(&self) -> Result<i64> {
        self.enquiries.count().await
    }
}
