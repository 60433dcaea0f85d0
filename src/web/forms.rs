use askama::Template;
use axum::{
    extract::{Form, State},
    response::IntoResponse,
};

use crate::{
    api::{
        handlers::{content::DeadlineResponse, fees::FeeResponse},
        state::AppState,
    },
    domain::{AdmissionSubmission, EnquirySubmission},
    error::{AppError, FieldErrors, Result},
    service::intake_service::{ADMISSION_RECEIVED, ENQUIRY_RECEIVED},
    web::templates::{field_error, HtmlTemplate},
};

// =============================================================================
// Admissions
// =============================================================================

#[derive(Template)]
#[template(path = "admissions.html")]
pub struct AdmissionsTemplate {
    pub deadlines: Vec<DeadlineResponse>,
    pub fees: Vec<FeeResponse>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub errors: FieldErrors,
    pub success: Option<&'static str>,
}

impl AdmissionsTemplate {
    fn error(&self, field: &str) -> String {
        field_error(&self.errors, field)
    }
}

async fn render_admissions(
    state: &AppState,
    form: AdmissionSubmission,
    errors: FieldErrors,
    success: Option<&'static str>,
) -> Result<HtmlTemplate<AdmissionsTemplate>> {
    let ctx = &state.service_context;
    let (deadlines, fees) = tokio::join!(
        ctx.catalog_service.list_deadlines(),
        ctx.fee_service.list(),
    );

    Ok(HtmlTemplate(AdmissionsTemplate {
        deadlines: deadlines?.into_iter().map(DeadlineResponse::from).collect(),
        fees: fees?
            .into_iter()
            .map(|fee| FeeResponse::new(fee, ctx.file_resolver.as_ref()))
            .collect(),
        name: form.name.unwrap_or_default(),
        email: form.email.unwrap_or_default(),
        phone: form.phone.unwrap_or_default(),
        message: form.message.unwrap_or_default(),
        errors,
        success,
    }))
}

pub async fn admissions_page(State(state): State<AppState>) -> Result<impl IntoResponse> {
    render_admissions(&state, AdmissionSubmission::default(), FieldErrors::new(), None).await
}

pub async fn admissions_submit(
    State(state): State<AppState>,
    Form(form): Form<AdmissionSubmission>,
) -> Result<impl IntoResponse> {
    match state
        .service_context
        .intake_service
        .submit_admission(form.clone())
        .await
    {
        Ok(_) => {
            render_admissions(&state, AdmissionSubmission::default(), FieldErrors::new(), Some(ADMISSION_RECEIVED)).await
        }
        Err(AppError::Validation(errors)) => render_admissions(&state, form, errors, None).await,
        Err(e) => Err(e),
    }
}

// =============================================================================
// Contact
// =============================================================================

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub errors: FieldErrors,
    pub success: Option<&'static str>,
}

impl ContactTemplate {
    fn new(form: EnquirySubmission, errors: FieldErrors, success: Option<&'static str>) -> Self {
        Self {
            name: form.name.unwrap_or_default(),
            email: form.email.unwrap_or_default(),
            subject: form.subject.unwrap_or_default(),
            message: form.message.unwrap_or_default(),
            errors,
            success,
        }
    }

    fn error(&self, field: &str) -> String {
        field_error(&self.errors, field)
    }
}

pub async fn contact_page() -> impl IntoResponse {
    HtmlTemplate(ContactTemplate::new(EnquirySubmission::default(), FieldErrors::new(), None))
}

pub async fn contact_submit(
    State(state): State<AppState>,
    Form(form): Form<EnquirySubmission>,
) -> Result<impl IntoResponse> {
    let template = match state
        .service_context
        .intake_service
        .submit_enquiry(form.clone())
        .await
    {
        Ok(_) => ContactTemplate::new(EnquirySubmission::default(), FieldErrors::new(), Some(ENQUIRY_RECEIVED)),
        Err(AppError::Validation(errors)) => ContactTemplate::new(form, errors, None),
        Err(e) => return Err(e),
    };
    Ok(HtmlTemplate(template))
}
