use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    Form, Json,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};

use crate::{
    api::state::AppState,
    domain::{AdmissionSubmission, EnquirySubmission, SubmissionForm},
    error::{AppError, FieldErrors, Result},
    service::intake_service::{ADMISSION_RECEIVED, ENQUIRY_RECEIVED},
};

const NOT_A_STRING: &str = "Not a valid string.";

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: &'static str,
}

pub async fn admission(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<SubmissionResponse>)> {
    let submission: AdmissionSubmission = read_submission(request).await?;
    state
        .service_context
        .intake_service
        .submit_admission(submission)
        .await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse { success: ADMISSION_RECEIVED })))
}

pub async fn contact(
    State(state): State<AppState>,
    request: Request,
) -> Result<(StatusCode, Json<SubmissionResponse>)> {
    let submission: EnquirySubmission = read_submission(request).await?;
    state
        .service_context
        .intake_service
        .submit_enquiry(submission)
        .await?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse { success: ENQUIRY_RECEIVED })))
}

// =============================================================================
// Body decoding
// =============================================================================

/// Decodes a JSON or urlencoded body into a submission. Numbers are taken as
/// their text; any other non-string value is a field error reported together
/// with the submission's own validation errors.
async fn read_submission<T>(request: Request) -> Result<T>
where
    T: SubmissionForm + DeserializeOwned,
{
    let fields = read_fields(request).await?;

    let mut errors = FieldErrors::new();
    let mut text = Map::new();
    for (field, value) in fields {
        match value {
            Value::Null => {}
            Value::String(s) => {
                text.insert(field, Value::String(s));
            }
            Value::Number(n) => {
                text.insert(field, Value::String(n.to_string()));
            }
            _ => {
                errors.entry(field).or_default().push(NOT_A_STRING.to_string());
            }
        }
    }

    let submission: T = serde_json::from_value(Value::Object(text))
        .map_err(|e| AppError::BadRequest(format!("Invalid submission: {}", e)))?;
    if errors.is_empty() {
        return Ok(submission);
    }

    if let Err(AppError::Validation(more)) = submission.check() {
        for (field, messages) in more {
            errors.entry(field).or_insert(messages);
        }
    }
    Err(AppError::Validation(errors))
}

async fn read_fields(request: Request) -> Result<Map<String, Value>> {
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_ascii_lowercase();

    if content_type.starts_with("application/x-www-form-urlencoded") {
        let Form(pairs) = Form::<Vec<(String, String)>>::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return Ok(pairs
            .into_iter()
            .map(|(field, value)| (field, Value::String(value)))
            .collect());
    }

    if content_type.starts_with("application/json") {
        let Json(body) = Json::<Value>::from_request(request, &())
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;
        return match body {
            Value::Object(map) => Ok(map),
            other => Err(AppError::invalid_field(
                "non_field_errors",
                format!("Invalid data. Expected a dictionary, but got {}.", json_kind(&other)),
            )),
        };
    }

    Err(AppError::UnsupportedMediaType(format!(
        "Unsupported media type \"{}\" in request.",
        content_type
    )))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "list",
        Value::String(_) => "str",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
        Value::Object(_) => "dict",
    }
}
