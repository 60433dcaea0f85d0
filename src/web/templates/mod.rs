use askama::Template;
use axum::{
    response::{Html, IntoResponse, Response},
    http::StatusCode,
};

use crate::error::FieldErrors;

// Make askama templates work with axum
pub struct HtmlTemplate<T>(pub T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => {
                tracing::error!("Failed to render template: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to render template: {}", err),
                ).into_response()
            }
        }
    }
}

/// Joined messages for one form field, empty when it passed validation.
pub fn field_error(errors: &FieldErrors, field: &str) -> String {
    errors
        .get(field)
        .map(|messages| messages.join(" "))
        .unwrap_or_default()
}
