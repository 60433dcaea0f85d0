pub mod forms;
pub mod pages;
pub mod templates;

use axum::{
    Router,
    routing::get,
};
use crate::api::state::AppState;

pub fn create_web_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/about/", get(pages::about))
        .route("/admissions/", get(forms::admissions_page).post(forms::admissions_submit))
        .route("/alumni/", get(pages::alumni))
        .route("/contact/", get(forms::contact_page).post(forms::contact_submit))
        .route("/events/", get(pages::events))
        .route("/faqs/", get(pages::faqs))
        .route("/fees/", get(pages::fees))
}
