use axum::{response::IntoResponse, Json};
use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar;

#[derive(Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
    pub status: &'static str,
    pub date: NaiveDate,
}

pub async fn api_info() -> impl IntoResponse {
    Json(ApiInfo {
        name: "Bookland Schools API",
        status: "running",
        date: calendar::today(),
    })
}
