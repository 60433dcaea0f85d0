use axum::{extract::State, Json};
use serde::Serialize;

use crate::{
    api::state::AppState,
    domain::{to_cents, FeeStructure, SchoolLevel},
    error::Result,
    storage::FileResolver,
};

/// Amounts go out as strings with exactly two decimals so no client ever sees
/// a binary float.
#[derive(Debug, Serialize)]
pub struct FeeResponse {
    pub id: i64,
    pub level: SchoolLevel,
    pub tuition_per_term: String,
    pub meals_fee: String,
    pub transport_fee: String,
    pub total_fee: String,
    pub file: Option<String>,
}

impl FeeResponse {
    pub fn new(fee: FeeStructure, files: &dyn FileResolver) -> Self {
        Self {
            id: fee.id,
            level: fee.level,
            tuition_per_term: to_cents(fee.amounts.tuition_per_term).to_string(),
            meals_fee: to_cents(fee.amounts.meals_fee).to_string(),
            transport_fee: to_cents(fee.amounts.transport_fee).to_string(),
            total_fee: to_cents(fee.total_fee).to_string(),
            file: files.resolve_optional(fee.file.as_deref()),
        }
    }
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<FeeResponse>>> {
    let ctx = &state.service_context;
    let fees = ctx.fee_service.list().await?;
    Ok(Json(
        fees.into_iter()
            .map(|fee| FeeResponse::new(fee, ctx.file_resolver.as_ref()))
            .collect(),
    ))
}
