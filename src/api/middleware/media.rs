use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};
use chrono::Utc;
use serde::Deserialize;

use crate::{api::state::AppState, error::AppError};

#[derive(Debug, Default, Deserialize)]
pub struct MediaQuery {
    pub expires: Option<String>,
    pub signature: Option<String>,
}

/// Guards `/media/` so only URLs the configured resolver would hand out are
/// served.
pub async fn require_media_access(
    State(state): State<AppState>,
    Query(query): Query<MediaQuery>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let raw_key = request
        .uri()
        .path()
        .strip_prefix("/media/")
        .unwrap_or_default();
    // Keys are signed in their decoded form.
    let key = urlencoding::decode(raw_key)
        .map_err(|_| AppError::Forbidden)?
        .into_owned();

    let resolver = &state.service_context.file_resolver;
    let permitted = resolver.permits(
        &key,
        query.expires.as_deref(),
        query.signature.as_deref(),
        Utc::now().timestamp(),
    );
    if !permitted {
        tracing::debug!(key, resolver = resolver.name(), "Rejected media request");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(request).await)
}
