//! SEO audit handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, AuditRequest, SeoResponse};
use super::{error_response, requested_url};

/// `POST /check-seo`
pub async fn check_seo_handler(
    State(state): State<AppState>,
    body: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let url = requested_url(body);
    match state.audits.audit_seo(url.as_deref()).await {
        Ok(report) => Json(SeoResponse::from(report)).into_response(),
        Err(e) => error_response(&e),
    }
}
