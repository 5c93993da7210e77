//! Security header audit handler.

use axum::{
    extract::{rejection::JsonRejection, State},
    response::{IntoResponse, Response},
    Json,
};

use super::super::types::{AppState, AuditRequest, SecurityResponse};
use super::{error_response, requested_url};

/// `POST /check-security`
pub async fn check_security_handler(
    State(state): State<AppState>,
    body: Result<Json<AuditRequest>, JsonRejection>,
) -> Response {
    let url = requested_url(body);
    match state.audits.audit_security(url.as_deref()).await {
        Ok(report) => Json(SecurityResponse::from(report)).into_response(),
        Err(e) => error_response(&e),
    }
}
