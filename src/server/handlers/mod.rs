//! Audit endpoint handlers.

mod security;
mod seo;

pub use security::check_security_handler;
pub use seo::check_seo_handler;

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::{info, warn};

use super::types::{AuditRequest, ErrorResponse};
use crate::error_handling::AuditError;

const INVALID_URL_MESSAGE: &str = "A valid URL is required";
const UPSTREAM_FAILURE_MESSAGE: &str = "Unable to check this URL";

/// Extracts the URL from a request body.
///
/// A body that is not JSON at all is treated like a body without a URL.
fn requested_url(body: Result<Json<AuditRequest>, JsonRejection>) -> Option<String> {
    match body {
        Ok(Json(request)) => request.url,
        Err(rejection) => {
            info!("Rejected audit request body: {rejection}");
            None
        }
    }
}

/// Maps an audit error to its HTTP response.
fn error_response(error: &AuditError) -> Response {
    let (status, message) = if error.is_invalid_input() {
        info!("Bad audit request: {error}");
        (StatusCode::BAD_REQUEST, INVALID_URL_MESSAGE)
    } else {
        warn!("Audit failed: {error}");
        (StatusCode::INTERNAL_SERVER_ERROR, UPSTREAM_FAILURE_MESSAGE)
    };
    (status, Json(ErrorResponse { error: message })).into_response()
}
