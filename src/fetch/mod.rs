//! Primary page fetching.
//!
//! Retrieves the audited page (headers, and the body when the SEO audit needs
//! it). Any failure here is fatal to the audit: the caller gets an
//! `AuditError` and no report.

mod headers;
mod request;

use log::{debug, warn};

use crate::app::AuditTarget;
use crate::config::MAX_RESPONSE_BODY_SIZE;
use crate::error_handling::{categorize_reqwest_error, AuditError};

pub use headers::HeaderSet;
pub(crate) use request::RequestHeaders;

/// Result of a successful primary fetch.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// HTTP status of the final response (always 2xx)
    pub status: u16,
    /// URL after redirects
    pub final_url: String,
    /// Response headers
    pub headers: HeaderSet,
    /// Decoded body; empty when only headers were requested
    pub body: String,
}

/// Fetches the audited page including its body.
///
/// # Errors
///
/// - `AuditError::Fetch` on network failure, timeout, or a non-2xx status
/// - `AuditError::BodyTooLarge` if the body exceeds `MAX_RESPONSE_BODY_SIZE`
pub async fn fetch_page(
    client: &reqwest::Client,
    target: &AuditTarget,
) -> Result<FetchedPage, AuditError> {
    let mut response = send(client, target).await?;
    let mut page = describe(&response);

    if response
        .content_length()
        .is_some_and(|len| len > MAX_RESPONSE_BODY_SIZE as u64)
    {
        return Err(body_too_large(target));
    }

    let mut body = Vec::new();
    while let Some(chunk) = response.chunk().await.map_err(|e| fetch_error(target, &e))? {
        if body.len() + chunk.len() > MAX_RESPONSE_BODY_SIZE {
            return Err(body_too_large(target));
        }
        body.extend_from_slice(&chunk);
    }
    page.body = String::from_utf8_lossy(&body).into_owned();

    debug!(
        "Fetched {} ({} bytes, status {})",
        page.final_url,
        body.len(),
        page.status
    );
    Ok(page)
}

/// Fetches the audited page's response headers without reading the body.
///
/// # Errors
///
/// `AuditError::Fetch` on network failure, timeout, or a non-2xx status.
pub async fn fetch_headers(
    client: &reqwest::Client,
    target: &AuditTarget,
) -> Result<FetchedPage, AuditError> {
    let response = send(client, target).await?;
    let page = describe(&response);
    debug!(
        "Fetched headers of {} ({} headers, status {})",
        page.final_url,
        page.headers.len(),
        page.status
    );
    Ok(page)
}

async fn send(
    client: &reqwest::Client,
    target: &AuditTarget,
) -> Result<reqwest::Response, AuditError> {
    let request = RequestHeaders::apply_to_request_builder(client.get(target.url().clone()));
    request
        .send()
        .await
        .and_then(reqwest::Response::error_for_status)
        .map_err(|e| {
            let err = fetch_error(target, &e);
            warn!("{err}");
            err
        })
}

fn describe(response: &reqwest::Response) -> FetchedPage {
    FetchedPage {
        status: response.status().as_u16(),
        final_url: response.url().to_string(),
        headers: HeaderSet::from_header_map(response.headers()),
        body: String::new(),
    }
}

fn fetch_error(target: &AuditTarget, error: &reqwest::Error) -> AuditError {
    AuditError::Fetch {
        url: target.as_str().to_string(),
        failure: categorize_reqwest_error(error),
    }
}

fn body_too_large(target: &AuditTarget) -> AuditError {
    warn!(
        "Response body for {} exceeds {} bytes",
        target.as_str(),
        MAX_RESPONSE_BODY_SIZE
    );
    AuditError::BodyTooLarge {
        url: target.as_str().to_string(),
        limit: MAX_RESPONSE_BODY_SIZE,
    }
}
