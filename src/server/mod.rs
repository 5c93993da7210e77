//! HTTP audit server.
//!
//! Provides two endpoints:
//! - `POST /check-seo` - SEO audit of the page at `{ "url": ... }`
//! - `POST /check-security` - security header audit of the same
//!
//! Each request is audited independently; the server holds no per-request state.

mod handlers;
mod types;

use axum::http::{header, HeaderValue, Method};
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::app::shutdown_signal;
use crate::audit::AuditContext;
use crate::config::Config;
use handlers::{check_security_handler, check_seo_handler};
pub use types::{AppState, AuditRequest, ErrorResponse, SecurityResponse, SeoResponse};

/// Builds the router for the audit endpoints.
///
/// Any origin may call the endpoints, so a browser front end served from
/// elsewhere can submit audits. Responses carry the service's own hardening
/// headers unless a handler already set them.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/check-seo", post(check_seo_handler))
        .route("/check-security", post(check_security_handler))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::X_FRAME_OPTIONS,
            HeaderValue::from_static("SAMEORIGIN"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::REFERRER_POLICY,
            HeaderValue::from_static("no-referrer"),
        ))
        .layer(cors)
        .with_state(state)
}

/// Serves the audit endpoints on an already bound listener until `cancel` fires.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    cancel: CancellationToken,
) -> Result<(), anyhow::Error> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal(cancel))
        .await
        .map_err(|e| anyhow::anyhow!("Audit server error: {}", e))
}

/// Creates and starts the audit server.
///
/// Returns after a shutdown signal (or cancellation of `cancel`) once
/// in-flight requests have drained.
pub async fn start_server(config: &Config, cancel: CancellationToken) -> Result<(), anyhow::Error> {
    let audits = AuditContext::new(config, cancel.clone())
        .map_err(|e| anyhow::anyhow!("Failed to initialize audit clients: {}", e))?;

    let address = format!("{}:{}", config.bind, config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind audit server to {}: {}", address, e))?;

    log::info!("Audit server listening on http://{}/", address);
    log::info!("  - SEO audit: POST http://{}/check-seo", address);
    log::info!("  - Security audit: POST http://{}/check-security", address);

    serve(listener, AppState { audits }, cancel).await?;

    log::info!("Audit server stopped");
    Ok(())
}
