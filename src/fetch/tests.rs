// Fetch module tests.

use super::*;
use crate::app::validate_audit_url;
use crate::error_handling::FetchFailure;
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder().timeout(timeout).build().unwrap()
}

#[tokio::test]
async fn test_fetch_page_reads_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("X-Frame-Options", "DENY")
                .set_body_string("<html><title>Hi</title></html>"),
        )
        .mount(&server)
        .await;

    let target = validate_audit_url(Some(&format!("{}/page", server.uri()))).unwrap();
    let page = fetch_page(&test_client(Duration::from_secs(5)), &target)
        .await
        .unwrap();

    assert_eq!(page.status, 200);
    assert!(page.body.contains("<title>Hi</title>"));
    assert_eq!(page.headers.get("x-frame-options"), Some("DENY"));
}

#[tokio::test]
async fn test_fetch_headers_skips_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Server", "nginx")
                .set_body_string("body"),
        )
        .mount(&server)
        .await;

    let target = validate_audit_url(Some(&server.uri())).unwrap();
    let page = fetch_headers(&test_client(Duration::from_secs(5)), &target)
        .await
        .unwrap();

    assert!(page.body.is_empty());
    assert!(page.headers.is_present("server"));
}

#[tokio::test]
async fn test_fetch_page_non_2xx_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let target = validate_audit_url(Some(&server.uri())).unwrap();
    let err = fetch_page(&test_client(Duration::from_secs(5)), &target)
        .await
        .unwrap_err();

    match err {
        AuditError::Fetch { failure, .. } => assert_eq!(failure, FetchFailure::Status(404)),
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(3)))
        .mount(&server)
        .await;

    let target = validate_audit_url(Some(&server.uri())).unwrap();
    let err = fetch_page(&test_client(Duration::from_millis(200)), &target)
        .await
        .unwrap_err();

    match err {
        AuditError::Fetch { failure, .. } => assert_eq!(failure, FetchFailure::Timeout),
        other => panic!("expected timeout, got {other:?}"),
    }
}

#[tokio::test]
async fn test_fetch_page_connection_refused() {
    let target = validate_audit_url(Some("http://127.0.0.1:1/")).unwrap();
    let err = fetch_page(&test_client(Duration::from_secs(5)), &target)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AuditError::Fetch {
            failure: FetchFailure::Connect,
            ..
        }
    ));
}

#[tokio::test]
async fn test_fetch_page_rejects_oversized_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("x".repeat(MAX_RESPONSE_BODY_SIZE + 1)),
        )
        .mount(&server)
        .await;

    let target = validate_audit_url(Some(&server.uri())).unwrap();
    let err = fetch_page(&test_client(Duration::from_secs(5)), &target)
        .await
        .unwrap_err();
    assert!(matches!(err, AuditError::BodyTooLarge { .. }));
}
