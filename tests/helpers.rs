// Shared test helpers for starting the audit server and serving test pages.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::net::SocketAddr;
use std::time::Duration;

use page_audit::server::{serve, AppState};
use page_audit::{AuditContext, Config};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running audit server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub cancel: CancellationToken,
    pub handle: JoinHandle<anyhow::Result<()>>,
}

impl TestServer {
    /// URL of an endpoint on this server.
    pub fn endpoint(&self, route: &str) -> String {
        format!("http://{}{}", self.addr, route)
    }

    /// Cancels the server and waits for it to stop.
    #[allow(dead_code)] // Used by other test files
    pub async fn shutdown(self) {
        self.cancel.cancel();
        tokio::time::timeout(Duration::from_secs(5), self.handle)
            .await
            .expect("server did not stop in time")
            .expect("server task panicked")
            .expect("server returned an error");
    }
}

/// Config with short timeouts so failure cases finish quickly.
#[allow(dead_code)] // Used by other test files
pub fn test_config() -> Config {
    Config {
        timeout_seconds: 2,
        probe_timeout_seconds: 1,
        ..Config::default()
    }
}

/// Starts the audit server with `config`.
#[allow(dead_code)] // Used by other test files
pub async fn start_server_with(config: Config) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has no address");
    let cancel = CancellationToken::new();
    let audits =
        AuditContext::new(&config, cancel.clone()).expect("Failed to build audit clients");
    let handle = tokio::spawn(serve(listener, AppState { audits }, cancel.clone()));
    TestServer {
        addr,
        cancel,
        handle,
    }
}

/// Starts the audit server with [`test_config`].
#[allow(dead_code)] // Used by other test files
pub async fn start_server() -> TestServer {
    start_server_with(test_config()).await
}

/// Serves `html` at `route` on `upstream`.
#[allow(dead_code)] // Used by other test files
pub async fn mount_page(upstream: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .mount(upstream)
        .await;
}

/// POSTs a JSON body to `url` and returns the status and parsed JSON response.
#[allow(dead_code)] // Used by other test files
pub async fn post_json(url: &str, body: serde_json::Value) -> (u16, serde_json::Value) {
    let response = reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .expect("request to audit server failed");
    let status = response.status().as_u16();
    let json = response
        .json::<serde_json::Value>()
        .await
        .expect("response is not JSON");
    (status, json)
}
