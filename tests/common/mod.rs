//! A stand-in bridge for the integration tests.
//!
//! It is a real axum server on an ephemeral port, so the proxy's `reqwest`
//! client goes over the loopback like it would to a real bridge. Every call
//! is recorded and answered with one canned reply.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, State},
    http::{Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use axum::body::Body;
use axum::http::Request;
use http_body_util::BodyExt;
use tower::ServiceExt;

use huehook::bridge::BridgeClient;
use huehook::handler::AppState;
use huehook::router::build_router;

pub const USERNAME: &str = "testuser";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub method: Method,
    pub path: String,
    pub body: Vec<u8>,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    content_type: &'static str,
    body: &'static str,
    delay: Option<Duration>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

pub struct FakeBridge {
    pub addr: SocketAddr,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeBridge {
    pub async fn start(body: &'static str) -> Self {
        FakeBridge::start_with(StatusCode::OK, "application/json", body, None).await
    }

    pub async fn start_with(
        status: StatusCode,
        content_type: &'static str,
        body: &'static str,
        delay: Option<Duration>,
    ) -> Self {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let canned = Canned {
            status,
            content_type,
            body,
            delay,
            calls: calls.clone(),
        };

        let app = Router::new()
            .fallback(record)
            .layer(DefaultBodyLimit::disable())
            .with_state(canned);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        FakeBridge { addr, calls }
    }

    /// Host part of the config, `127.0.0.1:<port>`.
    pub fn ip(&self) -> String {
        self.addr.to_string()
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/{}", self.addr, USERNAME)
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

async fn record(State(canned): State<Canned>, method: Method, uri: Uri, body: Bytes) -> Response {
    canned.calls.lock().unwrap().push(RecordedCall {
        method,
        path: uri.path().to_string(),
        body: body.to_vec(),
    });

    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    (
        canned.status,
        [(header::CONTENT_TYPE, canned.content_type)],
        canned.body,
    )
        .into_response()
}

/// Proxy router pointed at `base_url`.
pub fn proxy_app(base_url: &str, timeout: Option<Duration>) -> Router {
    let bridge = BridgeClient::new(base_url, timeout).unwrap();
    build_router(AppState::new(bridge))
}

/// An address nothing is listening on.
pub async fn dead_address() -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// Sends one request through the router, returns (status, content-type, body).
pub async fn send(
    app: &Router,
    method: Method,
    path: &str,
    body: &[u8],
) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(path)
                .body(Body::from(body.to_vec()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, content_type, body.to_vec())
}
