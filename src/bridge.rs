//! Outbound half of the proxy.
//!
//! [`BridgeClient`] owns the base URL (`http://<ip>/api/<username>`) and a
//! `reqwest` client, and turns one inbound hook call into exactly one bridge
//! call. Whatever the bridge answers is handed back untouched as a
//! [`BridgeReply`]; only transport failures become a [`BridgeError`].

use std::time::Duration;

use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use tracing::{debug, info};

use crate::api::{RegisterEntry, RegisterRequest};
use crate::config::Bridge;
use crate::error::{BridgeError, RegistrationError};

/// Raw bridge answer. The body is relayed byte for byte.
#[derive(Debug, Clone)]
pub struct BridgeReply {
    pub status: StatusCode,
    pub content_type: Option<HeaderValue>,
    pub body: Bytes,
}

impl IntoResponse for BridgeReply {
    // The bridge's own status is not translated, callers always get 200.
    fn into_response(self) -> Response {
        let content_type = self
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json"));

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type)
            .body(Body::from(self.body))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
    }
}

#[derive(Debug, Clone)]
pub struct BridgeClient {
    client: Client,
    base_url: String,
}

impl BridgeClient {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, BridgeError> {
        // The bridge is on the LAN, system proxies only get in the way.
        let mut builder = Client::builder().no_proxy();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BridgeError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config(cfg: &Bridge) -> Result<Self, BridgeError> {
        BridgeClient::new(cfg.base_url(), cfg.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL as-is. Identifiers inside it must
    /// already be encoded as single segments.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    pub async fn get(&self, path: &str) -> Result<BridgeReply, BridgeError> {
        let url = self.url(path);
        info!(method = "GET", url = %url, "forwarding to bridge");
        self.send(&url, self.client.get(&url)).await
    }

    pub async fn put(&self, path: &str, body: Bytes) -> Result<BridgeReply, BridgeError> {
        let url = self.url(path);
        info!(method = "PUT", url = %url, bytes = body.len(), "forwarding to bridge");
        self.send(&url, self.client.put(&url).body(body)).await
    }

    async fn send(&self, url: &str, request: RequestBuilder) -> Result<BridgeReply, BridgeError> {
        let response = request
            .send()
            .await
            .map_err(|e| BridgeError::from_send(url, e))?;

        let status = response.status();
        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();
        let body = response
            .bytes()
            .await
            .map_err(|e| BridgeError::from_read(url, e))?;

        debug!(url = %url, status = %status, bytes = body.len(), "bridge replied");

        Ok(BridgeReply {
            status,
            content_type,
            body,
        })
    }
}

/// Asks the bridge at `registration_url` (`http://<ip>/api`) for a new
/// username. The bridge only grants one within 30 seconds of its link button
/// being pressed.
pub async fn register(
    registration_url: &str,
    devicetype: &str,
    timeout: Option<Duration>,
) -> Result<String, RegistrationError> {
    let bridge = BridgeClient::new(registration_url, timeout)?;
    info!(url = %registration_url, devicetype, "requesting bridge username");

    let request = bridge
        .client
        .post(registration_url)
        .json(&RegisterRequest { devicetype });
    let reply = bridge.send(registration_url, request).await?;

    parse_registration(&reply.body)
}

fn parse_registration(body: &[u8]) -> Result<String, RegistrationError> {
    let unexpected = || RegistrationError::UnexpectedReply(String::from_utf8_lossy(body).into_owned());

    let entries: Vec<RegisterEntry> = serde_json::from_slice(body).map_err(|_| unexpected())?;

    match entries.into_iter().next() {
        Some(RegisterEntry::Success { username }) => Ok(username),
        Some(RegisterEntry::Error {
            kind, description, ..
        }) => Err(RegistrationError::Rejected { kind, description }),
        None => Err(unexpected()),
    }
}
