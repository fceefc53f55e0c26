use std::borrow::Cow;
use std::sync::Arc;

use axum::{
    Json,
    http::Method,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::api::APIResponse;
use crate::bridge::{BridgeClient, BridgeReply};
use crate::error::{BridgeError, ProxyError};

#[derive(Clone)]
pub struct AppState {
    pub bridge: Arc<BridgeClient>,
}

impl AppState {
    pub fn new(bridge: BridgeClient) -> Self {
        AppState {
            bridge: Arc::new(bridge),
        }
    }
}

pub async fn healthcheck() -> impl IntoResponse {
    info!("got healthcheck request");
    Json(APIResponse::new_from_msg("ok"))
}

/// Fallback for every method the hook routes don't list.
pub async fn method_not_allowed(method: Method) -> Response {
    info!(method = %method, "rejected hook request");
    ProxyError::MethodNotAllowed(method).into_response()
}

/// Hands a bridge reply back to the caller, or turns the failure into an
/// error response. `what` only shows up in the logs.
pub(crate) fn relay(result: Result<BridgeReply, BridgeError>, what: &str) -> Response {
    match result {
        Ok(reply) => {
            info!(status = %reply.status, bytes = reply.body.len(), "relayed {}", what);
            reply.into_response()
        }
        Err(e) => {
            tracing::error!(error = %crate::unpack_error(&e), "failed to relay {}", what);
            ProxyError::from(e).into_response()
        }
    }
}

/// Encodes a caller's identifier as exactly one bridge path segment, so `/`,
/// `?` and `#` stay data. `.` and `..` are refused outright: URL parsing would
/// resolve them against the bridge path whatever their encoding.
pub(crate) fn path_segment(id: &str) -> Result<Cow<'_, str>, ProxyError> {
    if id == "." || id == ".." {
        return Err(ProxyError::InvalidIdentifier(id.to_string()));
    }
    Ok(urlencoding::encode(id))
}
