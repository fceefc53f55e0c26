use axum::{
    Json,
    http::{Method, StatusCode},
    response::{IntoResponse, Response},
};

use crate::api::APIResponse;

/// Failures talking to the bridge. Anything the bridge actually answers with
/// is not an error here, it gets relayed as-is.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error("failed to build http client")]
    Client(#[source] reqwest::Error),

    #[error("bridge did not answer {url} in time")]
    Timeout {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("bridge unreachable at {url}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read bridge response from {url}")]
    ReadBody {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

impl BridgeError {
    pub(crate) fn from_send(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            BridgeError::Timeout { url, source }
        } else {
            BridgeError::Unreachable { url, source }
        }
    }

    pub(crate) fn from_read(url: &str, source: reqwest::Error) -> Self {
        let url = url.to_string();
        if source.is_timeout() {
            BridgeError::Timeout { url, source }
        } else {
            BridgeError::ReadBody { url, source }
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            BridgeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            BridgeError::Unreachable { .. } | BridgeError::ReadBody { .. } => StatusCode::BAD_GATEWAY,
            BridgeError::Client(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What a hook handler can fail with.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),

    #[error("no such resource: {0:?}")]
    InvalidIdentifier(String),

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

impl ProxyError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProxyError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::InvalidIdentifier(_) => StatusCode::NOT_FOUND,
            ProxyError::Bridge(e) => e.status_code(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(APIResponse::error(&crate::unpack_error(&self)))).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error("bridge refused registration (type {kind}): {description}")]
    Rejected { kind: u16, description: String },

    #[error("unexpected registration reply: {0}")]
    UnexpectedReply(String),
}

impl RegistrationError {
    /// Type 101 is the bridge asking for its link button.
    pub fn is_link_button_not_pressed(&self) -> bool {
        matches!(self, RegistrationError::Rejected { kind: 101, .. })
    }
}
