use serde::{Deserialize, Serialize};

/// Body of everything huehook answers on its own behalf. Bridge replies are
/// never wrapped in this.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct APIResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl APIResponse {
    pub fn new_from_msg(msg: &str) -> Self {
        APIResponse {
            status: msg.to_owned(),
            error: None,
        }
    }

    pub fn error(err: &str) -> Self {
        APIResponse {
            status: "error".to_owned(),
            error: Some(err.to_owned()),
        }
    }
}

/// `POST /api` body.
#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub devicetype: &'a str,
}

/// One element of the array the bridge answers `POST /api` with.
#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RegisterEntry {
    Success {
        username: String,
    },
    Error {
        #[serde(rename = "type")]
        kind: u16,
        #[serde(default)]
        address: String,
        description: String,
    },
}
