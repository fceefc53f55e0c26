use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::handler::{AppState, path_segment, relay};

pub async fn get_group(State(state): State<AppState>, Path(group_id): Path<String>) -> Response {
    tracing::info!(group_id = %group_id, "got group state request");
    let segment = match path_segment(&group_id) {
        Ok(segment) => segment,
        Err(e) => return e.into_response(),
    };
    let result = state.bridge.get(&format!("groups/{}", segment)).await;
    relay(result, "group state")
}

pub async fn set_group_action(
    State(state): State<AppState>,
    Path(group_id): Path<String>,
    body: Bytes,
) -> Response {
    tracing::info!(group_id = %group_id, "got group action request");
    let segment = match path_segment(&group_id) {
        Ok(segment) => segment,
        Err(e) => return e.into_response(),
    };
    let result = state
        .bridge
        .put(&format!("groups/{}/action", segment), body)
        .await;
    relay(result, "group action")
}
