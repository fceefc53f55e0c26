use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use crate::handler::{AppState, path_segment, relay};

pub async fn get_light(State(state): State<AppState>, Path(light_id): Path<String>) -> Response {
    tracing::info!(light_id = %light_id, "got light state request");
    let segment = match path_segment(&light_id) {
        Ok(segment) => segment,
        Err(e) => return e.into_response(),
    };
    let result = state.bridge.get(&format!("lights/{}", segment)).await;
    relay(result, "light state")
}

pub async fn set_light_state(
    State(state): State<AppState>,
    Path(light_id): Path<String>,
    body: Bytes,
) -> Response {
    tracing::info!(light_id = %light_id, "got set light state request");
    let segment = match path_segment(&light_id) {
        Ok(segment) => segment,
        Err(e) => return e.into_response(),
    };
    let result = state
        .bridge
        .put(&format!("lights/{}/state", segment), body)
        .await;
    relay(result, "light state update")
}
