use axum::{Router, routing::get};

use super::handler;
use crate::handler::{AppState, method_not_allowed};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/:group_id",
        get(handler::get_group)
            .put(handler::set_group_action)
            .fallback(method_not_allowed),
    )
}
