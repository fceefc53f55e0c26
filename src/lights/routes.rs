use axum::{Router, routing::get};

use super::handler;
use crate::handler::{AppState, method_not_allowed};

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/:light_id",
        get(handler::get_light)
            .put(handler::set_light_state)
            .fallback(method_not_allowed),
    )
}
