//! Router assembly.
//!
//! [`build_router`] mounts the hook routes and the healthcheck with CORS and
//! request tracing. `main` and the integration tests both go through it.

use axum::{Router, extract::DefaultBodyLimit, http::Method, routing::get};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::groups;
use crate::handler::{AppState, healthcheck};
use crate::lights;

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::PUT])
        .allow_headers(Any);

    Router::new()
        .route("/", get(healthcheck))
        .nest("/hooks/lights", lights::routes())
        .nest("/hooks/groups", groups::routes())
        // PUT bodies are opaque and go to the bridge whole, whatever their size.
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
