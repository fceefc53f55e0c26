//! Light Hooks
//!
//! Proxies a single light's state on the bridge:
//!
//! - `GET /hooks/lights/{id}` reads `{base}/lights/{id}`
//! - `PUT /hooks/lights/{id}` writes the body to `{base}/lights/{id}/state`
//!
//! The identifier and body go through unchecked, the bridge is the one that
//! complains about bad input.
//!
//! # Usage
//!
//! ```rust,ignore
//! use huehook::lights;
//!
//! let app = Router::new()
//!     .nest("/hooks/lights", lights::routes())
//!     .with_state(app_state);
//! ```

mod handler;
mod routes;

pub use routes::routes;
