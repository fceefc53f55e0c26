//! Group Hooks
//!
//! Same shape as the light hooks, against the bridge's groups:
//! `GET` reads `{base}/groups/{id}`, `PUT` sends the body to
//! `{base}/groups/{id}/action`, which applies it to every light in the group.

mod handler;
mod routes;

pub use routes::routes;
