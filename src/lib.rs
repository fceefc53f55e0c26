use std::error::Error;

pub mod api;
pub mod bridge;
pub mod config;
pub mod error;
pub mod groups;
pub mod handler;
pub mod lights;
pub mod router;

/// Flattens an error and its sources into `outer: inner: root`.
pub fn unpack_error(err: &(dyn Error)) -> String {
    let mut parts = Vec::new();
    parts.push(err.to_string());
    let mut current = err.source();
    while let Some(source) = current {
        parts.push(source.to_string());
        current = source.source();
    }
    parts.join(": ")
}
