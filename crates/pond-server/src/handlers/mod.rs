//! HTTP handlers

pub mod logs;

/// Liveness and discovery text. Does not touch storage.
pub async fn home() -> &'static str {
    "Pond Logger API is running. Try /logs"
}
