//! Pond Logger API
//!
//! HTTP service that records pond water-quality readings and returns the
//! accumulated history. Readings are kept in an embedded SQLite file.

pub mod config;
pub mod error;
pub mod handlers;
pub mod storage;

use axum::{routing::get, Router};
use pond_core::ReadingStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ReadingStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn ReadingStore>) -> Self {
        Self { store }
    }
}

/// Builds the router. Requests running longer than `request_timeout` are
/// answered with 408.
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/logs", get(handlers::logs::list).post(handlers::logs::create))
        // Layers
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
