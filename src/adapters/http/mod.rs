//! HTTP adapters - REST API implementations.

pub mod roster;

use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use roster::{roster_router, RosterAppState};

/// The full application router with request tracing and a request timeout.
pub fn app_router(state: RosterAppState, request_timeout: Duration) -> Router {
    roster_router(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}
