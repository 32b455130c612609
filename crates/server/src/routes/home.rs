//! Greeting and health check handlers.

use axum::{extract::State, http::StatusCode};

use crate::state::AppState;

/// Root greeting, kept for clients that probe `/`.
pub async fn greeting() -> &'static str {
    "Hello World...!"
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
pub async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Pings the document store; 503 Service Unavailable if it is unreachable.
pub async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.store().ping().await {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            tracing::warn!(error = %e, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
